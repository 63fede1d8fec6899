//! Fetching and parsing of the seismic and plate boundary feeds.

mod geojson;
mod source;

pub use geojson::*;
pub use source::*;
