//! Output formats for a finished map.
//!
//! - `html` - standalone Leaflet page, the interactive map
//! - `svg` - static world-extent snapshot without tiles

pub(crate) mod fs;
mod html;
mod svg;

pub use fs::write_atomic;
