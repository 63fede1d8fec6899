//! Static SVG snapshot of a map, for places where a Leaflet page cannot be opened.

mod proj;
mod writer;
