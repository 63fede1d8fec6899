mod control;
mod layer;
mod legend;
mod map;

pub use control::{Control, LayerControl, LayerRegistry, Position};
pub use layer::{BaseId, CircleMarker, LatLng, Overlay, OverlayId, OverlayKind, PathStyle, TileLayer};
pub use legend::{build_legend, legend_entries, legend_html, Legend, LegendEntry};
pub use map::MapView;
