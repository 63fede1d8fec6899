#![doc = "quakemap public API"]
mod config;
mod feed;
mod io;
mod logging;
mod map;
mod pipeline;
mod render;
mod style;

#[doc(inline)]
pub use config::{MapConfig, TileLayerConfig, PB2002_BOUNDARIES, USGS_ALL_WEEK};

#[doc(inline)]
pub use feed::{Feed, FeedSource, LocatedFeeds, Location, MemFeeds, PlateBoundary, PlateCollection, Quake, SeismicCollection};

#[doc(inline)]
pub use io::write_atomic;

#[doc(inline)]
pub use logging::{init_logging, level_for_verbosity};

#[doc(inline)]
pub use map::{
    build_legend, legend_entries, legend_html, BaseId, CircleMarker, Control, LatLng, LayerControl, LayerRegistry,
    Legend, LegendEntry, MapView, Overlay, OverlayId, OverlayKind, PathStyle, Position, TileLayer,
};

#[doc(inline)]
pub use pipeline::{init, run, BasemapReady, Outcome, PlatesReady, SeismicReady, Stage, StageFailure, EARTHQUAKES, TECTONIC_PLATES};

#[doc(inline)]
pub use render::{plates_overlay, popup_text, quake_marker, quake_style, seismic_overlay};

#[doc(inline)]
pub use style::{color_for_depth, depth_bucket, radius_for_magnitude, Color, DEPTH_COLORS, DEPTH_INTERVALS, OUTLINE, PLATE_LINE};
