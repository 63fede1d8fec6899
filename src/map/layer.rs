use serde::Serialize;

use crate::{config::TileLayerConfig, style::Color};

/// (lat, lng), the order Leaflet expects.
pub type LatLng = [f64; 2];

/// Handle to a base layer of a [`super::MapView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BaseId(pub usize);

/// Handle to an overlay layer of a [`super::MapView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct OverlayId(pub usize);

/// Background imagery served by a tile server.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub url: String,
    pub attribution: String,
}

impl From<&TileLayerConfig> for TileLayer {
    fn from(config: &TileLayerConfig) -> Self {
        Self { name: config.name.clone(), url: config.url.clone(), attribution: config.attribution.clone() }
    }
}

/// Path options, serialized under Leaflet's option names.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub color: Color,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Circle radius in pixels. Only meaningful for circle markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl PathStyle {
    pub fn stroke(color: Color, weight: f64) -> Self {
        Self { color, weight, opacity: None, fill_color: None, fill_opacity: None, radius: None }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircleMarker {
    pub center: LatLng,
    pub style: PathStyle,
    /// Popup HTML, shown on click.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayKind {
    /// Individually styled point markers.
    Markers { markers: Vec<CircleMarker> },
    /// Lines sharing a single style.
    Lines { style: PathStyle, lines: Vec<Vec<LatLng>> },
}

/// An independently toggleable layer drawn above the base layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overlay {
    #[serde(flatten)]
    pub kind: OverlayKind,
}

impl Overlay {
    pub fn markers(markers: Vec<CircleMarker>) -> Self {
        Self { kind: OverlayKind::Markers { markers } }
    }

    pub fn lines(style: PathStyle, lines: Vec<Vec<LatLng>>) -> Self {
        Self { kind: OverlayKind::Lines { style, lines } }
    }

    /// Number of drawn elements (markers or lines).
    pub fn len(&self) -> usize {
        match &self.kind {
            OverlayKind::Markers { markers } => markers.len(),
            OverlayKind::Lines { lines, .. } => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
