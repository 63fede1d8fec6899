use serde::Serialize;

use super::{
    control::{Control, LayerControl},
    layer::{BaseId, LatLng, Overlay, OverlayId, TileLayer},
    legend::Legend,
};

/// The rendering surface: base layers, overlays and the controls attached to them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    container: String,
    center: LatLng,
    zoom: u8,
    base_layers: Vec<TileLayer>,
    active_base: Option<BaseId>,
    overlays: Vec<Overlay>,
    controls: Vec<Control>,
}

impl MapView {
    pub fn new(container: impl Into<String>, center: LatLng, zoom: u8) -> Self {
        Self {
            container: container.into(),
            center,
            zoom,
            base_layers: Vec::new(),
            active_base: None,
            overlays: Vec::new(),
            controls: Vec::new(),
        }
    }

    pub fn container(&self) -> &str { &self.container }

    pub fn center(&self) -> LatLng { self.center }

    pub fn zoom(&self) -> u8 { self.zoom }

    /// Add a base layer. The first one added becomes the active one.
    pub fn add_base_layer(&mut self, layer: TileLayer) -> BaseId {
        let id = BaseId(self.base_layers.len());
        self.base_layers.push(layer);
        self.active_base.get_or_insert(id);
        id
    }

    pub fn base_layers(&self) -> &[TileLayer] { &self.base_layers }

    pub fn active_base(&self) -> Option<&TileLayer> {
        self.active_base.map(|id| &self.base_layers[id.0])
    }

    pub fn add_overlay(&mut self, overlay: Overlay) -> OverlayId {
        self.overlays.push(overlay);
        OverlayId(self.overlays.len() - 1)
    }

    pub fn overlays(&self) -> &[Overlay] { &self.overlays }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> { self.overlays.get(id.0) }

    pub(crate) fn add_control(&mut self, control: Control) { self.controls.push(control) }

    pub fn controls(&self) -> &[Control] { &self.controls }

    pub fn legend(&self) -> Option<&Legend> {
        self.controls.iter().find_map(|c| match c {
            Control::Legend(legend) => Some(legend),
            _ => None,
        })
    }

    pub fn layer_control(&self) -> Option<&LayerControl> {
        self.controls.iter().find_map(|c| match c {
            Control::Layers(control) => Some(control),
            _ => None,
        })
    }
}
