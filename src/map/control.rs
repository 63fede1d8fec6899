use serde::Serialize;

use super::{layer::{BaseId, OverlayId}, legend::Legend};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Base layer and overlay names, in the order they were registered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerRegistry {
    base: Vec<(String, BaseId)>,
    overlays: Vec<(String, OverlayId)>,
}

impl LayerRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn register_base(&mut self, name: impl Into<String>, id: BaseId) {
        self.base.push((name.into(), id));
    }

    pub fn register_overlay(&mut self, name: impl Into<String>, id: OverlayId) {
        self.overlays.push((name.into(), id));
    }

    pub fn base(&self) -> &[(String, BaseId)] { &self.base }

    pub fn overlays(&self) -> &[(String, OverlayId)] { &self.overlays }

    /// Hand the finished registry over to a layer control.
    pub fn into_control(self) -> LayerControl {
        LayerControl { position: Position::TopRight, base: self.base, overlays: self.overlays }
    }
}

/// Toggle widget: exclusive choice among base layers, independent overlay switches.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerControl {
    pub position: Position,
    pub base: Vec<(String, BaseId)>,
    pub overlays: Vec<(String, OverlayId)>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Control {
    Legend(Legend),
    Layers(LayerControl),
}
