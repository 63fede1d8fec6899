use serde::Serialize;

use crate::style::{Color, DEPTH_COLORS, DEPTH_INTERVALS};

use super::control::Position;

/// One depth bucket as shown in the legend.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: Color,
    pub lower: f64,
    /// `None` for the open-ended last bucket.
    pub upper: Option<f64>,
}

impl LegendEntry {
    /// Plain-text range, e.g. "10–30" or "90+".
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}\u{2013}{}", self.lower, upper),
            None => format!("{}+", self.lower),
        }
    }

    /// Range as an HTML fragment.
    fn html_label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}&ndash;{}", self.lower, upper),
            None => format!("{}+", self.lower),
        }
    }
}

/// Depth legend control.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub position: Position,
    pub entries: Vec<LegendEntry>,
    /// Inner HTML of the legend box.
    pub html: String,
}

/// Legend entries for the fixed depth buckets, shallowest first.
pub fn legend_entries() -> Vec<LegendEntry> {
    DEPTH_INTERVALS.iter().zip(DEPTH_COLORS).enumerate()
        .map(|(i, (&lower, color))| LegendEntry { color, lower, upper: DEPTH_INTERVALS.get(i + 1).copied() })
        .collect()
}

/// One line per entry: a colored square followed by the depth range.
pub fn legend_html(entries: &[LegendEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            r#"<i style="background-color:{};width:15px;height:15px;margin-right:8px;border-radius:3px;display:inline-block;vertical-align:middle"></i> {}<br>"#,
            entry.color, entry.html_label(),
        ));
    }
    out
}

pub fn build_legend() -> Legend {
    let entries = legend_entries();
    let html = legend_html(&entries);
    Legend { position: Position::BottomRight, entries, html }
}
