//! Turning parsed features into styled map overlays.

use crate::{
    feed::{PlateCollection, Quake, SeismicCollection},
    map::{CircleMarker, LatLng, Overlay, PathStyle},
    style::{color_for_depth, radius_for_magnitude, OUTLINE, PLATE_LINE},
};

/// Marker style for a single event.
pub fn quake_style(quake: &Quake) -> PathStyle {
    PathStyle {
        color: OUTLINE,
        weight: 1.0,
        opacity: Some(1.0),
        fill_color: Some(color_for_depth(quake.depth)),
        fill_opacity: Some(0.8),
        // A null magnitude scales to 0; only a literal 0 gets the minimum radius.
        radius: Some(quake.magnitude.map_or(0.0, radius_for_magnitude)),
    }
}

/// "Magnitude: {mag}<br>Location: {place}", with `null` for a missing property.
///
/// The place is not copied verbatim: `&` and `<` are escaped so feed text
/// cannot open tags in the popup. Leaflet displays it the same way.
pub fn popup_text(quake: &Quake) -> String {
    let magnitude = quake.magnitude.map_or_else(|| "null".to_string(), js_number);
    let place = quake.place.as_deref().map_or_else(|| "null".to_string(), escape_html);
    format!("Magnitude: {magnitude}<br>Location: {place}")
}

pub fn quake_marker(quake: &Quake) -> CircleMarker {
    CircleMarker {
        center: [quake.epicenter.y(), quake.epicenter.x()],
        style: quake_style(quake),
        popup: Some(popup_text(quake)),
    }
}

/// One circle marker per event, in feed order.
pub fn seismic_overlay(collection: &SeismicCollection) -> Overlay {
    Overlay::markers(collection.quakes.iter().map(quake_marker).collect())
}

/// All boundary lines, drawn in one uniform style.
pub fn plates_overlay(collection: &PlateCollection) -> Overlay {
    let lines = collection.boundaries.iter()
        .flat_map(|boundary| boundary.lines.0.iter())
        .map(|line| line.0.iter().map(|c| [c.y, c.x]).collect::<Vec<LatLng>>())
        .collect();
    Overlay::lines(PathStyle::stroke(PLATE_LINE, 2.0), lines)
}

/// Print whole numbers without a fraction (`5`, not `5.0`) and `-0` as `0`.
///
/// Everything else is Rust's `Display`, which never switches to exponent
/// notation the way a browser does past `1e21` or below `1e-6`.
pub(crate) fn js_number(x: f64) -> String {
    if x == 0.0 { return "0".into() } // also -0
    if x.is_infinite() { return if x > 0.0 { "Infinity".into() } else { "-Infinity".into() } }
    x.to_string()
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}
