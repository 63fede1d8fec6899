//! Standalone Leaflet page for a map.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};

use crate::map::MapView;

use super::fs::PendingWrite;

const LEAFLET_VERSION: &str = "1.9.4";

/// Serialize the map for embedding in a `<script type="application/json">` block.
fn map_json(map: &MapView) -> Result<String> {
    let json = serde_json::to_string(map).context("[io::html] Failed to serialize map")?;
    // "</" would close the script element early; "<\/" is the same JSON string.
    Ok(json.replace("</", "<\\/"))
}

/// Write the HTML page to any writer (standalone function).
pub(crate) fn write_html_page<W: Write>(writer: &mut W, map: &MapView) -> Result<()> {
    writeln!(writer, r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Earthquakes and tectonic plates</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<style>
    html, body {{ height: 100%; margin: 0; padding: 0; }}
    #{container} {{ height: 100%; width: 100%; }}
    .info.legend {{ background-color: white; padding: 6px 8px; font-size: 12px; line-height: 18px; color: #555;
        border-radius: 5px; box-shadow: 0 0 5px rgba(0, 0, 0, 0.2); width: auto; min-width: 130px; }}
</style>
</head>
<body>
<div id="{container}"></div>
<script type="application/json" id="quakemap-data">{json}</script>
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>"##,
        container = map.container(),
        json = map_json(map)?,
    )?;
    writeln!(writer, "<script>\n{}</script>\n</body>\n</html>", PAGE_SCRIPT)?;
    Ok(())
}

/// Replays the embedded map document with Leaflet.
const PAGE_SCRIPT: &str = r#"(function () {
  const doc = JSON.parse(document.getElementById("quakemap-data").textContent);

  const baseLayers = doc.baseLayers.map(b => L.tileLayer(b.url, { attribution: b.attribution }));
  const map = L.map(doc.container, {
    center: doc.center,
    zoom: doc.zoom,
    layers: doc.activeBase === null ? [] : [baseLayers[doc.activeBase]]
  });

  const overlays = doc.overlays.map(o => {
    if (o.kind === "markers") {
      return L.layerGroup(o.markers.map(m => {
        const marker = L.circleMarker(m.center, m.style);
        if (m.popup) { marker.bindPopup(m.popup); }
        return marker;
      }));
    }
    return L.polyline(o.lines, o.style);
  });
  overlays.forEach(layer => layer.addTo(map));

  for (const control of doc.controls) {
    if (control.kind === "legend") {
      const legend = L.control({ position: control.position });
      legend.onAdd = function () {
        const div = L.DomUtil.create("div", "info legend");
        div.innerHTML = control.html;
        return div;
      };
      legend.addTo(map);
    } else if (control.kind === "layers") {
      const base = Object.fromEntries(control.base.map(([name, i]) => [name, baseLayers[i]]));
      const over = Object.fromEntries(control.overlays.map(([name, i]) => [name, overlays[i]]));
      L.control.layers(base, over, { position: control.position }).addTo(map);
    }
  }
})();
"#;

impl MapView {
    /// Render the map as a standalone HTML page.
    pub fn to_html_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        write_html_page(&mut buffer, self)?;
        String::from_utf8(buffer).context("[io::html] HTML output is not valid UTF-8")
    }

    /// Write the map as a standalone HTML page to `path`.
    pub fn to_html(&self, path: &Path, force: bool) -> Result<()> {
        let mut pending = PendingWrite::open(path, force)?;
        write_html_page(&mut pending, self)
            .with_context(|| format!("[io::html] Failed to write {}", path.display()))?;
        pending.finalize()
    }
}

#[cfg(test)]
mod tests {
    use crate::{map::{CircleMarker, Overlay, PathStyle}, style::OUTLINE};

    use super::*;

    #[test]
    fn embeds_map_document() {
        let mut map = MapView::new("map", [37.0902, -95.7129], 4);
        map.add_overlay(Overlay::markers(vec![CircleMarker {
            center: [1.0, 2.0],
            style: PathStyle::stroke(OUTLINE, 1.0),
            popup: Some("Magnitude: 1<br>Location: x</script><script>alert(1)".into()),
        }]));

        let html = map.to_html_string().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div id="map"></div>"#));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains(r#""center":[37.0902,-95.7129]"#));
        assert!(!html.contains("x</script><script>"));
        assert!(html.contains(r#"x<\/script><script>"#));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn embedded_json_round_trips() {
        let map = MapView::new("map", [0.0, 0.0], 2);
        let json = map_json(&map).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["zoom"], 2);
        assert!(value["activeBase"].is_null());
    }
}
