use std::{path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const USGS_ALL_WEEK: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const PB2002_BOUNDARIES: &str = "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Background tile layer definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileLayerConfig {
    pub name: String,
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url: String,
    pub attribution: String,
}

/// Everything needed to build and populate a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Id of the DOM element the map mounts into.
    pub container: String,
    /// (lat, lon)
    pub center: [f64; 2],
    pub zoom: u8,
    /// The first entry is the initially active base layer.
    pub base_layers: Vec<TileLayerConfig>,
    /// URL or local path of the seismic GeoJSON feed.
    pub seismic_feed: String,
    /// URL or local path of the plate boundary GeoJSON feed.
    pub plates_feed: String,
    /// Per-fetch timeout in seconds. `None` waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container: "map".into(),
            center: [37.0902, -95.7129],
            zoom: 4,
            base_layers: vec![
                TileLayerConfig {
                    name: "Basemap".into(),
                    url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
                    attribution: r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#.into(),
                },
                TileLayerConfig {
                    name: "Street".into(),
                    url: "https://{s}.tile.stamen.com/toner/{z}/{x}/{y}.png".into(),
                    attribution: r#"&copy; <a href="https://stamen.com/">Stamen Design</a>"#.into(),
                },
            ],
            seismic_feed: USGS_ALL_WEEK.into(),
            plates_feed: PB2002_BOUNDARIES.into(),
            timeout_secs: None,
        }
    }
}

impl MapConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_layers.is_empty() { bail!("[config] at least one base layer is required") }
        if self.container.is_empty() { bail!("[config] container id must not be empty") }
        // Written unquoted into the page's CSS and id attribute.
        if !self.container.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            bail!("[config] container id {:?} may only use ASCII letters, digits, '-' and '_'", self.container);
        }

        let [lat, lon] = self.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            bail!("[config] center ({lat}, {lon}) is not a valid lat/lon pair");
        }

        for layer in &self.base_layers {
            for placeholder in ["{z}", "{x}", "{y}"] {
                if !layer.url.contains(placeholder) {
                    bail!("[config] tile layer {:?} url is missing {placeholder}", layer.name);
                }
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }
}
