//! Typed views of the seismic and plate boundary GeoJSON feeds.

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiLineString, Point};
use serde_json::Value;

/// A single seismic event.
#[derive(Clone, Debug, PartialEq)]
pub struct Quake {
    /// Epicenter, x = longitude, y = latitude.
    pub epicenter: Point<f64>,
    /// Hypocenter depth in km (third GeoJSON coordinate).
    pub depth: f64,
    pub magnitude: Option<f64>,
    pub place: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeismicCollection {
    pub quakes: Vec<Quake>,
}

/// A plate boundary segment, possibly split into several lines.
#[derive(Clone, Debug, PartialEq)]
pub struct PlateBoundary {
    pub lines: MultiLineString<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlateCollection {
    pub boundaries: Vec<PlateBoundary>,
}

impl SeismicCollection {
    pub fn len(&self) -> usize { self.quakes.len() }

    pub fn is_empty(&self) -> bool { self.quakes.is_empty() }

    /// Parse a seismic FeatureCollection.
    /// Any feature without a point geometry of at least three numeric coordinates fails the whole collection.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).context("[geojson] Failed to parse seismic feed")?;

        let quakes = features(&value)?.iter().enumerate()
            .map(|(i, feature)| parse_quake(feature).with_context(|| format!("[geojson] seismic feature {i}")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { quakes })
    }
}

impl PlateCollection {
    pub fn len(&self) -> usize { self.boundaries.len() }

    pub fn is_empty(&self) -> bool { self.boundaries.is_empty() }

    /// Parse a plate boundary FeatureCollection.
    /// Only LineString and MultiLineString geometries are kept.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).context("[geojson] Failed to parse plate feed")?;

        let mut boundaries = Vec::new();
        for (i, feature) in features(&value)?.iter().enumerate() {
            let geometry = &feature["geometry"];
            let coords = geometry["coordinates"].as_array();
            let lines = match (geometry["type"].as_str(), coords) {
                (Some("LineString"), Some(coords)) => MultiLineString(vec![parse_line_coords(coords)?]),
                (Some("MultiLineString"), Some(coords)) => MultiLineString(
                    coords.iter()
                        .map(|line| line.as_array()
                            .ok_or_else(|| anyhow!("[geojson] plate feature {i}: line is not an array"))
                            .and_then(|line| parse_line_coords(line)))
                        .collect::<Result<Vec<_>>>()?
                ),
                (ty, _) => {
                    tracing::debug!("[geojson] skipping plate feature {i} with geometry {:?}", ty);
                    continue;
                }
            };
            boundaries.push(PlateBoundary { lines });
        }

        Ok(Self { boundaries })
    }
}

fn features(value: &Value) -> Result<&Vec<Value>> {
    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("[geojson] expected a FeatureCollection");
    }
    value["features"].as_array()
        .ok_or_else(|| anyhow!("[geojson] FeatureCollection has no features array"))
}

fn parse_quake(feature: &Value) -> Result<Quake> {
    let geometry = feature["geometry"].as_object()
        .ok_or_else(|| anyhow!("missing geometry"))?;
    if geometry.get("type").and_then(Value::as_str) != Some("Point") {
        bail!("geometry is not a Point");
    }

    let coords = geometry.get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("Point has no coordinates"))?;
    if coords.len() < 3 { bail!("Point has {} coordinates, expected lon, lat, depth", coords.len()) }

    let number = |i: usize| coords[i].as_f64()
        .ok_or_else(|| anyhow!("coordinate {i} must be a number"));

    let properties = &feature["properties"];
    Ok(Quake {
        epicenter: Point::new(number(0)?, number(1)?),
        depth: number(2)?,
        magnitude: properties["mag"].as_f64(),
        place: properties["place"].as_str().map(str::to_string),
    })
}

/// Parse a line from GeoJSON coordinates.
/// Format: [[x, y], [x, y], ...], extra ordinates are ignored.
fn parse_line_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for coord_pair in coords {
        let coord_array = coord_pair.as_array()
            .filter(|a| a.len() >= 2)
            .ok_or_else(|| anyhow!("[geojson] Invalid coordinate: expected [x, y]"))?;
        let x = coord_array[0].as_f64()
            .ok_or_else(|| anyhow!("[geojson] Invalid coordinate: x must be a number"))?;
        let y = coord_array[1].as_f64()
            .ok_or_else(|| anyhow!("[geojson] Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    Ok(LineString(points))
}
