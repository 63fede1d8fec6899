use std::io::Write;

use anyhow::Result;
use geo::{Coord, Rect};

use crate::map::LatLng;

/// Equirectangular lon/lat -> SVG (x, y) mapping for a fixed canvas.
pub(crate) struct Projection {
    bounds: Rect<f64>,
    margin: f64,
    scale: f64,
}

impl Projection {
    /// Fit `bounds` into a canvas `width` wide, keeping degrees square.
    pub(crate) fn fit(bounds: Rect<f64>, width: f64, margin: f64) -> Self {
        let scale = (width - 2.0 * margin) / bounds.width();
        Self { bounds, margin, scale }
    }

    pub(crate) fn bounds(&self) -> &Rect<f64> { &self.bounds }

    pub(crate) fn margin(&self) -> f64 { self.margin }

    pub(crate) fn scale(&self) -> f64 { self.scale }

    pub(crate) fn width(&self) -> f64 { self.bounds.width() * self.scale + 2.0 * self.margin }

    pub(crate) fn height(&self) -> f64 { self.bounds.height() * self.scale + 2.0 * self.margin }

    pub(crate) fn project(&self, coord: Coord<f64>) -> (f64, f64) {
        let x = self.margin + (coord.x - self.bounds.min().x) * self.scale;
        let y = self.margin + (self.bounds.max().y - coord.y) * self.scale;
        (x, y)
    }

    pub(crate) fn project_latlng(&self, [lat, lng]: LatLng) -> (f64, f64) {
        self.project(Coord { x: lng, y: lat })
    }
}

/// Append a line as an SVG subpath: "M x,y L x,y ..."
pub(crate) fn line_to_path(line: &[LatLng], proj: &Projection, out: &mut String) {
    let mut coords = line.iter().map(|&p| proj.project_latlng(p));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
    }
}

pub(crate) fn draw_lines(writer: &mut impl Write, lines: &[Vec<LatLng>], style: &str, proj: &Projection) -> Result<()> {
    for line in lines {
        let mut d = String::new();
        line_to_path(line, proj, &mut d);
        if d.is_empty() { continue }
        writeln!(writer, r#"<path class="line" d="{}" style="{style}"/>"#, d.trim_start())?;
    }
    Ok(())
}
