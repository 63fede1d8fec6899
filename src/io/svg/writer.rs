//! SVG writing operations.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use geo::{Coord, Rect};

use crate::{
    io::fs::PendingWrite,
    map::{CircleMarker, Legend, MapView, OverlayKind, PathStyle},
};

use super::proj::{draw_lines, Projection};

/// Write SVG header to any writer (standalone function).
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, proj: &Projection) -> Result<()> {
    let (width, height) = (proj.width(), proj.height());
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width}" height="{height}"
        viewBox="0 0 {width} {height}"
        data-lon-min="{lon_min}" data-lon-max="{lon_max}"
        data-lat-min="{lat_min}" data-lat-max="{lat_max}"
        data-margin="{margin}" data-scale="{scale}">"##,
        lon_min = proj.bounds().min().x,
        lon_max = proj.bounds().max().x,
        lat_min = proj.bounds().min().y,
        lat_max = proj.bounds().max().y,
        margin = proj.margin(),
        scale = proj.scale(),
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write SVG styles to any writer (standalone function).
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .line {{ fill: none; vector-effect: non-scaling-stroke; }}
    .legend {{ font: 12px sans-serif; fill: #555; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write SVG footer to any writer (standalone function).
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

fn stroke_style(style: &PathStyle) -> String {
    let mut out = format!("stroke:{};stroke-width:{}", style.color, style.weight);
    if let Some(opacity) = style.opacity { out.push_str(&format!(";stroke-opacity:{opacity}")) }
    out
}

fn draw_markers(writer: &mut impl Write, markers: &[CircleMarker], proj: &Projection) -> Result<()> {
    for marker in markers {
        let (x, y) = proj.project_latlng(marker.center);
        let style = &marker.style;
        // A negative radius has no SVG meaning; draw its magnitude.
        let r = style.radius.unwrap_or(10.0).abs();
        let fill = style.fill_color.map_or("none", |c| c.as_str());
        let fill_opacity = style.fill_opacity.unwrap_or(0.2);
        write!(writer, r#"<circle cx="{x:.3}" cy="{y:.3}" r="{r}" style="{};fill:{fill};fill-opacity:{fill_opacity}">"#, stroke_style(style))?;
        if let Some(popup) = &marker.popup {
            write!(writer, "<title>{}</title>", popup.replace("<br>", "\n"))?;
        }
        writeln!(writer, "</circle>")?;
    }
    Ok(())
}

/// Legend box anchored to the bottom-right corner.
fn draw_legend(writer: &mut impl Write, legend: &Legend, proj: &Projection) -> Result<()> {
    const ROW: f64 = 18.0;
    const BOX_WIDTH: f64 = 130.0;

    let box_height = ROW * legend.entries.len() as f64 + 12.0;
    let x0 = proj.width() - proj.margin() - BOX_WIDTH - 10.0;
    let y0 = proj.height() - proj.margin() - box_height - 10.0;

    writeln!(writer, r#"<g class="legend">"#)?;
    writeln!(writer, r##"<rect x="{x0:.1}" y="{y0:.1}" width="{BOX_WIDTH}" height="{box_height:.1}" rx="5" fill="#ffffff" stroke="#cccccc"/>"##)?;
    for (i, entry) in legend.entries.iter().enumerate() {
        let y = y0 + 6.0 + ROW * i as f64;
        writeln!(writer, r#"<rect x="{:.1}" y="{:.1}" width="15" height="15" rx="3" fill="{}"/>"#, x0 + 8.0, y + 1.5, entry.color)?;
        writeln!(writer, r#"<text x="{:.1}" y="{:.1}">{}</text>"#, x0 + 31.0, y + 13.0, entry.label())?;
    }
    writeln!(writer, "</g>")?;
    Ok(())
}

/// Draw the overlays (in order) and the legend onto a world-extent canvas.
pub(crate) fn write_svg_map<W: Write>(writer: &mut W, map: &MapView, width: f64) -> Result<()> {
    let world = Rect::new(Coord { x: -180.0, y: -90.0 }, Coord { x: 180.0, y: 90.0 });
    let proj = Projection::fit(world, width, 8.0);

    write_svg_header(writer, &proj)?;
    write_svg_styles(writer)?;

    for overlay in map.overlays() {
        match &overlay.kind {
            OverlayKind::Markers { markers } => draw_markers(writer, markers, &proj)?,
            OverlayKind::Lines { style, lines } => draw_lines(writer, lines, &stroke_style(style), &proj)?,
        }
    }

    if let Some(legend) = map.legend() {
        draw_legend(writer, legend, &proj)?;
    }

    write_svg_footer(writer)
}

impl MapView {
    /// Render a static world-extent snapshot (no tiles) as an SVG string.
    pub fn to_svg_string(&self, width: u32) -> Result<String> {
        let mut buffer = Vec::new();
        write_svg_map(&mut buffer, self, width as f64)?;
        String::from_utf8(buffer).context("[io::svg] SVG output is not valid UTF-8")
    }

    /// Write a static world-extent snapshot (no tiles) to `path`.
    pub fn to_svg(&self, path: &Path, width: u32, force: bool) -> Result<()> {
        let mut pending = PendingWrite::open(path, force)?;
        write_svg_map(&mut pending, self, width as f64)
            .with_context(|| format!("[io::svg] Failed to write {}", path.display()))?;
        pending.finalize()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        map::{build_legend, Overlay},
        style::{Color, OUTLINE, PLATE_LINE},
    };

    use super::*;

    fn marker(radius: f64) -> CircleMarker {
        CircleMarker {
            center: [0.0, 0.0],
            style: PathStyle {
                color: OUTLINE,
                weight: 1.0,
                opacity: Some(1.0),
                fill_color: Some(Color("#eecc00")),
                fill_opacity: Some(0.8),
                radius: Some(radius),
            },
            popup: Some("Magnitude: 4.5<br>Location: Here".into()),
        }
    }

    #[test]
    fn draws_markers_lines_and_legend() {
        let mut map = MapView::new("map", [0.0, 0.0], 2);
        map.add_overlay(Overlay::markers(vec![marker(18.0)]));
        map.add_overlay(Overlay::lines(PathStyle::stroke(PLATE_LINE, 2.0), vec![vec![[0.0, 0.0], [10.0, 10.0]]]));
        map.add_control(crate::map::Control::Legend(build_legend()));

        let svg = map.to_svg_string(736).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"<circle cx="368.000" cy="188.000" r="18""#));
        assert!(svg.contains("fill:#eecc00;fill-opacity:0.8"));
        assert!(svg.contains("<title>Magnitude: 4.5\nLocation: Here</title>"));
        assert!(svg.contains(r#"class="line" d="M368.000,188.000 L388.000,168.000" style="stroke:orange;stroke-width:2""#));
        assert!(svg.contains(">90+</text>"));
        assert!(svg.contains(">0–10</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn every_overlay_is_drawn_without_legend_control() {
        let mut map = MapView::new("map", [0.0, 0.0], 2);
        map.add_overlay(Overlay::markers(vec![marker(4.0), marker(8.0)]));
        map.add_overlay(Overlay::lines(PathStyle::stroke(PLATE_LINE, 2.0), vec![vec![[0.0, 0.0], [1.0, 1.0]]]));

        let svg = map.to_svg_string(736).unwrap();
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches(r#"class="line""#).count(), 1);
        assert!(!svg.contains(r#"class="legend""#));
    }

    #[test]
    fn negative_radius_is_drawn_by_magnitude() {
        let mut map = MapView::new("map", [0.0, 0.0], 2);
        map.add_overlay(Overlay::markers(vec![marker(-8.0)]));
        let svg = map.to_svg_string(736).unwrap();
        assert!(svg.contains(r#"r="8""#));
    }
}
