//! Depth and magnitude classification for earthquake markers.

use std::fmt;

use serde::Serialize;

/// CSS color literal, as handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub &'static str);

impl Color {
    pub fn as_str(&self) -> &'static str { self.0 }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.0) }
}

/// Marker outline color.
pub const OUTLINE: Color = Color("#000000");

/// Stroke color of plate boundary lines.
pub const PLATE_LINE: Color = Color("orange");

/// (upper bound, color), upper bounds inclusive and strictly increasing.
/// Anything past the last bound (or NaN) falls into [`DEEPEST`].
const DEPTH_BREAKS: &[(f64, Color)] = &[
    (10.0, Color("#98ee00")),
    (30.0, Color("#d4ee00")),
    (50.0, Color("#eecc00")),
    (70.0, Color("#ee9c00")),
    (90.0, Color("#ea822c")),
];

const DEEPEST: Color = Color("#ea2c2c");

/// Lower bounds of the depth buckets, as shown in the legend.
pub const DEPTH_INTERVALS: [f64; 6] = [0.0, 10.0, 30.0, 50.0, 70.0, 90.0];

/// Bucket colors, shallowest first. Index-aligned with [`DEPTH_INTERVALS`].
pub const DEPTH_COLORS: [Color; 6] = [
    Color("#98ee00"),
    Color("#d4ee00"),
    Color("#eecc00"),
    Color("#ee9c00"),
    Color("#ea822c"),
    DEEPEST,
];

/// Fill color for an event at `depth` km.
///
/// Bucket upper bounds are inclusive, so `10.0` is still the shallowest color.
/// Negative depths (events above the datum) are not special-cased and land in
/// the shallowest bucket.
pub fn color_for_depth(depth: f64) -> Color {
    for &(upper, color) in DEPTH_BREAKS {
        if depth <= upper { return color }
    }
    DEEPEST
}

/// Marker radius for an event of the given magnitude.
///
/// Zero maps to 1 so the marker stays visible. Negative magnitudes are passed
/// through and yield a negative radius.
pub fn radius_for_magnitude(magnitude: f64) -> f64 {
    if magnitude == 0.0 { return 1.0 }
    magnitude * 4.0
}

/// Index of the depth bucket `depth` falls into, shallowest = 0.
pub fn depth_bucket(depth: f64) -> usize {
    DEPTH_BREAKS.iter()
        .position(|&(upper, _)| depth <= upper)
        .unwrap_or(DEPTH_BREAKS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_are_inclusive() {
        assert_eq!(color_for_depth(0.0).as_str(), "#98ee00");
        assert_eq!(color_for_depth(10.0).as_str(), "#98ee00");
        assert_eq!(color_for_depth(10.01).as_str(), "#d4ee00");
        assert_eq!(color_for_depth(30.0).as_str(), "#d4ee00");
        assert_eq!(color_for_depth(45.0).as_str(), "#eecc00");
        assert_eq!(color_for_depth(70.0).as_str(), "#ee9c00");
        assert_eq!(color_for_depth(90.0).as_str(), "#ea822c");
        assert_eq!(color_for_depth(90.5).as_str(), "#ea2c2c");
        assert_eq!(color_for_depth(650.0).as_str(), "#ea2c2c");
    }

    #[test]
    fn negative_depth_is_shallow() {
        assert_eq!(color_for_depth(-3.2), DEPTH_COLORS[0]);
        assert_eq!(color_for_depth(f64::NEG_INFINITY), DEPTH_COLORS[0]);
    }

    #[test]
    fn nan_depth_is_deepest() {
        assert_eq!(color_for_depth(f64::NAN), DEEPEST);
    }

    #[test]
    fn colors_follow_bucket_order() {
        let depths = [-5.0, 0.0, 5.0, 10.0, 12.0, 29.9, 31.0, 50.0, 55.0, 71.0, 89.0, 91.0, 300.0];
        let mut last = 0;
        for depth in depths {
            let bucket = depth_bucket(depth);
            assert!(bucket >= last, "bucket went backwards at depth {depth}");
            assert_eq!(color_for_depth(depth), DEPTH_COLORS[bucket]);
            last = bucket;
        }
    }

    #[test]
    fn legend_table_matches_classifier() {
        // The lower bound of each bucket after the first is the previous bucket's upper bound.
        for (i, &lower) in DEPTH_INTERVALS.iter().enumerate().skip(1) {
            assert_eq!(color_for_depth(lower), DEPTH_COLORS[i - 1]);
            assert_eq!(color_for_depth(lower + 0.001), DEPTH_COLORS[i]);
        }
    }

    #[test]
    fn radius_scales_magnitude() {
        assert_eq!(radius_for_magnitude(0.0), 1.0);
        assert_eq!(radius_for_magnitude(5.0), 20.0);
        assert_eq!(radius_for_magnitude(4.5), 18.0);
        assert_eq!(radius_for_magnitude(-2.0), -8.0);
    }
}
