//! Pure geometry derivation for the overlay tools.
//!
//! Everything here works on chart-local pixel coordinates (y down) and is
//! computed fresh from a shape's anchor points at render time.

use bevy::prelude::*;

/// Fibonacci retracement levels, drawn top to bottom
pub const FIB_LEVELS: [f32; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Length of each arrowhead wing in pixels
pub const ARROW_SIZE: f32 = 10.0;

/// Angle between the shaft and each arrowhead wing
pub const ARROW_WING_ANGLE: f32 = std::f32::consts::PI / 6.0;

/// Channel rails sit at this fraction of the segment's vertical delta.
/// A fixed vertical offset, not a perpendicular one; kept for compatibility
/// with the original tool behavior.
pub const CHANNEL_RAIL_FRACTION: f32 = 0.3;

/// Euclidean length of a ruler segment in pixels.
pub fn ruler_distance(start: Vec2, end: Vec2) -> f32 {
    (end - start).length()
}

/// Ruler label text, e.g. `"5.00px"`.
pub fn ruler_label(start: Vec2, end: Vec2) -> String {
    format!("{:.2}px", ruler_distance(start, end))
}

pub fn midpoint(start: Vec2, end: Vec2) -> Vec2 {
    (start + end) / 2.0
}

/// Signed rectangle extents from an anchor pair: `(width, height)` may be
/// negative, recording the drag direction. Never normalized.
pub fn rect_signed_size(start: Vec2, end: Vec2) -> Vec2 {
    end - start
}

/// The two arrowhead wing endpoints for a shaft from `start` to `end`.
///
/// Each wing is `ARROW_SIZE` long and deviates by `ARROW_WING_ANGLE` from
/// the reversed shaft direction: `end - size * (cos, sin)(angle ± wing)`.
pub fn arrow_wings(start: Vec2, end: Vec2) -> [Vec2; 2] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let wing = |offset: f32| {
        let a = angle + offset;
        end - ARROW_SIZE * Vec2::new(a.cos(), a.sin())
    };
    [wing(-ARROW_WING_ANGLE), wing(ARROW_WING_ANGLE)]
}

/// The two channel rails: the main segment shifted vertically by
/// `∓ CHANNEL_RAIL_FRACTION * dy` (upper rail first in y-down space).
pub fn channel_rails(start: Vec2, end: Vec2) -> [(Vec2, Vec2); 2] {
    let offset = CHANNEL_RAIL_FRACTION * (end.y - start.y);
    let shift = |dy: f32| {
        (
            Vec2::new(start.x, start.y + dy),
            Vec2::new(end.x, end.y + dy),
        )
    };
    [shift(-offset), shift(offset)]
}

/// Horizontal Fibonacci level lines spanning `start.x..end.x`.
///
/// Levels interpolate the vertical interval `[min_y, max_y]` of the two
/// anchors: `y = min_y + (max_y - min_y) * level`.
pub fn fib_lines(start: Vec2, end: Vec2) -> [(Vec2, Vec2); 7] {
    let min_y = start.y.min(end.y);
    let max_y = start.y.max(end.y);
    FIB_LEVELS.map(|level| {
        let y = min_y + (max_y - min_y) * level;
        (Vec2::new(start.x, y), Vec2::new(end.x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruler_distance_three_four_five() {
        let d = ruler_distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
        assert_eq!(ruler_label(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), "5.00px");
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(
            midpoint(Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0)),
            Vec2::new(5.0, 10.0)
        );
    }

    #[test]
    fn test_rect_signed_size_preserves_drag_direction() {
        // Dragging up-left yields negative extents, not a normalized box
        let size = rect_signed_size(Vec2::new(100.0, 100.0), Vec2::new(40.0, 70.0));
        assert_eq!(size, Vec2::new(-60.0, -30.0));
    }

    #[test]
    fn test_arrow_wings_horizontal_shaft() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(10.0, 0.0);
        let [a, b] = arrow_wings(start, end);

        // Each wing endpoint is ARROW_SIZE from the tip
        assert!((a.distance(end) - ARROW_SIZE).abs() < 1e-4);
        assert!((b.distance(end) - ARROW_SIZE).abs() < 1e-4);

        // And deviates by exactly the wing angle from the reversed direction
        for wing in [a, b] {
            let back = (wing - end).normalize();
            let reversed = (start - end).normalize();
            let deviation = back.dot(reversed).clamp(-1.0, 1.0).acos();
            assert!((deviation - ARROW_WING_ANGLE).abs() < 1e-4);
        }

        // The two wings straddle the shaft
        assert!(a.y < 0.0 && b.y > 0.0 || a.y > 0.0 && b.y < 0.0);
    }

    #[test]
    fn test_channel_rails_fixed_vertical_offset() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(100.0, 50.0);
        let [(u0, u1), (l0, l1)] = channel_rails(start, end);

        // dy = 50, offset = 15: rails shift both endpoints by the same amount
        assert_eq!(u0, Vec2::new(0.0, -15.0));
        assert_eq!(u1, Vec2::new(100.0, 35.0));
        assert_eq!(l0, Vec2::new(0.0, 15.0));
        assert_eq!(l1, Vec2::new(100.0, 65.0));
    }

    #[test]
    fn test_channel_rails_collapse_on_horizontal_segment() {
        // Zero vertical delta: the "rails" coincide with the segment
        let [(u0, _), (l0, _)] =
            channel_rails(Vec2::new(0.0, 10.0), Vec2::new(50.0, 10.0));
        assert_eq!(u0.y, 10.0);
        assert_eq!(l0.y, 10.0);
    }

    #[test]
    fn test_fib_levels() {
        let lines = fib_lines(Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0));
        let ys: Vec<f32> = lines.iter().map(|(a, _)| a.y).collect();
        let expected = [0.0, 23.6, 38.2, 50.0, 61.8, 78.6, 100.0];
        assert_eq!(ys.len(), expected.len());
        for (y, e) in ys.iter().zip(expected.iter()) {
            assert!((y - e).abs() < 1e-3, "level {} != {}", y, e);
        }
    }

    #[test]
    fn test_fib_levels_orientation_independent() {
        // Dragging bottom-to-top spans the same vertical interval
        let down = fib_lines(Vec2::new(0.0, 0.0), Vec2::new(10.0, 100.0));
        let up = fib_lines(Vec2::new(0.0, 100.0), Vec2::new(10.0, 0.0));
        for (a, b) in down.iter().zip(up.iter()) {
            assert_eq!(a.0.y, b.0.y);
        }
    }
}
