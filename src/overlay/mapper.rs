//! Pure coordinate mapping between window pixels, chart-local pixels, and
//! the price domain.
//!
//! All functions are stateless; callers re-derive results whenever the chart
//! surface or price range changes. Every mapping returns `None` instead of
//! computing against missing geometry or a degenerate price range.

use bevy::prelude::*;

use crate::chart::ChartSurface;

/// Convert a window-pixel cursor position to chart-local coordinates
/// (origin at the plot area's top-left, y down).
///
/// Returns `None` while the surface has no geometry yet. The result is
/// deliberately not clamped to the plot rectangle: an in-progress drag may
/// leave the chart and still track the pointer.
pub fn cursor_to_chart(cursor: Vec2, surface: &ChartSurface) -> Option<Vec2> {
    if !surface.ready {
        return None;
    }
    Some(cursor - surface.origin)
}

/// Linear y-to-price interpolation over the chart height.
///
/// `price = max - (y / height) * (max - min)`; y = 0 maps to `max`.
/// Returns `None` for a non-positive height or price span.
pub fn price_from_y(y: f32, height: f32, min: f64, max: f64) -> Option<f64> {
    if height <= 0.0 || max <= min {
        return None;
    }
    Some(max - (y as f64 / height as f64) * (max - min))
}

/// Inverse of [`price_from_y`], used by the candle renderer.
pub fn y_from_price(price: f64, height: f32, min: f64, max: f64) -> Option<f32> {
    if height <= 0.0 || max <= min {
        return None;
    }
    Some((((max - price) / (max - min)) * height as f64) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSurface;

    fn surface(ready: bool) -> ChartSurface {
        ChartSurface {
            origin: Vec2::new(72.0, 56.0),
            size: Vec2::new(800.0, 400.0),
            window_size: Vec2::new(1280.0, 800.0),
            ready,
        }
    }

    #[test]
    fn test_cursor_to_chart_subtracts_origin() {
        let local = cursor_to_chart(Vec2::new(172.0, 156.0), &surface(true)).unwrap();
        assert_eq!(local, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_cursor_to_chart_requires_geometry() {
        // Host not laid out yet: mapping is skipped, caller must no-op
        assert!(cursor_to_chart(Vec2::new(100.0, 100.0), &surface(false)).is_none());
    }

    #[test]
    fn test_price_from_y_interpolates() {
        // Top of the chart is the max price, bottom the min
        assert_eq!(price_from_y(0.0, 400.0, 100.0, 200.0), Some(200.0));
        assert_eq!(price_from_y(400.0, 400.0, 100.0, 200.0), Some(100.0));
        assert_eq!(price_from_y(100.0, 400.0, 100.0, 200.0), Some(175.0));
    }

    #[test]
    fn test_price_from_y_refuses_zero_range() {
        assert_eq!(price_from_y(50.0, 400.0, 100.0, 100.0), None);
        assert_eq!(price_from_y(50.0, 0.0, 100.0, 200.0), None);
    }

    #[test]
    fn test_y_from_price_round_trip() {
        let y = y_from_price(175.0, 400.0, 100.0, 200.0).unwrap();
        assert_eq!(y, 100.0);
        let price = price_from_y(y, 400.0, 100.0, 200.0).unwrap();
        assert!((price - 175.0).abs() < 1e-9);
    }
}
