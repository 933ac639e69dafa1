//! Host chart surface: plot-area layout, camera, and candle rendering.
//!
//! The overlay engine only consumes [`ChartSurface`] (the plot rectangle in
//! window pixels) from this module; everything else here is declarative
//! rendering of the fetched candle series.

use bevy::camera::visibility::RenderLayers;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::constants::{
    CANDLE_BODY_FRACTION, CHART_MARGIN, HEADER_HEIGHT, PRICE_AXIS_WIDTH, TOOLBAR_WIDTH,
};
use crate::market::{CandleSeries, LivePrice};
use crate::overlay::mapper;
use crate::theme;

/// Gizmo group for the candle series and chart frame
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ChartGizmoGroup;

#[derive(Component)]
pub struct ChartCamera;

/// The chart's plot rectangle in window pixels (origin at top-left of the
/// window, y down). Overlay tools store shapes relative to `origin`.
///
/// `ready` is false until the first layout pass; callers must no-op rather
/// than map coordinates against a zero-sized surface.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct ChartSurface {
    /// Window-pixel position of the plot area's top-left corner
    pub origin: Vec2,
    /// Plot area size in pixels
    pub size: Vec2,
    /// Current window size, cached for world-space conversion
    pub window_size: Vec2,
    pub ready: bool,
}

impl ChartSurface {
    /// Whether a window-pixel position lies inside the plot area.
    pub fn contains(&self, cursor: Vec2) -> bool {
        self.ready
            && cursor.x >= self.origin.x
            && cursor.y >= self.origin.y
            && cursor.x <= self.origin.x + self.size.x
            && cursor.y <= self.origin.y + self.size.y
    }

    /// Convert a chart-local point to Bevy world coordinates for gizmos.
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        let px = self.origin + local;
        Vec2::new(
            px.x - self.window_size.x / 2.0,
            self.window_size.y / 2.0 - px.y,
        )
    }

    /// Convert a chart-local point to egui screen coordinates.
    pub fn to_screen(&self, local: Vec2) -> egui::Pos2 {
        let px = self.origin + local;
        egui::pos2(px.x, px.y)
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        ChartCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
        RenderLayers::layer(0),
    ));
}

pub fn configure_chart_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<ChartGizmoGroup>();
    config.render_layers = RenderLayers::layer(0);
    config.line.width = 1.5;
}

/// Plot rectangle for a given window size: inset by the toolbar, header,
/// margins, and the price-axis gutter on the right.
fn plot_rect(window_size: Vec2) -> (Vec2, Vec2) {
    let origin = Vec2::new(TOOLBAR_WIDTH + CHART_MARGIN, HEADER_HEIGHT + CHART_MARGIN);
    let size =
        window_size - origin - Vec2::splat(CHART_MARGIN) - Vec2::new(PRICE_AXIS_WIDTH, 0.0);
    (origin, size)
}

/// Recompute the plot rectangle from the current window size.
pub fn layout_surface(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut surface: ResMut<ChartSurface>,
) {
    let Ok(window) = window_query.single() else {
        surface.ready = false;
        return;
    };

    let window_size = Vec2::new(window.width(), window.height());
    let (origin, size) = plot_rect(window_size);

    let changed = surface.origin != origin
        || surface.size != size
        || surface.window_size != window_size;
    if changed {
        surface.origin = origin;
        surface.size = size;
        surface.window_size = window_size;
        surface.ready = size.x > 0.0 && size.y > 0.0;
    }
}

/// Vertical extent used to scale candles: high/low of the whole series.
///
/// Note this is deliberately wider than the close-derived [`PriceRange`]
/// the overlay tools map against, matching the charting library's
/// high/low y-extents in the original layout.
fn render_extents(candles: &[crate::market::Candle]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for candle in candles {
        min = min.min(candle.low);
        max = max.max(candle.high);
    }
    (max > min).then_some((min, max))
}

/// Draw the chart frame and the candle series.
pub fn render_candles(
    mut gizmos: Gizmos<ChartGizmoGroup>,
    surface: Res<ChartSurface>,
    series: Res<CandleSeries>,
    live_price: Res<LivePrice>,
) {
    if !surface.ready {
        return;
    }

    // Plot-area frame
    let center = surface.to_world(surface.size / 2.0);
    gizmos.rect_2d(
        Isometry2d::from_translation(center),
        surface.size,
        theme::CHART_FRAME,
    );

    let Some((min, max)) = render_extents(&series.candles) else {
        return;
    };

    let count = series.candles.len();
    let slot = surface.size.x / count as f32;
    let half_body = slot * CANDLE_BODY_FRACTION / 2.0;

    for (i, candle) in series.candles.iter().enumerate() {
        let x = (i as f32 + 0.5) * slot;
        let color = if candle.close >= candle.open {
            theme::CANDLE_UP
        } else {
            theme::CANDLE_DOWN
        };

        let y = |price: f64| -> Option<f32> { mapper::y_from_price(price, surface.size.y, min, max) };
        let (Some(y_high), Some(y_low), Some(y_open), Some(y_close)) =
            (y(candle.high), y(candle.low), y(candle.open), y(candle.close))
        else {
            continue;
        };

        // Wick
        gizmos.line_2d(
            surface.to_world(Vec2::new(x, y_high)),
            surface.to_world(Vec2::new(x, y_low)),
            color,
        );

        // Body (outline; open/close may coincide on a doji)
        let body_center = surface.to_world(Vec2::new(x, (y_open + y_close) / 2.0));
        let body_height = (y_open - y_close).abs().max(1.0);
        gizmos.rect_2d(
            Isometry2d::from_translation(body_center),
            Vec2::new(half_body * 2.0, body_height),
            color,
        );
    }

    // Last-trade marker from the ticker poll
    if let Some(price) = live_price.price
        && let Some(y) = mapper::y_from_price(price, surface.size.y, min, max)
    {
        gizmos.line_2d(
            surface.to_world(Vec2::new(0.0, y)),
            surface.to_world(Vec2::new(surface.size.x, y)),
            theme::LAST_PRICE_LINE,
        );
    }
}

/// Price axis labels on the right edge of the plot area.
pub fn price_axis_ui(
    mut contexts: EguiContexts,
    surface: Res<ChartSurface>,
    series: Res<CandleSeries>,
) {
    if !surface.ready {
        return;
    }
    let Some((min, max)) = render_extents(&series.candles) else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    const AXIS_TICKS: usize = 5;
    const AXIS_LABEL_GAP: f32 = 6.0;
    for i in 0..=AXIS_TICKS {
        let t = i as f32 / AXIS_TICKS as f32;
        let price = max - (max - min) * t as f64;
        let pos =
            surface.to_screen(Vec2::new(surface.size.x + AXIS_LABEL_GAP, surface.size.y * t));

        egui::Area::new(egui::Id::new(("price_axis", i)))
            .fixed_pos(pos)
            .pivot(egui::Align2::LEFT_CENTER)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(format!("{:.2}", price)).size(11.0).weak());
            });
    }
}

pub struct ChartPlugin;

impl Plugin for ChartPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChartSurface>()
            .init_gizmo_group::<ChartGizmoGroup>()
            .add_systems(Startup, (spawn_camera, configure_chart_gizmos))
            .add_systems(Update, (layout_surface, render_candles).chain())
            .add_systems(EguiPrimaryContextPass, price_axis_ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_surface() -> ChartSurface {
        ChartSurface {
            origin: Vec2::new(72.0, 56.0),
            size: Vec2::new(800.0, 400.0),
            window_size: Vec2::new(1280.0, 800.0),
            ready: true,
        }
    }

    #[test]
    fn test_contains_is_gated_on_ready() {
        let mut surface = test_surface();
        let inside = Vec2::new(100.0, 100.0);
        assert!(surface.contains(inside));
        surface.ready = false;
        assert!(!surface.contains(inside));
    }

    #[test]
    fn test_contains_edges() {
        let surface = test_surface();
        assert!(surface.contains(surface.origin));
        assert!(surface.contains(surface.origin + surface.size));
        assert!(!surface.contains(surface.origin - Vec2::splat(1.0)));
        assert!(!surface.contains(surface.origin + surface.size + Vec2::splat(1.0)));
    }

    #[test]
    fn test_plot_rect_reserves_gutters() {
        let window = Vec2::new(1280.0, 800.0);
        let (origin, size) = plot_rect(window);

        assert_eq!(
            origin,
            Vec2::new(TOOLBAR_WIDTH + CHART_MARGIN, HEADER_HEIGHT + CHART_MARGIN)
        );
        // Right edge leaves room for the margin plus the price axis
        assert_eq!(
            origin.x + size.x,
            window.x - CHART_MARGIN - PRICE_AXIS_WIDTH
        );
        assert_eq!(origin.y + size.y, window.y - CHART_MARGIN);
    }

    #[test]
    fn test_to_world_flips_y() {
        let surface = test_surface();
        // Chart top-left in window px is (72, 56); world origin is window center
        let world = surface.to_world(Vec2::ZERO);
        assert_eq!(world, Vec2::new(72.0 - 640.0, 400.0 - 56.0));

        // Moving down in chart space moves down in world space (negative y)
        let lower = surface.to_world(Vec2::new(0.0, 10.0));
        assert!(lower.y < world.y);
    }
}
