//! Gizmo rendering for committed shapes and in-progress drafts.
//!
//! Committed shapes draw solid through [`OverlayGizmoGroup`]; the anchor
//! draft draws dashed in the draft color through [`DraftGizmoGroup`]. The
//! growing brush stroke is the exception: it renders solid from the first
//! sample, there is no draft look for it. All geometry is re-derived from
//! anchors every frame.

use bevy::camera::visibility::RenderLayers;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore, GizmoLineStyle};
use bevy::prelude::*;

use crate::chart::ChartSurface;
use crate::theme;

use super::brush::StrokeState;
use super::capture::CaptureState;
use super::geometry;
use super::shapes::{AnchorKind, AnchorShape, BrushStroke};

/// Gizmo group for committed overlay shapes
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct OverlayGizmoGroup;

/// Gizmo group for the dashed in-progress draft
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct DraftGizmoGroup;

pub fn configure_overlay_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<OverlayGizmoGroup>();
    config.render_layers = RenderLayers::layer(0);
    config.line.width = 2.0;

    let (config, _) = config_store.config_mut::<DraftGizmoGroup>();
    config.render_layers = RenderLayers::layer(0);
    config.line.width = 1.5;
    config.line.style = GizmoLineStyle::Dashed {
        gap_scale: 3.0,
        line_scale: 5.0,
    };
}

fn anchor_color(kind: AnchorKind) -> Color {
    match kind {
        AnchorKind::Line => theme::LINE_COLOR,
        AnchorKind::Rectangle => theme::RECTANGLE_COLOR,
        AnchorKind::Ruler => theme::RULER_COLOR,
        AnchorKind::Channel => theme::CHANNEL_COLOR,
        AnchorKind::Trendline => theme::TRENDLINE_COLOR,
        AnchorKind::Arrow => theme::ARROW_COLOR,
        AnchorKind::Fibonacci => theme::FIBONACCI_COLOR,
    }
}

/// Draw one anchor-pair shape; geometry is derived fresh from the anchors.
fn draw_anchor_shape<T: GizmoConfigGroup>(
    gizmos: &mut Gizmos<T>,
    surface: &ChartSurface,
    kind: AnchorKind,
    start: Vec2,
    end: Vec2,
    color: Color,
) {
    let line = |gizmos: &mut Gizmos<T>, a: Vec2, b: Vec2| {
        gizmos.line_2d(surface.to_world(a), surface.to_world(b), color);
    };

    match kind {
        AnchorKind::Line | AnchorKind::Trendline | AnchorKind::Ruler => {
            line(gizmos, start, end);
        }
        AnchorKind::Rectangle => {
            // Outline only; signed extents draw the same box either way
            let size = geometry::rect_signed_size(start, end);
            let center = surface.to_world(start + size / 2.0);
            gizmos.rect_2d(Isometry2d::from_translation(center), size.abs(), color);
        }
        AnchorKind::Channel => {
            line(gizmos, start, end);
            for (a, b) in geometry::channel_rails(start, end) {
                line(gizmos, a, b);
            }
        }
        AnchorKind::Arrow => {
            line(gizmos, start, end);
            for wing in geometry::arrow_wings(start, end) {
                line(gizmos, end, wing);
            }
        }
        AnchorKind::Fibonacci => {
            for (a, b) in geometry::fib_lines(start, end) {
                line(gizmos, a, b);
            }
        }
    }
}

fn draw_stroke<T: GizmoConfigGroup>(
    gizmos: &mut Gizmos<T>,
    surface: &ChartSurface,
    stroke: &BrushStroke,
) {
    for window in stroke.points.windows(2) {
        gizmos.line_2d(
            surface.to_world(window[0]),
            surface.to_world(window[1]),
            theme::BRUSH_COLOR,
        );
    }
}

/// Draw every committed shape plus the live brush stroke.
pub fn render_committed_shapes(
    mut gizmos: Gizmos<OverlayGizmoGroup>,
    surface: Res<ChartSurface>,
    anchors: Query<&AnchorShape>,
    strokes: Query<&BrushStroke>,
    live_stroke: Res<StrokeState>,
) {
    if !surface.ready {
        return;
    }

    for shape in anchors.iter() {
        draw_anchor_shape(
            &mut gizmos,
            &surface,
            shape.kind,
            shape.start,
            shape.end,
            anchor_color(shape.kind),
        );
    }

    for stroke in strokes.iter() {
        draw_stroke(&mut gizmos, &surface, stroke);
    }

    // The stroke in progress renders exactly like a committed one
    if let Some(stroke) = live_stroke.stroke() {
        draw_stroke(&mut gizmos, &surface, stroke);
    }
}

/// Draw the anchor draft dashed in the draft color.
pub fn render_draft(
    mut gizmos: Gizmos<DraftGizmoGroup>,
    surface: Res<ChartSurface>,
    capture: Res<CaptureState>,
) {
    if !surface.ready {
        return;
    }
    if let Some(draft) = capture.draft() {
        draw_anchor_shape(
            &mut gizmos,
            &surface,
            draft.kind,
            draft.start,
            draft.end,
            theme::DRAFT_COLOR,
        );
    }
}
