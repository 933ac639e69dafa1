//! Freehand brush capture.
//!
//! Unlike the anchor-pair tools, the brush accretes every cursor sample into
//! an ordered polyline while the button is held. The stroke under
//! construction lives in [`StrokeState`]; release moves it into the world as
//! a committed entity. A click with no movement commits a single-point
//! stroke, which renders as nothing.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::tools::{ActiveTool, ChartTool};

use super::params::{is_cursor_over_ui, PointerParams};
use super::shapes::{BrushStroke, OverlayShape};

/// The stroke currently being drawn, if any.
#[derive(Resource, Default)]
pub struct StrokeState {
    stroke: Option<BrushStroke>,
}

impl StrokeState {
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn stroke(&self) -> Option<&BrushStroke> {
        self.stroke.as_ref()
    }

    pub fn begin(&mut self, point: Vec2) {
        self.stroke = Some(BrushStroke::new(point));
    }

    pub fn append(&mut self, point: Vec2) {
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.append(point);
        }
    }

    pub fn commit(&mut self) -> Option<BrushStroke> {
        self.stroke.take()
    }

    pub fn cancel(&mut self) {
        self.stroke = None;
    }
}

pub fn handle_brush(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    active_tool: Res<ActiveTool>,
    mut strokes: ResMut<StrokeState>,
    pointer: PointerParams,
    mut contexts: EguiContexts,
) {
    if !active_tool.is(ChartTool::Brush) {
        if strokes.is_drawing() {
            strokes.cancel();
        }
        return;
    }

    // Commit on release regardless of where the cursor ended up
    if mouse_button.just_released(MouseButton::Left) {
        if let Some(stroke) = strokes.commit() {
            commands.spawn((OverlayShape { tool: ChartTool::Brush }, stroke));
        }
        return;
    }

    let Some(local) = pointer.chart_cursor() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        if is_cursor_over_ui(&mut contexts) {
            return;
        }
        if !strokes.is_drawing() && pointer.cursor_in_chart() {
            strokes.begin(local);
        }
    } else if mouse_button.pressed(MouseButton::Left) && strokes.is_drawing() {
        // Samples outside the plot rectangle still accrete
        strokes.append(local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_accretes_every_sample_in_order() {
        let mut state = StrokeState::default();
        state.begin(Vec2::new(0.0, 0.0));
        state.append(Vec2::new(1.0, 1.0));
        state.append(Vec2::new(2.0, 2.0));

        let stroke = state.commit().unwrap();
        assert_eq!(
            stroke.points,
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]
        );
        assert!(!state.is_drawing());
    }

    #[test]
    fn test_click_without_movement_commits_single_point() {
        let mut state = StrokeState::default();
        state.begin(Vec2::new(5.0, 5.0));
        let stroke = state.commit().unwrap();
        assert_eq!(stroke.points.len(), 1);
    }

    #[test]
    fn test_append_while_idle_is_ignored() {
        let mut state = StrokeState::default();
        state.append(Vec2::new(1.0, 1.0));
        assert!(state.commit().is_none());
    }

    #[test]
    fn test_cancel_discards_stroke() {
        let mut state = StrokeState::default();
        state.begin(Vec2::ZERO);
        state.append(Vec2::new(3.0, 3.0));
        state.cancel();
        assert!(state.commit().is_none());
    }
}
