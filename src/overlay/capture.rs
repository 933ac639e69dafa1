//! Generic anchor-pair capture: one state machine shared by the seven
//! two-point tools (line, rectangle, ruler, channel, trendline, arrow,
//! Fibonacci).
//!
//! The machine cycles Idle → Capturing → Idle indefinitely. A press inside
//! the chart starts a draft with both anchors at the cursor; every move
//! updates the draft's end anchor (tracking continues outside the plot
//! rectangle); release commits a snapshot entity and clears the draft.
//! A release with no draft is a no-op, and switching tools mid-capture
//! abandons the draft without committing anything.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::tools::{ActiveTool, ChartTool};

use super::params::{is_cursor_over_ui, PointerParams};
use super::shapes::{AnchorKind, AnchorShape, OverlayShape};

/// Map a tool to its anchor-pair geometry family; `None` for the tools that
/// capture input some other way (brush, markers, stamps).
pub fn anchor_kind_for(tool: ChartTool) -> Option<AnchorKind> {
    match tool {
        ChartTool::Line => Some(AnchorKind::Line),
        ChartTool::Rectangle => Some(AnchorKind::Rectangle),
        ChartTool::Ruler => Some(AnchorKind::Ruler),
        ChartTool::Channel => Some(AnchorKind::Channel),
        ChartTool::Trendline => Some(AnchorKind::Trendline),
        ChartTool::Arrow => Some(AnchorKind::Arrow),
        ChartTool::Fibonacci => Some(AnchorKind::Fibonacci),
        ChartTool::Brush
        | ChartTool::Annotation
        | ChartTool::Emoji
        | ChartTool::PriceLabel
        | ChartTool::CustomNotes => None,
    }
}

/// The in-progress anchor pair. Never stored alongside committed shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorDraft {
    pub kind: AnchorKind,
    pub start: Vec2,
    pub end: Vec2,
}

/// Capture lifecycle state: `draft` is `Some` exactly while Capturing.
#[derive(Resource, Default)]
pub struct CaptureState {
    draft: Option<AnchorDraft>,
}

impl CaptureState {
    pub fn is_capturing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&AnchorDraft> {
        self.draft.as_ref()
    }

    /// Idle → Capturing: both anchors start at the press point.
    pub fn begin(&mut self, kind: AnchorKind, point: Vec2) {
        self.draft = Some(AnchorDraft {
            kind,
            start: point,
            end: point,
        });
    }

    /// Update the end anchor; ignored while Idle.
    pub fn update(&mut self, point: Vec2) {
        if let Some(draft) = self.draft.as_mut() {
            draft.end = point;
        }
    }

    /// Capturing → Idle, returning the committed snapshot.
    /// Returns `None` (and stays Idle) when no capture was in progress.
    pub fn commit(&mut self) -> Option<AnchorDraft> {
        self.draft.take()
    }

    /// Abandon the draft without committing.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

/// Pointer routing for the seven anchor-pair tools.
pub fn handle_anchor_capture(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    active_tool: Res<ActiveTool>,
    mut capture: ResMut<CaptureState>,
    pointer: PointerParams,
    mut contexts: EguiContexts,
) {
    let Some(kind) = active_tool.current.and_then(anchor_kind_for) else {
        // Switched to a non-anchor tool: abandon any draft, commit nothing
        if capture.is_capturing() {
            capture.cancel();
        }
        return;
    };

    // Release ends the capture even when the cursor has left the window
    if mouse_button.just_released(MouseButton::Left) {
        if let Some(draft) = capture.commit() {
            commands.spawn((
                OverlayShape { tool: draft.kind.tool() },
                AnchorShape {
                    kind: draft.kind,
                    start: draft.start,
                    end: draft.end,
                },
            ));
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
        if !capture.is_capturing() && pointer.cursor_in_chart() {
            capture.begin(kind, local);
        }
    } else if mouse_button.pressed(MouseButton::Left) && capture.is_capturing() {
        capture.update(local);
    }
}
