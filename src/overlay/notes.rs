//! Annotation and custom-note markers.
//!
//! A click places a marker with an attached text input; each marker owns its
//! own edit buffer. Markers are moved by dragging their handle through the
//! egui response API, which keeps tracking the pointer for the whole drag
//! regardless of where it ends. Releasing a drag, or double-clicking the
//! handle, locks the marker into a plain rendered label.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::chart::ChartSurface;
use crate::theme;
use crate::tools::{ActiveTool, ChartTool};

use super::params::{is_cursor_over_ui, PointerParams};
use super::shapes::{NoteKind, NoteMarker, OverlayShape};

fn note_kind_for(tool: ChartTool) -> Option<NoteKind> {
    match tool {
        ChartTool::Annotation => Some(NoteKind::Annotation),
        ChartTool::CustomNotes => Some(NoteKind::CustomNote),
        _ => None,
    }
}

/// Place a new editable marker on a chart click.
///
/// Clicks on an existing marker land on its egui area and are swallowed by
/// the over-UI gate, so grabbing a marker never also places a new one.
pub fn handle_note_placement(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    active_tool: Res<ActiveTool>,
    pointer: PointerParams,
    mut contexts: EguiContexts,
) {
    let Some(kind) = active_tool.current.and_then(note_kind_for) else {
        return;
    };
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    if is_cursor_over_ui(&mut contexts) {
        return;
    }
    let Some(local) = pointer.chart_cursor() else {
        return;
    };
    if !pointer.cursor_in_chart() {
        return;
    }

    commands.spawn((
        OverlayShape { tool: kind.tool() },
        NoteMarker::place(kind, local),
    ));
    info!("Placed {} marker at {:?}", kind.tool().display_name(), local);
}

/// Per-marker egui surface: a drag handle plus either a text input (unsaved)
/// or a frozen label (saved).
pub fn note_marker_ui(
    mut contexts: EguiContexts,
    surface: Res<ChartSurface>,
    mut markers: Query<(Entity, &mut NoteMarker)>,
) {
    if !surface.ready {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    for (entity, mut marker) in markers.iter_mut() {
        let screen = surface.to_screen(marker.pos);
        let color = match marker.kind {
            NoteKind::Annotation => theme::ANNOTATION_TEXT,
            NoteKind::CustomNote => theme::NOTE_COLOR,
        };

        let mut drag_delta = egui::Vec2::ZERO;
        let mut lock = false;

        egui::Area::new(egui::Id::new(("note_marker", entity)))
            .fixed_pos(egui::pos2(screen.x, screen.y))
            .pivot(egui::Align2::LEFT_CENTER)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let handle = ui.add(
                        egui::Label::new(egui::RichText::new("\u{25cf}").color(color))
                            .sense(egui::Sense::click_and_drag()),
                    );
                    if handle.dragged() {
                        drag_delta = handle.drag_delta();
                    }
                    // Releasing a drag or double-clicking freezes the marker
                    if handle.drag_stopped() || handle.double_clicked() {
                        lock = true;
                    }

                    if marker.saved {
                        ui.label(egui::RichText::new(marker.text.as_str()).color(color));
                    } else {
                        // No forced focus: several unsaved markers may
                        // coexist, each keeps its own buffer
                        ui.add(
                            egui::TextEdit::singleline(&mut marker.text)
                                .hint_text("Note...")
                                .desired_width(120.0)
                                .font(egui::TextStyle::Body),
                        );
                    }
                });
            });

        if drag_delta != egui::Vec2::ZERO {
            // Delta-based move: no jump on grab, anywhere the pointer goes
            marker.pos += Vec2::new(drag_delta.x, drag_delta.y);
        }
        if lock && !marker.saved {
            marker.save();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_kind_routing() {
        assert_eq!(note_kind_for(ChartTool::Annotation), Some(NoteKind::Annotation));
        assert_eq!(note_kind_for(ChartTool::CustomNotes), Some(NoteKind::CustomNote));
        assert_eq!(note_kind_for(ChartTool::Line), None);
    }

    #[test]
    fn test_marker_save_on_drag_keeps_text() {
        // Place, type, drag, release: the marker locks with the typed text
        let mut marker = NoteMarker::place(NoteKind::Annotation, Vec2::new(40.0, 40.0));
        marker.text = "resistance".to_string();

        marker.pos += Vec2::new(12.0, -8.0);
        marker.save();

        assert!(marker.saved);
        assert_eq!(marker.text, "resistance");
        assert_eq!(marker.pos, Vec2::new(52.0, 32.0));
    }

    #[test]
    fn test_each_marker_owns_its_buffer() {
        let mut first = NoteMarker::place(NoteKind::CustomNote, Vec2::ZERO);
        let second = NoteMarker::place(NoteKind::CustomNote, Vec2::new(10.0, 10.0));
        first.text = "alpha".to_string();
        assert!(second.text.is_empty());
    }
}
