//! Non-interactive egui text drawn over the gizmo layer: ruler distance
//! labels and emoji stamps. Interactive marker surfaces live in the notes
//! and price label modules.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::chart::ChartSurface;
use crate::theme;

use super::capture::CaptureState;
use super::geometry;
use super::shapes::{AnchorKind, AnchorShape, EmojiStamp};

/// Distance labels at the midpoint of every ruler, including the draft.
pub fn ruler_label_ui(
    mut contexts: EguiContexts,
    surface: Res<ChartSurface>,
    rulers: Query<(Entity, &AnchorShape)>,
    capture: Res<CaptureState>,
) {
    if !surface.ready {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let label = |ctx: &egui::Context, id: egui::Id, start: Vec2, end: Vec2| {
        let pos = surface.to_screen(geometry::midpoint(start, end));
        egui::Area::new(id)
            .fixed_pos(pos)
            .pivot(egui::Align2::CENTER_BOTTOM)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(geometry::ruler_label(start, end))
                        .color(theme::RULER_LABEL)
                        .size(12.0),
                );
            });
    };

    for (entity, shape) in rulers.iter() {
        if shape.kind == AnchorKind::Ruler {
            label(ctx, egui::Id::new(("ruler_label", entity)), shape.start, shape.end);
        }
    }

    if let Some(draft) = capture.draft()
        && draft.kind == AnchorKind::Ruler
    {
        label(ctx, egui::Id::new("ruler_label_draft"), draft.start, draft.end);
    }
}

pub fn emoji_stamp_ui(
    mut contexts: EguiContexts,
    surface: Res<ChartSurface>,
    stamps: Query<(Entity, &EmojiStamp)>,
) {
    if !surface.ready {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    for (entity, stamp) in stamps.iter() {
        egui::Area::new(egui::Id::new(("emoji_stamp", entity)))
            .fixed_pos(surface.to_screen(stamp.pos))
            .pivot(egui::Align2::CENTER_CENTER)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(stamp.glyph.as_str()).size(20.0));
            });
    }
}
