pub mod brush;
pub mod capture;
pub mod emoji;
pub mod geometry;
pub mod mapper;
pub mod notes;
pub mod params;
pub mod price_label;
pub mod rendering;
pub mod shapes;
pub mod text_ui;

pub use shapes::{ClearToolRequest, OverlayShape};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::tools;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<tools::ActiveTool>()
            .init_resource::<capture::CaptureState>()
            .init_resource::<brush::StrokeState>()
            .add_message::<ClearToolRequest>()
            .init_gizmo_group::<rendering::OverlayGizmoGroup>()
            .init_gizmo_group::<rendering::DraftGizmoGroup>()
            .add_systems(Startup, rendering::configure_overlay_gizmos)
            .add_systems(
                Update,
                (
                    tools::update_cursor_icon,
                    capture::handle_anchor_capture,
                    brush::handle_brush,
                    notes::handle_note_placement,
                    price_label::handle_price_label_placement,
                    emoji::handle_emoji_stamp,
                    shapes::clear_tool_shapes.run_if(on_message::<ClearToolRequest>),
                    rendering::render_committed_shapes,
                    rendering::render_draft,
                ),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    text_ui::ruler_label_ui,
                    text_ui::emoji_stamp_ui,
                    notes::note_marker_ui,
                    price_label::price_pill_ui,
                ),
            );
    }
}
