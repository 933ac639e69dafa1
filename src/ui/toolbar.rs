use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::constants::TOOLBAR_WIDTH;
use crate::overlay::ClearToolRequest;
use crate::tools::{ActiveTool, ChartTool};

/// Vertical tool strip on the left edge: one icon button per tool.
///
/// Clicking a button makes that tool the active one; clicking the active
/// tool's button deselects it. Selection never touches committed shapes;
/// only the Clear button below the strip destroys anything.
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut active_tool: ResMut<ActiveTool>,
    mut clear_requests: MessageWriter<ClearToolRequest>,
) -> Result {
    egui::SidePanel::left("tool_strip")
        .exact_width(TOOLBAR_WIDTH)
        .resizable(false)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.spacing_mut().item_spacing.y = 4.0;

                for tool in ChartTool::all() {
                    let selected = active_tool.is(*tool);
                    let button = egui::Button::new(
                        egui::RichText::new(tool.icon()).size(18.0),
                    )
                    .min_size(egui::vec2(36.0, 32.0))
                    .selected(selected);

                    let response = ui.add(button);
                    if response.clicked() {
                        active_tool.current = if selected { None } else { Some(*tool) };
                    }
                    response.on_hover_text(tool.display_name());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(4.0);

                // Clear wipes only the active tool's shapes
                if let Some(tool) = active_tool.current {
                    if ui
                        .add(egui::Button::new(egui::RichText::new("\u{1f5d1}").size(16.0)))
                        .on_hover_text(format!("Clear {}", tool.display_name()))
                        .clicked()
                    {
                        clear_requests.write(ClearToolRequest { tool });
                    }
                }
            });
        });
    Ok(())
}
