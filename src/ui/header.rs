use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::AppConfig;
use crate::market::LivePrice;
use crate::theme;
use crate::tools::ActiveTool;

/// Top header: symbol, interval, active tool, and the live price readout.
pub fn header_ui(
    mut contexts: EguiContexts,
    config: Res<AppConfig>,
    live_price: Res<LivePrice>,
    active_tool: Res<ActiveTool>,
) -> Result {
    egui::TopBottomPanel::top("chart_header")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&config.data.symbol)
                        .size(16.0)
                        .strong(),
                );
                ui.label(egui::RichText::new(&config.data.interval).size(13.0).weak());

                if let Some(tool) = active_tool.current {
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(tool.display_name()).size(13.0).italics(),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match live_price.price {
                        Some(price) => {
                            ui.colored_label(
                                theme::LIVE_PRICE_TEXT,
                                egui::RichText::new(format!("{:.2}", price)).strong(),
                            );
                            ui.label(egui::RichText::new("Live").size(11.0).weak());
                        }
                        None => {
                            ui.label(egui::RichText::new("Connecting...").size(11.0).weak());
                        }
                    }
                });
            });
        });
    Ok(())
}
