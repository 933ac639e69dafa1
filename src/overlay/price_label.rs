//! Draggable price labels.
//!
//! Placement samples the price at the click's y through the coordinate
//! mapper and renders a finished pill immediately; there is no edit or save
//! step. Dragging a pill recomputes its price from the new y on every move.
//! With no valid price range loaded, placement refuses rather than dividing
//! by a zero span, and an existing pill keeps its stored price.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::chart::ChartSurface;
use crate::market::PriceRange;
use crate::theme;
use crate::tools::{ActiveTool, ChartTool};

use super::mapper;
use super::params::{is_cursor_over_ui, PointerParams};
use super::shapes::{OverlayShape, PriceTag};

/// Place a pill at the click point with the price sampled at its y.
pub fn handle_price_label_placement(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    active_tool: Res<ActiveTool>,
    range: Res<PriceRange>,
    pointer: PointerParams,
    mut contexts: EguiContexts,
) {
    if !active_tool.is(ChartTool::PriceLabel) {
        return;
    }
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

    let height = pointer.surface.size.y;
    let Some(price) = mapper::price_from_y(local.y, height, range.min, range.max) else {
        warn!("No valid price range loaded, skipping price label");
        return;
    };

    commands.spawn((
        OverlayShape { tool: ChartTool::PriceLabel },
        PriceTag { pos: local, price },
    ));
    info!("Placed price label {:.2} at {:?}", price, local);
}

/// Render each pill and drag-update its position and price.
pub fn price_pill_ui(
    mut contexts: EguiContexts,
    surface: Res<ChartSurface>,
    range: Res<PriceRange>,
    mut tags: Query<(Entity, &mut PriceTag)>,
) {
    if !surface.ready {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    for (entity, mut tag) in tags.iter_mut() {
        let screen = surface.to_screen(tag.pos);
        let mut drag_delta = egui::Vec2::ZERO;

        egui::Area::new(egui::Id::new(("price_pill", entity)))
            .fixed_pos(egui::pos2(screen.x, screen.y))
            .pivot(egui::Align2::CENTER_CENTER)
            .show(ctx, |ui| {
                let text = format!("{:.2}", tag.price);
                let response = ui.add(
                    egui::Button::new(
                        egui::RichText::new(text).color(theme::PRICE_PILL_TEXT),
                    )
                    .fill(theme::PRICE_PILL_BG)
                    .corner_radius(10.0)
                    .sense(egui::Sense::click_and_drag()),
                );
                if response.dragged() {
                    drag_delta = response.drag_delta();
                }
            });

        if drag_delta != egui::Vec2::ZERO {
            tag.pos += Vec2::new(drag_delta.x, drag_delta.y);
            // Only a drag re-samples the price; range changes alone never
            // rewrite an already-placed label
            if let Some(price) =
                mapper::price_from_y(tag.pos.y, surface.size.y, range.min, range.max)
            {
                tag.price = price;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_price_from_click_y() {
        let price = mapper::price_from_y(100.0, 400.0, 100.0, 200.0).unwrap();
        let tag = PriceTag { pos: Vec2::new(50.0, 100.0), price };
        assert_eq!(tag.price, 175.0);
    }

    #[test]
    fn test_price_is_stale_until_dragged() {
        // The stored price survives a range change untouched
        let mut tag = PriceTag {
            pos: Vec2::new(50.0, 100.0),
            price: mapper::price_from_y(100.0, 400.0, 100.0, 200.0).unwrap(),
        };
        assert_eq!(tag.price, 175.0);

        // Range moved to [200, 400]; nothing happens without a drag
        assert_eq!(tag.price, 175.0);

        // A drag re-samples against the new range
        tag.pos.y = 200.0;
        tag.price = mapper::price_from_y(tag.pos.y, 400.0, 200.0, 400.0).unwrap();
        assert_eq!(tag.price, 300.0);
    }

    #[test]
    fn test_zero_range_refuses_placement() {
        assert!(mapper::price_from_y(100.0, 400.0, 150.0, 150.0).is_none());
    }
}
