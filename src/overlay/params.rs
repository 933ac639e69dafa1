//! Common SystemParam bundle for pointer handling in overlay systems.
//!
//! Every capture system needs the same three things: the window cursor, the
//! chart surface, and an egui gate so clicks on UI never reach the chart.
//! Bundling them keeps the tool systems down to their actual logic.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::chart::ChartSurface;

use super::mapper;

/// Bundled window + surface access for cursor-to-chart conversion
#[derive(SystemParam)]
pub struct PointerParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub surface: Res<'w, ChartSurface>,
}

impl PointerParams<'_, '_> {
    /// Raw cursor position in window pixels, if the cursor is in the window
    pub fn cursor(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }

    /// Cursor position in chart-local pixels (unclamped; `None` until the
    /// surface has geometry)
    pub fn chart_cursor(&self) -> Option<Vec2> {
        mapper::cursor_to_chart(self.cursor()?, &self.surface)
    }

    /// Whether the cursor currently sits inside the plot rectangle
    pub fn cursor_in_chart(&self) -> bool {
        self.cursor()
            .map(|c| self.surface.contains(c))
            .unwrap_or(false)
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
