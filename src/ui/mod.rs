mod header;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Panels render first so overlay areas position against the
        // remaining screen space
        app.add_systems(
            EguiPrimaryContextPass,
            (toolbar::toolbar_ui, header::header_ui).chain(),
        );
    }
}
