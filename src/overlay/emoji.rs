//! Emoji stamps: click to append, nothing else.
//!
//! Every qualifying click while the tool is active drops a fixed glyph at
//! the click point. Stamps cannot be dragged or edited; the only way they
//! leave the world is a clear request for the tool.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::tools::{ActiveTool, ChartTool};

use super::params::{is_cursor_over_ui, PointerParams};
use super::shapes::{EmojiStamp, OverlayShape};

/// Glyph stamped by the emoji tool, matching the toolbar button.
pub const STAMP_GLYPH: &str = "\u{1f60a}";

pub fn handle_emoji_stamp(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    active_tool: Res<ActiveTool>,
    pointer: PointerParams,
    mut contexts: EguiContexts,
) {
    if !active_tool.is(ChartTool::Emoji) {
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

    commands.spawn((
        OverlayShape { tool: ChartTool::Emoji },
        EmojiStamp {
            pos: local,
            glyph: STAMP_GLYPH.to_string(),
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_records_click_point_and_glyph() {
        let stamp = EmojiStamp {
            pos: Vec2::new(33.0, 44.0),
            glyph: STAMP_GLYPH.to_string(),
        };
        assert_eq!(stamp.pos, Vec2::new(33.0, 44.0));
        assert_eq!(stamp.glyph, "\u{1f60a}");
    }

    #[test]
    fn test_stamp_glyph_matches_toolbar_icon() {
        assert_eq!(STAMP_GLYPH, ChartTool::Emoji.icon());
    }
}
