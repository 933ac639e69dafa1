use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

/// The fixed set of drawing tools offered by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartTool {
    Line,
    Rectangle,
    Ruler,
    Brush,
    Channel,
    Annotation,
    Emoji,
    Fibonacci,
    Trendline,
    Arrow,
    PriceLabel,
    CustomNotes,
}

impl ChartTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartTool::Line => "Draw Line",
            ChartTool::Rectangle => "Rectangle",
            ChartTool::Ruler => "Ruler",
            ChartTool::Brush => "Brush",
            ChartTool::Channel => "Channel",
            ChartTool::Annotation => "Annotation",
            ChartTool::Emoji => "Emoji",
            ChartTool::Fibonacci => "Fibonacci",
            ChartTool::Trendline => "Trendline",
            ChartTool::Arrow => "Arrow",
            ChartTool::PriceLabel => "Price Label",
            ChartTool::CustomNotes => "Custom Notes",
        }
    }

    /// Toolbar button glyph
    pub fn icon(&self) -> &'static str {
        match self {
            ChartTool::Line => "✏",
            ChartTool::Rectangle => "🔲",
            ChartTool::Ruler => "📏",
            ChartTool::Brush => "🖌",
            ChartTool::Channel => "📊",
            ChartTool::Annotation => "💬",
            ChartTool::Emoji => "😊",
            ChartTool::Fibonacci => "📐",
            ChartTool::Trendline => "📈",
            ChartTool::Arrow => "➡",
            ChartTool::PriceLabel => "🏷",
            ChartTool::CustomNotes => "📝",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            ChartTool::Annotation | ChartTool::CustomNotes => {
                CursorIcon::System(SystemCursorIcon::Text)
            }
            _ => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }

    pub fn all() -> &'static [ChartTool] {
        &[
            ChartTool::Line,
            ChartTool::Rectangle,
            ChartTool::Ruler,
            ChartTool::Brush,
            ChartTool::Channel,
            ChartTool::Annotation,
            ChartTool::Emoji,
            ChartTool::Fibonacci,
            ChartTool::Trendline,
            ChartTool::Arrow,
            ChartTool::PriceLabel,
            ChartTool::CustomNotes,
        ]
    }
}

/// Exclusivity gate: at most one tool receives chart pointer input.
///
/// `None` means the chart beneath is fully interactive and no overlay
/// capture runs. Selecting a tool never clears another tool's shapes.
#[derive(Resource, Default)]
pub struct ActiveTool {
    pub current: Option<ChartTool>,
}

impl ActiveTool {
    pub fn is(&self, tool: ChartTool) -> bool {
        self.current == Some(tool)
    }
}

/// Show the active tool's cursor over the chart, the default cursor elsewhere.
pub fn update_cursor_icon(
    active_tool: Res<ActiveTool>,
    mut window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single_mut() else {
        return;
    };

    let over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false);

    let icon = match active_tool.current {
        Some(tool) if !over_ui => tool.cursor_icon(),
        _ => CursorIcon::System(SystemCursorIcon::Default),
    };

    commands.entity(entity).insert(icon);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_returns_twelve_tools() {
        assert_eq!(ChartTool::all().len(), 12);
    }

    #[test]
    fn test_display_names_match_selection_surface() {
        // These literals are the tool-selection contract
        assert_eq!(ChartTool::Line.display_name(), "Draw Line");
        assert_eq!(ChartTool::PriceLabel.display_name(), "Price Label");
        assert_eq!(ChartTool::CustomNotes.display_name(), "Custom Notes");

        let names: Vec<&str> = ChartTool::all().iter().map(|t| t.display_name()).collect();
        assert_eq!(
            names,
            vec![
                "Draw Line",
                "Rectangle",
                "Ruler",
                "Brush",
                "Channel",
                "Annotation",
                "Emoji",
                "Fibonacci",
                "Trendline",
                "Arrow",
                "Price Label",
                "Custom Notes",
            ]
        );
    }

    #[test]
    fn test_no_tool_active_by_default() {
        let active = ActiveTool::default();
        assert_eq!(active.current, None);
    }

    #[test]
    fn test_single_active_tool() {
        // For any sequence of selections, at most one tool is active
        let mut active = ActiveTool::default();
        for &tool in ChartTool::all() {
            active.current = Some(tool);
            assert!(active.is(tool));
            let others = ChartTool::all().iter().filter(|&&t| active.is(t)).count();
            assert_eq!(others, 1);
        }
        active.current = None;
        assert!(ChartTool::all().iter().all(|&t| !active.is(t)));
    }

    #[test]
    fn test_text_tools_use_text_cursor() {
        assert_eq!(
            ChartTool::Annotation.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Text)
        );
        assert_eq!(
            ChartTool::Line.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Crosshair)
        );
    }
}
