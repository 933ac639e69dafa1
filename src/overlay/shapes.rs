//! Component types for committed overlay shapes.
//!
//! Committed shapes are entities; one component per shape family, all tagged
//! with [`OverlayShape`] naming the owning tool. Shapes enter the world only
//! through a commit and are destroyed only by a [`ClearToolRequest`].
//! In-progress drafts never live here; they are tracked in the capture
//! resources and rendered separately.

use bevy::prelude::*;

use crate::tools::ChartTool;

/// Marker tagging every committed overlay entity with its owning tool.
#[derive(Component, Debug, Clone, Copy)]
pub struct OverlayShape {
    pub tool: ChartTool,
}

/// Geometry family of the seven anchor-pair tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Line,
    Rectangle,
    Ruler,
    Channel,
    Trendline,
    Arrow,
    Fibonacci,
}

impl AnchorKind {
    pub fn tool(&self) -> ChartTool {
        match self {
            AnchorKind::Line => ChartTool::Line,
            AnchorKind::Rectangle => ChartTool::Rectangle,
            AnchorKind::Ruler => ChartTool::Ruler,
            AnchorKind::Channel => ChartTool::Channel,
            AnchorKind::Trendline => ChartTool::Trendline,
            AnchorKind::Arrow => ChartTool::Arrow,
            AnchorKind::Fibonacci => ChartTool::Fibonacci,
        }
    }
}

/// A committed two-point shape in chart-local pixels.
#[derive(Component, Debug, Clone, Copy)]
pub struct AnchorShape {
    pub kind: AnchorKind,
    pub start: Vec2,
    pub end: Vec2,
}

/// A committed (or still-growing) brush stroke.
#[derive(Component, Debug, Clone)]
pub struct BrushStroke {
    pub points: Vec<Vec2>,
}

impl BrushStroke {
    pub fn new(first: Vec2) -> Self {
        Self { points: vec![first] }
    }

    /// Append a point, skipping exact duplicates of the last one.
    pub fn append(&mut self, point: Vec2) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }
}

/// Which marker tool owns a [`NoteMarker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Annotation,
    CustomNote,
}

impl NoteKind {
    pub fn tool(&self) -> ChartTool {
        match self {
            NoteKind::Annotation => ChartTool::Annotation,
            NoteKind::CustomNote => ChartTool::CustomNotes,
        }
    }
}

/// A positioned, text-editable marker. While `saved` is false the marker
/// renders an editable input surface; saving freezes it to a plain label.
/// Each marker owns its text; there is no shared pending-text buffer.
#[derive(Component, Debug, Clone)]
pub struct NoteMarker {
    pub kind: NoteKind,
    pub pos: Vec2,
    pub text: String,
    pub saved: bool,
}

impl NoteMarker {
    pub fn place(kind: NoteKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            text: String::new(),
            saved: false,
        }
    }

    pub fn save(&mut self) {
        self.saved = true;
    }
}

/// A draggable price pill. The price is derived from the marker's y at
/// placement and on every drag move; it is never recomputed when the
/// underlying range changes.
#[derive(Component, Debug, Clone, Copy)]
pub struct PriceTag {
    pub pos: Vec2,
    pub price: f64,
}

/// An append-only emoji stamp.
#[derive(Component, Debug, Clone)]
pub struct EmojiStamp {
    pub pos: Vec2,
    pub glyph: String,
}

/// Request to clear one tool's committed shapes (the only destruction path).
#[derive(Message)]
pub struct ClearToolRequest {
    pub tool: ChartTool,
}

/// Despawn every committed shape belonging to the requested tool.
pub fn clear_tool_shapes(
    mut commands: Commands,
    mut requests: MessageReader<ClearToolRequest>,
    shapes: Query<(Entity, &OverlayShape)>,
) {
    for request in requests.read() {
        let mut cleared = 0;
        for (entity, shape) in shapes.iter() {
            if shape.tool == request.tool {
                commands.entity(entity).despawn();
                cleared += 1;
            }
        }
        info!("Cleared {} shapes for {}", cleared, request.tool.display_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_kind_maps_to_its_tool() {
        assert_eq!(AnchorKind::Line.tool(), ChartTool::Line);
        assert_eq!(AnchorKind::Fibonacci.tool(), ChartTool::Fibonacci);
        assert_eq!(NoteKind::CustomNote.tool(), ChartTool::CustomNotes);
    }

    #[test]
    fn test_brush_stroke_accretes_in_order() {
        let mut stroke = BrushStroke::new(Vec2::new(0.0, 0.0));
        stroke.append(Vec2::new(1.0, 1.0));
        stroke.append(Vec2::new(2.0, 2.0));
        assert_eq!(
            stroke.points,
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]
        );
    }

    #[test]
    fn test_brush_stroke_skips_duplicate_points() {
        let mut stroke = BrushStroke::new(Vec2::new(0.0, 0.0));
        stroke.append(Vec2::new(0.0, 0.0));
        stroke.append(Vec2::new(1.0, 0.0));
        stroke.append(Vec2::new(1.0, 0.0));
        assert_eq!(stroke.points.len(), 2);
    }

    #[test]
    fn test_note_marker_starts_editable() {
        let mut note = NoteMarker::place(NoteKind::Annotation, Vec2::new(5.0, 5.0));
        assert!(!note.saved);
        assert!(note.text.is_empty());
        note.save();
        assert!(note.saved);
    }
}
