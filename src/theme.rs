//! Centralized color theme for the application.
//!
//! This module provides all colors used by the chart and the overlay tools.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Chart Colors
// ============================================================================

/// Candle body/wick when the close is at or above the open
pub const CANDLE_UP: Color = Color::srgb(0.15, 0.65, 0.35);

/// Candle body/wick when the close is below the open
pub const CANDLE_DOWN: Color = Color::srgb(0.85, 0.25, 0.25);

/// Chart plot-area frame
pub const CHART_FRAME: Color = Color::srgba(0.5, 0.5, 0.5, 0.6);

/// Horizontal line marking the last traded price
pub const LAST_PRICE_LINE: Color = Color::srgba(0.9, 0.75, 0.2, 0.8);

// ============================================================================
// Overlay Tool Colors
// ============================================================================

/// Committed line segments
pub const LINE_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

/// In-progress (draft) shapes, rendered dashed
pub const DRAFT_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Rectangle outline
pub const RECTANGLE_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

/// Ruler segment and distance label
pub const RULER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Brush strokes
pub const BRUSH_COLOR: Color = Color::srgb(0.0, 0.0, 0.0);

/// Channel segment and rails
pub const CHANNEL_COLOR: Color = Color::srgb(1.0, 0.65, 0.0);

/// Fibonacci level lines
pub const FIBONACCI_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

/// Trendline segment
pub const TRENDLINE_COLOR: Color = Color::srgb(0.0, 0.5, 0.0);

/// Arrow shaft and wings
pub const ARROW_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

// ============================================================================
// Marker Colors (egui)
// ============================================================================

/// Ruler distance label text
pub const RULER_LABEL: egui::Color32 = egui::Color32::RED;

/// Custom note dot and text
pub const NOTE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 0, 255);

/// Saved annotation text
pub const ANNOTATION_TEXT: egui::Color32 = egui::Color32::BLACK;

/// Price label pill background (drawn at 70% opacity)
pub const PRICE_PILL_BG: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 178);

/// Price label pill text
pub const PRICE_PILL_TEXT: egui::Color32 = egui::Color32::WHITE;

/// Live price readout in the header
pub const LIVE_PRICE_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
