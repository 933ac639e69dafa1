//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Width reserved on the left edge for the tool sidebar
pub const TOOLBAR_WIDTH: f32 = 56.0;

/// Height reserved at the top for the symbol/price header
pub const HEADER_HEIGHT: f32 = 40.0;

/// Padding between the chart plot area and the window/panel edges
pub const CHART_MARGIN: f32 = 16.0;

/// Width reserved on the right edge for the price axis labels
pub const PRICE_AXIS_WIDTH: f32 = 64.0;

/// Fraction of one candle slot occupied by the candle body (the rest is gap)
pub const CANDLE_BODY_FRACTION: f32 = 0.7;

/// Seconds between live ticker price polls
pub const LIVE_PRICE_POLL_SECS: f32 = 2.0;
