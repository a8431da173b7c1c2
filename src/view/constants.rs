//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for the card deck's numeric layout values.

/// Height of the status bar in lines.
///
/// Single line for notices and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the position indicator (dots) in lines.
pub const INDICATOR_HEIGHT: u16 = 1;

/// Width of the active card as a percentage of the deck area.
pub const CARD_WIDTH_PERCENT: u16 = 60;

/// Narrowest card that is still drawn.
pub const MIN_CARD_WIDTH: u16 = 12;

/// Columns a neighbouring card is fanned out by, per step of offset.
pub const FAN_STEP_COLUMNS: i32 = 4;

/// Rows a neighbouring card is inset by, per step of offset.
pub const FAN_STEP_ROWS: u16 = 1;

/// Terminal cells are roughly twice as tall as they are wide; vertical
/// pointer travel is scaled by this so both axes share one pixel unit.
pub const ROW_ASPECT: f64 = 2.0;

/// Combined tilt (degrees) above which a card title shows a lean marker.
pub const TILT_MARKER_DEG: f64 = 1.0;
