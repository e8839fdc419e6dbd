//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Horizontal evasion distance covered by one terminal column.
pub const EVASION_UNITS_PER_COLUMN: f64 = 10.0;
/// Vertical evasion distance covered by one terminal row.
pub const EVASION_UNITS_PER_ROW: f64 = 25.0;
/// Padding columns of the accept control at scale 1.
pub const ACCEPT_BASE_PADDING: u16 = 2;
/// Highlight symbol shown beside the selected catalogue entry.
pub const LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Width percentage of the share panel popup.
pub const SHARE_PANEL_WIDTH_PERCENT: u16 = 70;
/// Height of the share panel popup.
pub const SHARE_PANEL_HEIGHT: u16 = 9;
/// Longest name shown in headers before truncation.
pub const HEADER_NAME_MAX_CHARS: usize = 32;
/// Height of the status footer (message plus key help).
pub const STATUS_FOOTER_HEIGHT: u16 = 4;
