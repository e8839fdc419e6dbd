use std::borrow::Cow;

use ratatui::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use valentine_core::Offset;

use super::super::constants::{EVASION_UNITS_PER_COLUMN, EVASION_UNITS_PER_ROW};

pub(in crate::tui) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if max_graphemes == 0 {
        return Cow::Owned(String::new());
    }

    let grapheme_count = UnicodeSegmentation::graphemes(input, true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        let truncated: String = UnicodeSegmentation::graphemes(input, true)
            .take(max_graphemes)
            .collect();
        return Cow::Owned(truncated);
    }

    let keep = max_graphemes - ELLIPSIS_GRAPHEMES;
    let mut truncated: String = UnicodeSegmentation::graphemes(input, true).take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

/// `percent` of `total` cells, rounded down.
pub(in crate::tui) fn percent_of(total: u16, percent: u16) -> u16 {
    let cells = u32::from(total) * u32::from(percent) / 100;
    u16::try_from(cells).unwrap_or(u16::MAX)
}

/// Rectangle of `width` x `height` centred in `area`, shrunk to fit.
pub(in crate::tui) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Place a `width` x 1 control displaced from the centre of `area` by an
/// evasion offset, clamped so it never leaves the area.
#[allow(clippy::cast_possible_truncation)]
pub(in crate::tui) fn evaded_rect(area: Rect, width: u16, offset: Offset) -> Rect {
    let width = width.min(area.width);
    let home = centered_rect(area, width, 1);
    let dx = (offset.x / EVASION_UNITS_PER_COLUMN).round() as i32;
    let dy = (offset.y / EVASION_UNITS_PER_ROW).round() as i32;

    let max_x = i32::from(area.x) + i32::from(area.width - width);
    let max_y = i32::from(area.y) + i32::from(area.height.saturating_sub(1));
    let x = (i32::from(home.x) + dx).clamp(i32::from(area.x), max_x);
    let y = (i32::from(home.y) + dy).clamp(i32::from(area.y), max_y);

    Rect {
        x: u16::try_from(x).unwrap_or(home.x),
        y: u16::try_from(y).unwrap_or(home.y),
        width,
        height: 1,
    }
}

/// Horizontal padding of the accept control at `scale`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(in crate::tui) fn scaled_padding(base: u16, scale: f64) -> u16 {
    (f64::from(base) * scale).round().clamp(0.0, f64::from(u16::MAX)) as u16
}
