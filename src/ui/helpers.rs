//! Shared rendering utilities.
//!
//! Text measurement and truncation work on characters, not bytes, since tag
//! lists and author names are arbitrary UTF-8.

use crate::ui::theme::Theme;

/// Width of the one-based position column in the gallery.
pub const POSITION_COLUMN_WIDTH: usize = 5;

/// Width of the author column in the gallery.
pub const USER_COLUMN_WIDTH: usize = 16;

const MIN_TAGS_COLUMN_WIDTH: usize = 12;

/// Width left for the tags column once the position and author columns and
/// their separators are placed.
#[must_use]
pub fn tags_column_width(cols: usize) -> usize {
    cols.saturating_sub(POSITION_COLUMN_WIDTH + USER_COLUMN_WIDTH + 4)
        .max(MIN_TAGS_COLUMN_WIDTH)
}

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text`, counted in characters.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, ending in `...` when cut.
///
/// # Examples
///
/// ```
/// use image_finder::ui::helpers::truncate;
///
/// assert_eq!(truncate("mountain, lake", 20), "mountain, lake");
/// assert_eq!(truncate("mountain, lake", 10), "mountai...");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text_width(text) <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Cuts `text` to at most `max` characters, keeping the end and marking the
/// cut with a leading `...`.
#[must_use]
pub fn truncate_start(text: &str, max: usize) -> String {
    let width = text_width(text);
    if width <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let kept: String = text.chars().skip(width - keep).collect();
    format!("...{kept}")
}

/// Styles `text` with the match highlight colours over `ranges`.
///
/// `ranges` are `(start, end)` character indices with exclusive end, sorted
/// and non-overlapping. Ranges past the end of the text are clipped. Selected
/// rows are returned unstyled so the selection colours stay uniform.
///
/// After each highlighted section the escape state is reset; the caller must
/// re-apply its own base colours after the returned string.
#[must_use]
pub fn highlight_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) -> String {
    if ranges.is_empty() || is_selected {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let normal = Theme::fg(&theme.colors.text_normal);
    let mut out = String::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&normal);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}
