//! Empty state component renderer.
//!
//! Shown in place of the gallery before the first search and when a search
//! matched nothing.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Blank rows between the top of the gallery area and the message.
const TOP_GAP: usize = 2;

/// Renders the centred two-line message below `row` and returns the row
/// after the subtitle.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let message = truncate(&empty.message, cols);
    let msg_len = text_width(&message);
    let msg_padding = cols.saturating_sub(msg_len) / 2;
    let message_row = row + TOP_GAP;

    position_cursor(message_row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = text_width(&subtitle);
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(message_row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());

    message_row + 2
}
