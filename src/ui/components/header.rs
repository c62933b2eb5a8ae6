//! Header component renderer.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar at `row` and returns the next free row.
///
/// The title is centred; the active theme mode sits at the right edge when
/// the pane is wide enough to hold both without overlap.
///
/// ```text
/// [padding] Image Finder [padding] light
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = text_width(&header.title);
    let label_len = text_width(&header.theme_label);
    let padding = cols.saturating_sub(title_len) / 2;
    let show_label = padding + title_len + label_len <= cols;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);

    if show_label {
        print!("{}", " ".repeat(cols - padding - title_len - label_len));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", header.theme_label);
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    }

    print!("{}", Theme::reset());
    row + 1
}
