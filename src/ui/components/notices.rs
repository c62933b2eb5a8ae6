//! Status line renderer for result info, loading, and error notices.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Notice, NoticeKind};

/// Renders one line per notice starting at `row`.
pub fn render_notices(row: usize, notices: &[Notice], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for notice in notices {
        let color = match notice.kind {
            NoticeKind::Info => &theme.colors.info_fg,
            NoticeKind::Loading => &theme.colors.loading_fg,
            NoticeKind::Error => &theme.colors.error_fg,
        };
        let text = truncate(&notice.text, cols.saturating_sub(1));

        position_cursor(current_row, 1);
        if notice.kind == NoticeKind::Error {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(color));
        print!(" {text}");
        print!("{}", " ".repeat(cols.saturating_sub(text_width(&text) + 1)));
        print!("{}", Theme::reset());

        current_row += 1;
    }

    current_row
}
