//! Image detail modal renderer.
//!
//! Drawn last, over the gallery, as a bordered box centred in the pane.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

const MODAL_MARGIN: usize = 4;
const LABEL_WIDTH: usize = 8;
const HINT: &str = " Esc: close ";

/// Renders `modal` centred in a `rows` x `cols` pane.
///
/// ```text
/// ┌─ Image #42 ───────────────┐
/// │                           │
/// │ Author  someone           │
/// │ Image   https://...       │
/// │                           │
/// └──────────────── Esc: close┘
/// ```
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(MODAL_MARGIN * 2).max(LABEL_WIDTH + 6);
    let inner_width = box_width.saturating_sub(2);
    let box_height = modal.lines.len() + 4;
    let top = rows.saturating_sub(box_height) / 2 + 1;
    let left = cols.saturating_sub(box_width) / 2 + 1;
    let border = Theme::fg(&theme.colors.modal_border);

    let title = truncate(&modal.title, inner_width.saturating_sub(1));
    position_cursor(top, left);
    print!("{border}┌─");
    print!("{}{}{title}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
    print!("{border}{}┐", "─".repeat(inner_width.saturating_sub(text_width(&title) + 1)));

    let blank = |row: usize| {
        position_cursor(row, left);
        print!("{border}│{}│", " ".repeat(inner_width));
    };

    blank(top + 1);

    let value_width = inner_width.saturating_sub(LABEL_WIDTH + 2);
    for (offset, (label, value)) in modal.lines.iter().enumerate() {
        let value = truncate(value, value_width);
        position_cursor(top + 2 + offset, left);
        print!("{border}│ ");
        print!("{}{label:<LABEL_WIDTH$}", Theme::fg(&theme.colors.text_dim));
        print!("{}{value}", Theme::fg(&theme.colors.text_normal));
        print!("{}", " ".repeat(value_width.saturating_sub(text_width(&value)) + 1));
        print!("{border}│");
    }

    blank(top + 2 + modal.lines.len());

    position_cursor(top + 3 + modal.lines.len(), left);
    print!("{border}└{}", "─".repeat(inner_width.saturating_sub(HINT.len())));
    print!("{}{HINT}{border}┘", Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
}
