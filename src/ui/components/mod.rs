//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with the active theme mode
//! - [`search`]: Search input box
//! - [`notices`]: Result count, loading, and error lines
//! - [`gallery`]: Result list with tag highlighting
//! - [`empty`]: Welcome and no-results messages
//! - [`modal`]: Image detail overlay
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Notices - 0..3 lines]
//! [Gallery Headers]
//! [Gallery Rows | Empty State]
//! [Border]
//! [Footer]
//! ```
//!
//! The modal, when present, is drawn over the finished layout.

mod empty;
mod footer;
mod gallery;
mod header;
mod modal;
mod notices;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use gallery::{render_gallery_headers, render_gallery_rows};
use header::render_header;
use modal::render_modal;
use notices::render_notices;
use search::render_search_bar;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_notices(current_row, &vm.notices, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_gallery_headers(current_row, theme, cols);
        render_gallery_rows(current_row, &vm.gallery, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, rows, cols);
    }
}
