//! Gallery component renderer.
//!
//! Lists the loaded records one per row with their position, tag list, and
//! author. Query words found in the tags are highlighted.

use crate::ui::helpers::{
    self, position_cursor, tags_column_width, text_width, POSITION_COLUMN_WIDTH,
    USER_COLUMN_WIDTH,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GalleryItem;

/// Renders the column headers at `row`.
pub fn render_gallery_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:>POSITION_COLUMN_WIDTH$}  {:<width$}  {:<USER_COLUMN_WIDTH$}",
        "#",
        "TAGS",
        "AUTHOR",
        width = tags_column_width(cols)
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every item starting at `row` and returns the row after the last.
pub fn render_gallery_rows(row: usize, items: &[GalleryItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_gallery_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one record.
///
/// ```text
/// [pos]  tags (highlighted)       [padding]  author
/// ```
///
/// The selected row gets the selection colours across the full width and no
/// match highlighting.
fn render_gallery_row(row: usize, item: &GalleryItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    print!("{:>POSITION_COLUMN_WIDTH$}  ", item.position);

    let tags = helpers::highlight_text(
        &item.tags,
        &item.highlight_ranges,
        theme,
        item.is_selected,
    );
    print!("{tags}");
    print!("{base}");

    let width = tags_column_width(cols);
    print!("{}", " ".repeat(width.saturating_sub(text_width(&item.tags)) + 2));

    print!("{}", item.user);

    let line_len = POSITION_COLUMN_WIDTH + 2 + width.max(text_width(&item.tags)) + 2 + text_width(&item.user);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
