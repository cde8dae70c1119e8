//! Collection of reusable TUI components.

#[cfg(test)]
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub mod composer;
pub mod fragment_detail;
pub mod fragment_list;

/// Whether the terminal cell at `column`/`row` falls inside `area`.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Flatten a rendered buffer into newline-separated rows of plain text.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_checks_bounds() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(contains(area, 2, 3));
        assert!(contains(area, 5, 4));
        assert!(!contains(area, 6, 4));
        assert!(!contains(area, 2, 5));
        assert!(!contains(Rect::default(), 0, 0));
    }
}
