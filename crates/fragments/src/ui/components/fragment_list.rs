//! Fragment list component and its navigation state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::display::{single_line, truncate_label};
use crate::app::view::ListProps;
use crate::domain::model::{Fragment, FragmentId};

/// Cursor and scroll position of the list, plus where it was last drawn for mouse hits.
#[derive(Debug, Default, Clone)]
pub struct FragmentListState {
    list: ListState,
    rows: Rect,
}

impl FragmentListState {
    /// Index of the highlighted row, if the list is non-empty.
    pub fn cursor(&self) -> Option<usize> {
        self.list.selected()
    }

    /// Move the cursor to `index`, clamped to `len`.
    pub fn select_index(&mut self, index: usize, len: usize) {
        if len == 0 {
            self.list.select(None);
        } else {
            self.list.select(Some(index.min(len - 1)));
        }
    }

    pub fn select_next(&mut self, len: usize) {
        let next = self.list.selected().map_or(0, |idx| idx.saturating_add(1));
        self.select_index(next, len);
    }

    pub fn select_previous(&mut self, len: usize) {
        let previous = self.list.selected().map_or(0, |idx| idx.saturating_sub(1));
        self.select_index(previous, len);
    }

    pub fn select_last(&mut self, len: usize) {
        self.select_index(len.saturating_sub(1), len);
    }

    /// The id under the cursor.
    pub fn selected_id(&self, fragments: &[Fragment]) -> Option<FragmentId> {
        self.cursor()
            .and_then(|idx| fragments.get(idx))
            .map(Fragment::id)
    }

    /// Map a terminal cell to the fragment drawn there.
    pub fn id_at(&self, column: u16, row: u16, fragments: &[Fragment]) -> Option<FragmentId> {
        if !super::contains(self.rows, column, row) {
            return None;
        }
        let index = self.list.offset() + usize::from(row - self.rows.y);
        fragments.get(index).map(Fragment::id)
    }
}

/// Build the one-row label shown for each fragment.
pub fn list_labels(props: &ListProps<'_>) -> Vec<String> {
    props
        .fragments
        .iter()
        .map(|fragment| {
            let label = truncate_label(fragment.text(), props.preview_chars, props.ellipsis);
            single_line(&label).into_owned()
        })
        .collect()
}

/// Ratatui component listing every fragment, oldest first.
#[derive(Debug, Default)]
pub struct FragmentList;

impl FragmentList {
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        props: &ListProps<'_>,
        state: &mut FragmentListState,
        has_focus: bool,
    ) {
        let border_color = if has_focus {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(format!("Text Fragments ({})", props.fragments.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        state.rows = inner;

        if props.fragments.is_empty() {
            frame.render_widget(block, area);
            let placeholder = Paragraph::new(props.empty_message)
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, inner);
            return;
        }

        if state.cursor().is_none() {
            state.select_index(0, props.fragments.len());
        }

        let items: Vec<ListItem<'_>> = list_labels(props)
            .into_iter()
            .zip(props.fragments)
            .map(|(label, fragment)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>4} ", fragment.id().get()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(label),
                ]))
            })
            .collect();

        let highlight = if has_focus {
            Style::default()
                .bg(Color::Rgb(32, 52, 70))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, area, &mut state.list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::app::store::FragmentStore;
    use crate::ui::components::buffer_text;

    fn props(fragments: &[Fragment]) -> ListProps<'_> {
        ListProps {
            fragments,
            draft: "",
            preview_chars: 100,
            ellipsis: "...",
            empty_message: "No text fragments yet. Add one above!",
        }
    }

    #[test]
    fn labels_truncate_and_flatten() {
        let mut store = FragmentStore::new();
        store.add_fragment("short");
        store.add_fragment(&"x".repeat(101));
        store.add_fragment("two\nlines");

        let labels = list_labels(&props(store.fragments()));
        assert_eq!(labels[0], "short");
        assert_eq!(labels[1], format!("{}...", "x".repeat(100)));
        assert_eq!(labels[2], "two lines");
    }

    #[test]
    fn renders_empty_state_message() {
        let backend = TestBackend::new(50, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = FragmentListState::default();
        terminal
            .draw(|frame| {
                let area = frame.size();
                FragmentList.render(frame, area, &props(&[]), &mut state, true);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("No text fragments yet."));
        assert!(text.contains("Text Fragments (0)"));
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn renders_entries_and_maps_clicks() {
        let mut store = FragmentStore::new();
        store.add_fragment("alpha");
        store.add_fragment("beta");

        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = FragmentListState::default();
        terminal
            .draw(|frame| {
                let area = frame.size();
                FragmentList.render(frame, area, &props(store.fragments()), &mut state, true);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("alpha"));
        assert!(text.contains("beta"));
        assert_eq!(state.cursor(), Some(0));

        let second = store.fragments()[1].id();
        assert_eq!(state.id_at(5, 2, store.fragments()), Some(second));
        assert_eq!(state.id_at(5, 3, store.fragments()), None);
        assert_eq!(state.id_at(0, 0, store.fragments()), None);
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let mut state = FragmentListState::default();
        state.select_previous(3);
        assert_eq!(state.cursor(), Some(0));
        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.cursor(), Some(2));
        state.select_last(0);
        assert_eq!(state.cursor(), None);
    }
}
