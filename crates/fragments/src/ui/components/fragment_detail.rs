//! Full-text view of a single fragment.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use time::macros::format_description;

use crate::app::view::DetailProps;

const BACK_LABEL: &str = "← back";

/// Renders a fragment verbatim, keeping its line breaks and indentation.
#[derive(Debug)]
pub struct FragmentDetail {
    pub show_timestamps: bool,
}

impl Default for FragmentDetail {
    fn default() -> Self {
        Self {
            show_timestamps: true,
        }
    }
}

impl FragmentDetail {
    /// Highest useful scroll offset when the text is wrapped to `width` columns. At that
    /// offset the final wrapped row sits at the top of the body.
    pub fn max_scroll(props: &DetailProps<'_>, width: u16) -> u16 {
        let rows = body(props).line_count(width.max(1));
        u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Columns available to the text inside the bordered body.
    pub fn text_width(area: Rect) -> u16 {
        area.width.saturating_sub(2)
    }

    /// Draw the detail view and return the area of the back affordance.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        props: &DetailProps<'_>,
        scroll: u16,
    ) -> Rect {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        let mut header = vec![
            Span::styled(
                BACK_LABEL,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("Text Fragment Details", Style::default().fg(Color::White)),
        ];
        if self.show_timestamps
            && let Some(created) = format_created(props)
        {
            header.push(Span::styled(
                format!(" · {created}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);

        let block = Block::default()
            .title(format!("Fragment {}", props.fragment.id()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(body(props).block(block).scroll((scroll, 0)), rows[1]);

        Rect {
            width: (BACK_LABEL.chars().count() as u16).min(rows[0].width),
            ..rows[0]
        }
    }
}

fn body<'a>(props: &DetailProps<'a>) -> Paragraph<'a> {
    Paragraph::new(Text::raw(props.fragment.text())).wrap(Wrap { trim: false })
}

fn format_created(props: &DetailProps<'_>) -> Option<String> {
    props
        .fragment
        .created_at()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
        ))
        .ok()
}
