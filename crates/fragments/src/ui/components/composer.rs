//! Multi-line input box with a clickable submit affordance.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const SUBMIT_LABEL: &str = "[+ add]";
const MAX_VISIBLE_LINES: u16 = 6;
const SUBMIT_COLUMN: u16 = SUBMIT_LABEL.len() as u16 + 1;

/// Where the composer was drawn, for mouse hit testing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComposerHitbox {
    pub input: Rect,
    pub submit: Rect,
}

/// Draws the draft being typed.
#[derive(Debug, Default)]
pub struct Composer;

impl Composer {
    /// Rows needed to show `draft` wrapped into a composer `width` columns wide, borders
    /// included. Capped so the list keeps most of the screen.
    pub fn height_for(draft: &str, width: u16, has_focus: bool) -> u16 {
        let inner_width = width.saturating_sub(SUBMIT_COLUMN + 2);
        let rows = wrapped_rows(draft_text(draft, has_focus), inner_width).max(1);
        u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .min(MAX_VISIBLE_LINES)
            + 2
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        draft: &str,
        has_focus: bool,
    ) -> ComposerHitbox {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(SUBMIT_COLUMN),
            ])
            .split(area);

        let border_color = if has_focus {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title("New fragment")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(columns[0]);
        frame.render_widget(block, columns[0]);

        let body = if draft.is_empty() && !has_focus {
            Text::from(Line::styled(
                "Enter your text here...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            draft_text(draft, has_focus)
        };
        let rows = wrapped_rows(body.clone(), inner.width);
        let overflow = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_sub(inner.height);
        let paragraph = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .scroll((overflow, 0));
        frame.render_widget(paragraph, inner);

        let submit = Rect {
            x: columns[1].x + 1,
            y: columns[1].y + columns[1].height.saturating_sub(1) / 2,
            width: columns[1].width.saturating_sub(1),
            height: 1.min(columns[1].height),
        };
        let button = Paragraph::new(Span::styled(
            SUBMIT_LABEL,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(button, submit);

        ComposerHitbox {
            input: columns[0],
            submit,
        }
    }
}

/// Rows `text` occupies once wrapped to `width`, using the same wrapping as rendering.
fn wrapped_rows(text: Text<'_>, width: u16) -> usize {
    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .line_count(width.max(1))
}

/// The draft split into lines, whitespace kept, with a cursor after the last character.
fn draft_text(draft: &str, has_focus: bool) -> Text<'_> {
    let mut lines: Vec<Line<'_>> = draft.split('\n').map(Line::raw).collect();
    if has_focus && let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled(
            "_",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Text::from(lines)
}
