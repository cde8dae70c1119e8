//! Application loop for the TUI.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tracing::{debug, info, warn};

use crate::app::view::{
    Action, DraftEdit, ListSettings, Outcome, Screen, ViewController, ViewState,
};
use crate::domain::model::FragmentId;
use crate::infra::clipboard::{Clipboard, CopySink};
use crate::infra::config::Config;
use crate::ui::components::composer::{Composer, ComposerHitbox};
use crate::ui::components::contains;
use crate::ui::components::fragment_detail::FragmentDetail;
use crate::ui::components::fragment_list::{FragmentList, FragmentListState};
use crate::ui::keymap::Keymap;

const TICK_RATE: Duration = Duration::from_millis(120);
const PAGE: u16 = 10;

/// Primary entry point for running the interactive TUI.
pub struct UiApp {
    keymap: Keymap,
    view: ViewController,
    list_state: FragmentListState,
    detail: FragmentDetail,
    detail_scroll: u16,
    hitboxes: Hitboxes,
    clipboard: Box<dyn CopySink>,
    status: Option<StatusMessage>,
    focus: FocusTarget,
    should_quit: bool,
}

impl UiApp {
    /// Build the app from configuration. Fails when a key binding cannot be parsed.
    pub fn new(config: &Config) -> Result<Self> {
        let keymap = Keymap::from_config(&config.keybindings)?;
        Ok(Self {
            keymap,
            view: ViewController::new(ListSettings::from_config(config)),
            list_state: FragmentListState::default(),
            detail: FragmentDetail {
                show_timestamps: config.display.show_timestamps(),
            },
            detail_scroll: 0,
            hitboxes: Hitboxes::default(),
            clipboard: Box::new(Clipboard::new()),
            status: None,
            focus: FocusTarget::Composer,
            should_quit: false,
        })
    }

    /// Replace the clipboard used by the copy binding.
    pub fn with_clipboard(mut self, clipboard: Box<dyn CopySink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Read-only access to the session state.
    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        ) {
            disable_raw_mode().ok();
            return Err(err).context("failed to enter alternate screen");
        }

        let backend = CrosstermBackend::new(stdout);
        let event_loop_result = Terminal::new(backend)
            .context("failed to initialize terminal")
            .and_then(|mut terminal| {
                terminal.hide_cursor().ok();
                let result = self.event_loop(&mut terminal);
                let _ = terminal.show_cursor();
                result
            });

        disable_raw_mode().ok();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );

        info!(fragments = self.view.store().len(), "session ended");
        event_loop_result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev)?;
            }
        }
        Ok(())
    }

    /// Draw the active screen.
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        self.hitboxes = Hitboxes::default();
        match self.view.screen() {
            Screen::List(props) => {
                let composer_focus = matches!(self.focus, FocusTarget::Composer);
                let composer_height =
                    Composer::height_for(props.draft, layout[0].width, composer_focus);
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(composer_height), Constraint::Min(3)])
                    .split(layout[0]);
                self.hitboxes.composer =
                    Some(Composer.render(frame, chunks[0], props.draft, composer_focus));
                FragmentList.render(
                    frame,
                    chunks[1],
                    &props,
                    &mut self.list_state,
                    !composer_focus,
                );
            }
            Screen::Detail(props) => {
                let width = FragmentDetail::text_width(layout[0]);
                self.detail_scroll = self
                    .detail_scroll
                    .min(FragmentDetail::max_scroll(&props, width));
                self.hitboxes.back =
                    Some(self.detail.render(frame, layout[0], &props, self.detail_scroll));
            }
        }

        let hints = Paragraph::new(self.hint_line())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, layout[1]);

        self.render_status(frame, layout[2]);
    }

    fn hint_line(&self) -> Line<'static> {
        let keys = &self.keymap;
        let pairs: Vec<(String, &str)> = match (self.view.state(), self.focus) {
            (ViewState::Viewing(_), _) => vec![
                (keys.back.to_string(), " back · "),
                (format!("{}/{}", keys.down, keys.up), " scroll · "),
                (keys.copy.to_string(), " copy · "),
                (keys.quit.to_string(), " quit"),
            ],
            (ViewState::Listing, FocusTarget::Composer) => vec![
                (keys.submit.to_string(), " add · "),
                (keys.newline.to_string(), " newline · "),
                (keys.toggle_focus.to_string(), " list · "),
                ("ctrl+c".to_string(), " quit"),
            ],
            (ViewState::Listing, FocusTarget::List) => vec![
                (format!("{}/{}", keys.down, keys.up), " move · "),
                (keys.select.to_string(), " open · "),
                (keys.toggle_focus.to_string(), " write · "),
                (keys.quit.to_string(), " quit"),
            ],
        };

        let mut spans = Vec::with_capacity(pairs.len() * 2);
        for (key, label) in pairs {
            spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(label));
        }
        Line::from(spans)
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let line = match &self.status {
            Some(status) => {
                let style = match status.level {
                    StatusLevel::Success => Style::default().fg(Color::Green),
                    StatusLevel::Error => Style::default().fg(Color::Red),
                };
                Line::styled(status.text.clone(), style)
            }
            None => Line::styled(
                format!("{} fragments", self.view.store().len()),
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn tick(&mut self) {
        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
    }

    /// Route a terminal event to the active screen.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Mouse(mouse) => self.handle_mouse_event(mouse)?,
            Event::Paste(text) => self.handle_paste(text)?,
            Event::Resize(..) | Event::FocusGained | Event::FocusLost => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match (self.view.state(), self.focus) {
            (ViewState::Viewing(_), _) => self.handle_detail_key(key),
            (ViewState::Listing, FocusTarget::Composer) => self.handle_composer_key(key),
            (ViewState::Listing, FocusTarget::List) => self.handle_list_key(key),
        }
    }

    fn handle_composer_key(&mut self, key: KeyEvent) -> Result<()> {
        let keys = &self.keymap;
        if keys.newline.matches(&key) {
            self.apply(Action::Edit(DraftEdit::Newline))?;
        } else if keys.submit.matches(&key) {
            self.submit()?;
        } else if keys.toggle_focus.matches(&key) || key.code == KeyCode::Esc {
            self.focus = FocusTarget::List;
        } else {
            match key.code {
                KeyCode::Backspace => {
                    self.apply(Action::Edit(DraftEdit::Backspace))?;
                }
                KeyCode::Char(ch)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.apply(Action::Edit(DraftEdit::Insert(ch)))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        let keys = &self.keymap;
        let len = self.view.store().len();
        if keys.up.matches(&key) || key.code == KeyCode::Up {
            self.list_state.select_previous(len);
        } else if keys.down.matches(&key) || key.code == KeyCode::Down {
            self.list_state.select_next(len);
        } else if keys.select.matches(&key) {
            self.open_selected()?;
        } else if keys.toggle_focus.matches(&key) {
            self.focus = FocusTarget::Composer;
        } else if keys.quit.matches(&key) {
            self.should_quit = true;
        } else {
            match key.code {
                KeyCode::Home => self.list_state.select_index(0, len),
                KeyCode::End => self.list_state.select_last(len),
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Result<()> {
        let keys = &self.keymap;
        if keys.back.matches(&key) || matches!(key.code, KeyCode::Left | KeyCode::Backspace) {
            self.apply(Action::Back)?;
        } else if keys.up.matches(&key) || key.code == KeyCode::Up {
            self.detail_scroll = self.detail_scroll.saturating_sub(1);
        } else if keys.down.matches(&key) || key.code == KeyCode::Down {
            self.detail_scroll = self.detail_scroll.saturating_add(1);
        } else if keys.copy.matches(&key) {
            self.copy_selected();
        } else if keys.quit.matches(&key) {
            self.should_quit = true;
        } else {
            match key.code {
                KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(PAGE),
                KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(PAGE),
                KeyCode::Home => self.detail_scroll = 0,
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<()> {
        let (column, row) = (mouse.column, mouse.row);
        match (mouse.kind, self.view.state()) {
            (MouseEventKind::Down(MouseButton::Left), ViewState::Listing) => {
                if let Some(composer) = self.hitboxes.composer {
                    if contains(composer.submit, column, row) {
                        self.focus = FocusTarget::Composer;
                        return self.submit();
                    }
                    if contains(composer.input, column, row) {
                        self.focus = FocusTarget::Composer;
                        return Ok(());
                    }
                }
                let fragments = self.view.store().fragments();
                if let Some(id) = self.list_state.id_at(column, row, fragments) {
                    if let Some(index) = self.view.store().position(id) {
                        self.list_state.select_index(index, fragments.len());
                    }
                    self.focus = FocusTarget::List;
                    self.open(id)?;
                }
            }
            (MouseEventKind::Down(MouseButton::Left), ViewState::Viewing(_)) => {
                if self
                    .hitboxes
                    .back
                    .is_some_and(|back| contains(back, column, row))
                {
                    self.apply(Action::Back)?;
                }
            }
            (MouseEventKind::ScrollUp, ViewState::Listing) => {
                self.list_state.select_previous(self.view.store().len());
            }
            (MouseEventKind::ScrollDown, ViewState::Listing) => {
                self.list_state.select_next(self.view.store().len());
            }
            (MouseEventKind::ScrollUp, ViewState::Viewing(_)) => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            (MouseEventKind::ScrollDown, ViewState::Viewing(_)) => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_paste(&mut self, text: String) -> Result<()> {
        if self.view.state() != ViewState::Listing {
            return Ok(());
        }
        self.focus = FocusTarget::Composer;
        self.apply(Action::Edit(DraftEdit::Paste(text)))?;
        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        if let Outcome::Added(id) = self.apply(Action::Submit)? {
            self.list_state.select_last(self.view.store().len());
            self.set_status(StatusLevel::Success, format!("Added fragment {id}"));
        }
        Ok(())
    }

    fn open_selected(&mut self) -> Result<()> {
        match self.list_state.selected_id(self.view.store().fragments()) {
            Some(id) => self.open(id),
            None => Ok(()),
        }
    }

    fn open(&mut self, id: FragmentId) -> Result<()> {
        if let Outcome::Selected(_) = self.apply(Action::Select(id))? {
            self.detail_scroll = 0;
        }
        Ok(())
    }

    fn copy_selected(&mut self) {
        let Some(fragment) = self.view.selected() else {
            return;
        };
        let id = fragment.id();
        match self.clipboard.copy_text(fragment.text()) {
            Ok(()) => {
                self.set_status(StatusLevel::Success, format!("Copied fragment {id}"));
            }
            Err(err) => {
                warn!(%id, error = %err, "copy to clipboard failed");
                self.set_status(StatusLevel::Error, format!("Copy failed: {err}"));
            }
        }
    }

    fn apply(&mut self, action: Action) -> Result<Outcome> {
        let outcome = self
            .view
            .dispatch(action)
            .context("view transition failed")?;
        if outcome == Outcome::Rejected {
            debug!("blank submission ignored");
        }
        Ok(outcome)
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Composer,
    List,
}

/// Clickable regions recorded during the last draw.
#[derive(Debug, Default, Clone, Copy)]
struct Hitboxes {
    composer: Option<ComposerHitbox>,
    back: Option<Rect>,
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + Duration::from_secs(4),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusLevel {
    Success,
    Error,
}
