//! List/detail view state machine.
//!
//! [`ViewController`] owns the whole session: the fragment store, the input draft and which
//! screen is showing. It is only mutated through [`ViewController::dispatch`] (or the matching
//! named operations) and exposes read-only [`Screen`] props for rendering.

use tracing::debug;

use crate::app::display::{DEFAULT_ELLIPSIS, DEFAULT_PREVIEW_CHARS};
use crate::app::store::FragmentStore;
use crate::domain::errors::DomainError;
use crate::domain::model::{Fragment, FragmentId};
use crate::infra::config::Config;

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Listing,
    Viewing(FragmentId),
}

/// User intents the controller understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add the current draft as a fragment.
    Submit,
    /// Open the fragment in the detail view.
    Select(FragmentId),
    /// Return from the detail view to the list.
    Back,
    /// Edit the input draft.
    Edit(DraftEdit),
}

/// Modifications to the input draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Insert(char),
    Newline,
    Backspace,
    Paste(String),
}

/// Result of dispatching an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A fragment was appended and the draft cleared.
    Added(FragmentId),
    /// The draft was blank; nothing changed.
    Rejected,
    /// The detail view now shows this fragment.
    Selected(FragmentId),
    /// The list view is showing again.
    Returned,
    /// The draft changed.
    Edited,
    /// The action does not apply to the current state.
    Ignored,
}

/// Display settings the controller passes through to the list props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    pub preview_chars: usize,
    pub ellipsis: String,
    pub empty_message: String,
}

impl ListSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            preview_chars: config.display.preview_chars(),
            ellipsis: config.display.ellipsis(),
            empty_message: config.display.empty_message(),
        }
    }
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
            ellipsis: DEFAULT_ELLIPSIS.to_owned(),
            empty_message: "No text fragments yet. Add one above!".to_owned(),
        }
    }
}

/// Props for rendering the list screen.
#[derive(Debug, Clone, Copy)]
pub struct ListProps<'a> {
    pub fragments: &'a [Fragment],
    pub draft: &'a str,
    pub preview_chars: usize,
    pub ellipsis: &'a str,
    pub empty_message: &'a str,
}

/// Props for rendering the detail screen.
#[derive(Debug, Clone, Copy)]
pub struct DetailProps<'a> {
    pub fragment: &'a Fragment,
}

/// Everything a renderer needs for the current state.
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    List(ListProps<'a>),
    Detail(DetailProps<'a>),
}

/// Session-wide UI state.
#[derive(Debug, Default, Clone)]
pub struct ViewController {
    store: FragmentStore,
    state: ViewState,
    draft: String,
    settings: ListSettings,
}

impl ViewController {
    /// Start in the list view with an empty store.
    pub fn new(settings: ListSettings) -> Self {
        Self {
            store: FragmentStore::new(),
            state: ViewState::Listing,
            draft: String::new(),
            settings,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    /// Current contents of the input box.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The fragment shown in the detail view, if any.
    pub fn selected(&self) -> Option<&Fragment> {
        match self.state {
            ViewState::Listing => None,
            ViewState::Viewing(id) => self.store.get(id),
        }
    }

    /// Apply an action and report what changed.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, DomainError> {
        let outcome = match action {
            Action::Submit => Ok(self.submit()),
            Action::Select(id) => self.select(id),
            Action::Back => Ok(self.back()),
            Action::Edit(edit) => Ok(self.edit(edit)),
        }?;
        if !matches!(outcome, Outcome::Edited | Outcome::Ignored) {
            debug!(?outcome, state = ?self.state, "view transition");
        }
        Ok(outcome)
    }

    /// Add the draft to the store. The draft is cleared only when a fragment was created.
    pub fn submit(&mut self) -> Outcome {
        if self.state != ViewState::Listing {
            return Outcome::Ignored;
        }
        match self.store.add_fragment(&self.draft).map(Fragment::id) {
            Some(id) => {
                self.draft.clear();
                Outcome::Added(id)
            }
            None => Outcome::Rejected,
        }
    }

    /// Switch to the detail view for `id`.
    pub fn select(&mut self, id: FragmentId) -> Result<Outcome, DomainError> {
        if self.state != ViewState::Listing {
            return Ok(Outcome::Ignored);
        }
        if self.store.get(id).is_none() {
            return Err(DomainError::UnknownFragment(id));
        }
        self.state = ViewState::Viewing(id);
        Ok(Outcome::Selected(id))
    }

    /// Leave the detail view. Nothing in the store or the draft changes.
    pub fn back(&mut self) -> Outcome {
        match self.state {
            ViewState::Viewing(_) => {
                self.state = ViewState::Listing;
                Outcome::Returned
            }
            ViewState::Listing => Outcome::Ignored,
        }
    }

    /// Modify the draft. The detail view is read-only, so edits there are ignored.
    pub fn edit(&mut self, edit: DraftEdit) -> Outcome {
        if self.state != ViewState::Listing {
            return Outcome::Ignored;
        }
        match edit {
            DraftEdit::Insert(ch) => self.draft.push(ch),
            DraftEdit::Newline => self.draft.push('\n'),
            DraftEdit::Backspace => {
                if self.draft.pop().is_none() {
                    return Outcome::Ignored;
                }
            }
            DraftEdit::Paste(text) => {
                if text.is_empty() {
                    return Outcome::Ignored;
                }
                self.draft.push_str(&normalize_newlines(&text));
            }
        }
        Outcome::Edited
    }

    /// Render props for the active screen.
    pub fn screen(&self) -> Screen<'_> {
        if let Some(fragment) = self.selected() {
            return Screen::Detail(DetailProps { fragment });
        }
        Screen::List(ListProps {
            fragments: self.store.fragments(),
            draft: &self.draft,
            preview_chars: self.settings.preview_chars,
            ellipsis: &self.settings.ellipsis,
            empty_message: &self.settings.empty_message,
        })
    }
}

/// Terminals deliver pasted line breaks as `\r` or `\r\n`.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
