//! Append-only fragment collection.

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::model::{Fragment, FragmentId};

/// Hands out fragment identifiers from a monotonic counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Produce the next identifier. Never repeats within one generator.
    pub fn next_id(&mut self) -> FragmentId {
        let id = FragmentId::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds every fragment created in the session, oldest first.
///
/// There are deliberately no update or removal operations: fragments live until the store is
/// dropped.
#[derive(Debug, Default, Clone)]
pub struct FragmentStore {
    fragments: Vec<Fragment>,
    ids: IdGenerator,
}

impl FragmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fragments in the collection.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether no fragment has been added yet.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// All fragments in insertion order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Look up a fragment by id.
    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.iter().find(|fragment| fragment.id() == id)
    }

    /// Index of the fragment with the given id within [`Self::fragments`].
    pub fn position(&self, id: FragmentId) -> Option<usize> {
        self.fragments.iter().position(|fragment| fragment.id() == id)
    }

    /// Append a fragment built from `raw`.
    ///
    /// Leading and trailing whitespace is stripped. Input that is blank after trimming is
    /// rejected silently and `None` is returned; the collection is left untouched.
    pub fn add_fragment(&mut self, raw: &str) -> Option<&Fragment> {
        let text = raw.trim();
        if text.is_empty() {
            debug!("ignoring blank fragment submission");
            return None;
        }

        let id = self.ids.next_id();
        let fragment = Fragment::new(id, text.to_owned(), OffsetDateTime::now_utc());
        info!(%id, chars = text.chars().count(), "fragment added");
        self.fragments.push(fragment);
        self.fragments.last()
    }
}
