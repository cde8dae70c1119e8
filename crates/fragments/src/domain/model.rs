//! Domain models for fragments and their identifiers.

use std::fmt;

use time::OffsetDateTime;

/// Identifier assigned to a fragment when it is created.
///
/// Identifiers come from a per-store counter and are never reused, so two fragments created in
/// the same session always compare unequal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FragmentId(u64);

impl FragmentId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single block of user-submitted text.
///
/// Fields are private: once a fragment exists its id and text never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    id: FragmentId,
    text: String,
    created_at: OffsetDateTime,
}

impl Fragment {
    pub(crate) fn new(id: FragmentId, text: String, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            text,
            created_at,
        }
    }

    pub fn id(&self) -> FragmentId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wall-clock time the fragment was submitted. Only used for display.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
