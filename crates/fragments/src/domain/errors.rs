//! Domain-specific errors.

use thiserror::Error;

use crate::domain::model::FragmentId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no fragment with id {0}")]
    UnknownFragment(FragmentId),
}
