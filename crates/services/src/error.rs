//! Shared error types for the services crate.

use thiserror::Error;

use crate::content::ContentError;

/// Errors emitted while setting up a practice attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error(transparent)]
    Content(#[from] ContentError),
}
