//! Error types for the content graph.

use thiserror::Error;

/// Structural errors raised while building or resolving the content graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A referenced id does not resolve to a live entity.
    ///
    /// Fatal when raised by the finalize pass (a content-authoring bug);
    /// recoverable as a "missing" response during live lookups.
    #[error("no such id: {0}")]
    IdMissing(String),

    /// An author-chosen id collides with one that is already registered.
    #[error("object with id '{0}' already exists")]
    DuplicateId(String),

    /// Registration or dispatch named a hook outside the declared set.
    /// Always a programming error.
    #[error("'{0}' is not a recognized event")]
    EventMissing(String),
}
