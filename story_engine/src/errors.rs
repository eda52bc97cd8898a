//! Error types for the engine core.

use thiserror::Error;
use world_model::{Id, WorldError};

/// Errors raised by session operations and the request dispatcher.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A content-graph error (missing id, duplicate id, undeclared event).
    #[error(transparent)]
    World(#[from] WorldError),

    /// No blueprint combines the given item pair. Surfaced as a
    /// `missing` response, never fatal.
    #[error("no blueprint combines '{0}' and '{1}'")]
    NoSuchBlueprint(Id, Id),

    /// An operation that needs a current room ran before `start()`.
    #[error("the session has not started yet")]
    NotStarted,

    /// `start()` was called without a starting room.
    #[error("no starting room was set")]
    StartingRoomMissing,

    /// A hook returned a getter value where a lifecycle outcome was
    /// expected. An authoring bug.
    #[error("a hook returned a value where an outcome was expected")]
    BadHookResult,

    /// An inbound payload was missing a field or had the wrong shape.
    #[error("malformed payload: {0}")]
    BadRequest(String),

    /// The engine configuration failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
