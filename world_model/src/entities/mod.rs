//! Entity definitions for the content graph.

mod blueprint;
mod item;
mod room;

pub use blueprint::*;
pub use item::*;
pub use room::*;

use crate::ids::Id;

/// Reference to another entity, possibly declared later.
///
/// Authors may wire entities together by id before the target exists; the
/// world's finalize pass rewrites every `Pending` into a validated
/// `Resolved` key. Nothing `Pending` survives a successful finalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    /// An id string waiting for resolution.
    Pending(String),

    /// A key validated to exist in the world.
    Resolved(Id),
}

impl EntityRef {
    /// The validated key, if this reference has been resolved.
    pub fn resolved(&self) -> Option<&Id> {
        match self {
            EntityRef::Resolved(id) => Some(id),
            EntityRef::Pending(_) => None,
        }
    }

    /// True once the reference points at a live entity.
    pub fn is_resolved(&self) -> bool {
        matches!(self, EntityRef::Resolved(_))
    }
}
