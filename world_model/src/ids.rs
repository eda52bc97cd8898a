//! Identifier allocation - a single namespace shared by every entity kind.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::WorldError;

/// Unique string identifier for rooms, items, blueprints and descriptions.
///
/// Ids are opaque once issued: no two live entities of any kind share one,
/// and they are never released for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Allocator for the global id namespace.
///
/// Generation is deterministic under a fixed call order: content declared
/// in the same order always receives the same ids, which keeps authored
/// bundles reproducible.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    used: HashSet<String>,
}

impl IdRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id based on `preferred`.
    ///
    /// Returns `preferred` itself when free, otherwise the first free
    /// candidate in the sequence `preferred1`, `preferred2`, ...
    pub fn generate(&mut self, preferred: &str) -> Id {
        if self.used.insert(preferred.to_string()) {
            return Id::new(preferred);
        }

        let mut n: u64 = 1;
        loop {
            let candidate = format!("{preferred}{n}");
            if self.used.insert(candidate.clone()) {
                return Id::new(candidate);
            }
            n += 1;
        }
    }

    /// Register an author-chosen id verbatim.
    pub fn claim(&mut self, id: &str) -> Result<Id, WorldError> {
        if !self.used.insert(id.to_string()) {
            return Err(WorldError::DuplicateId(id.to_string()));
        }
        Ok(Id::new(id))
    }

    /// Check whether an id is already taken.
    pub fn exists(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Number of issued ids.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// True when no id has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
