//! Lifecycle hooks - per-entity tables of named, optionally overridden events.
//!
//! Every entity carries an [`EventManager`] with a fixed set of recognized
//! event names for its kind. Authors bind at most one handler per name via
//! [`EventManager::on`]; dispatching an unbound-but-declared event yields
//! `None` so the caller can fall back to the default behavior.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::action::Action;
use crate::errors::WorldError;
use crate::ids::Id;
use crate::world::World;

/// What a hook may answer.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// The operation is allowed; no state change requested.
    Allow(Option<String>),

    /// The operation is denied; the caller must not apply the transition.
    Deny(Option<String>),

    /// The operation is allowed and requests a state change.
    Act(Action, Option<String>),

    /// A replacement value for a getter event.
    Value(Value),
}

impl HookOutcome {
    /// Plain allow with no message.
    pub fn allow() -> Self {
        HookOutcome::Allow(None)
    }

    /// Allow with a message.
    pub fn allow_with(message: impl Into<String>) -> Self {
        HookOutcome::Allow(Some(message.into()))
    }

    /// Deny with a message.
    pub fn deny(message: impl Into<String>) -> Self {
        HookOutcome::Deny(Some(message.into()))
    }

    /// Allow with a requested state change.
    pub fn act(action: Action) -> Self {
        HookOutcome::Act(action, None)
    }

    /// The attached message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            HookOutcome::Allow(msg) | HookOutcome::Deny(msg) | HookOutcome::Act(_, msg) => {
                msg.as_deref()
            }
            HookOutcome::Value(_) => None,
        }
    }

    /// True for a denial.
    pub fn is_deny(&self) -> bool {
        matches!(self, HookOutcome::Deny(_))
    }
}

/// Read-only view handed to a hook.
///
/// Hooks never mutate engine state directly; every requested change travels
/// back through the returned [`HookOutcome`].
pub struct HookContext<'a> {
    /// The full content graph.
    pub world: &'a World,

    /// Items currently held by the player, in pickup order.
    pub inventory: &'a [Id],

    /// Where the player is right now (`None` before the session starts).
    pub current_room: Option<&'a Id>,

    /// The entity the event fires on.
    pub subject: &'a Id,
}

/// An author-supplied hook function.
pub type Hook = Box<dyn Fn(&HookContext<'_>) -> HookOutcome + Send + Sync>;

/// Capability table mapping declared event names to optional overrides.
pub struct EventManager {
    owner: String,
    declared: &'static [&'static str],
    handlers: HashMap<&'static str, Hook>,
}

impl EventManager {
    /// Create a manager for `owner` with a fixed set of recognized events.
    pub fn new(owner: impl Into<String>, declared: &'static [&'static str]) -> Self {
        Self {
            owner: owner.into(),
            declared,
            handlers: HashMap::new(),
        }
    }

    /// Bind a handler to a declared event.
    ///
    /// The name is validated at registration time; rebinding an event
    /// overwrites the previous handler with a warning, since multiple
    /// authors may patch the same hook during iterative development.
    pub fn on<F>(&mut self, event: &str, handler: F) -> Result<(), WorldError>
    where
        F: Fn(&HookContext<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        let key = self
            .declared
            .iter()
            .copied()
            .find(|declared| *declared == event)
            .ok_or_else(|| WorldError::EventMissing(event.to_string()))?;

        if self.handlers.insert(key, Box::new(handler)).is_some() {
            log::warn!(
                "'{}' handler for {} was already registered, overwriting",
                event,
                self.owner
            );
        } else {
            log::info!("'{}' handler registered for {}", event, self.owner);
        }

        Ok(())
    }

    /// Dispatch an event.
    ///
    /// Returns `Ok(None)` when the event is declared but unbound - the
    /// sentinel that tells the caller to use default behavior.
    pub fn dispatch(
        &self,
        event: &str,
        ctx: &HookContext<'_>,
    ) -> Result<Option<HookOutcome>, WorldError> {
        if !self.declared.contains(&event) {
            return Err(WorldError::EventMissing(event.to_string()));
        }

        Ok(self.handlers.get(event).map(|hook| hook(ctx)))
    }

    /// True when a handler is bound to `event`.
    pub fn bound(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Dispatch a getter event, expecting a raw JSON value override.
    ///
    /// Non-`Value` outcomes are logged and ignored so a misbehaving getter
    /// hook degrades to the stored value instead of corrupting a read.
    pub fn value_override(&self, event: &str, ctx: &HookContext<'_>) -> Option<Value> {
        match self.dispatch(event, ctx) {
            Ok(Some(HookOutcome::Value(value))) => Some(value),
            Ok(Some(_)) => {
                log::warn!(
                    "'{}' override for {} did not return a value, ignoring",
                    event,
                    self.owner
                );
                None
            }
            Ok(None) => None,
            Err(err) => {
                log::error!("getter dispatch failed for {}: {}", self.owner, err);
                None
            }
        }
    }

    /// Dispatch a getter event, expecting a string override.
    pub fn string_override(&self, event: &str, ctx: &HookContext<'_>) -> Option<String> {
        match self.value_override(event, ctx) {
            Some(Value::String(text)) => Some(text),
            Some(_) => {
                log::warn!(
                    "'{}' override for {} returned a non-string value, ignoring",
                    event,
                    self.owner
                );
                None
            }
            None => None,
        }
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<&str> = self.handlers.keys().copied().collect();
        bound.sort_unstable();

        f.debug_struct("EventManager")
            .field("owner", &self.owner)
            .field("declared", &self.declared)
            .field("bound", &bound)
            .finish()
    }
}
