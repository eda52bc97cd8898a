//! The effect interpreter - the single choke point through which all
//! hook-driven mutation flows.
//!
//! Every hook outcome passes through [`interpret`] before anything else
//! happens: it is the only code path allowed to touch the inventory or
//! the current room on behalf of a hook.

use serde_json::{json, Value};

use world_model::{Action, HookOutcome};

use crate::errors::EngineError;
use crate::session::Session;

/// The result of interpreting a hook outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// False when the hook denied the operation; the caller must not
    /// apply the requested transition.
    pub allowed: bool,

    /// Message to propagate to the player.
    pub message: Option<String>,

    /// The action that was applied, for the wire.
    pub action: Option<Action>,
}

impl Applied {
    /// Serialize as a response fragment: the action's
    /// `{"action", "object"}` pair merged with the message.
    pub fn to_fragment(&self) -> Value {
        let mut fragment = match &self.action {
            Some(action) => {
                serde_json::to_value(action).unwrap_or_else(|_| json!({}))
            }
            None => json!({}),
        };

        if let Value::Object(map) = &mut fragment {
            map.insert("message".to_string(), json!(self.message));
        }
        fragment
    }
}

/// Apply a hook outcome to the session.
///
/// - `Allow(msg)` - success, no state change.
/// - `Deny(msg)` - denial; no state change, `allowed` is false.
/// - `Act(AddToInventory, msg)` - idempotent inventory append.
/// - `Act(RemoveFromInventory, msg)` - idempotent per-item removal.
/// - `Act(MoveTo, msg)` - recurses through `walk_to`; success is
///   whatever the move reports.
/// - `Act(Nothing, msg)` - success, message only.
/// - `Value(..)` - a getter value leaked into a lifecycle hook; fails
///   with `BadHookResult`.
pub fn interpret(session: &mut Session, outcome: HookOutcome) -> Result<Applied, EngineError> {
    match outcome {
        HookOutcome::Allow(message) => Ok(Applied {
            allowed: true,
            message,
            action: None,
        }),

        HookOutcome::Deny(message) => Ok(Applied {
            allowed: false,
            message,
            action: None,
        }),

        HookOutcome::Act(action, message) => apply_action(session, action, message),

        HookOutcome::Value(_) => Err(EngineError::BadHookResult),
    }
}

fn apply_action(
    session: &mut Session,
    action: Action,
    message: Option<String>,
) -> Result<Applied, EngineError> {
    match &action {
        Action::AddToInventory(item) => {
            session.add_to_inventory(item.clone())?;
        }

        Action::RemoveFromInventory(items) => {
            for item in items {
                session.remove_from_inventory(item);
            }
        }

        Action::MoveTo(room) => {
            let target = room.to_string();
            let outcome = session.walk_to(&target)?;
            let inner = interpret(session, outcome)?;
            return Ok(Applied {
                allowed: inner.allowed,
                message: inner.message.or(message),
                action: Some(action),
            });
        }

        Action::Nothing => {}
    }

    Ok(Applied {
        allowed: true,
        message,
        action: Some(action),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_model::{Id, Item, Room};

    fn session_fixture() -> Session {
        let mut session = Session::new("test game");
        let world = session.world_mut();
        world
            .add_room(Room::new("Meadow").with_id("meadow").with_location("cave"))
            .unwrap();
        world.add_room(Room::new("Cave").with_id("cave")).unwrap();
        world.add_item(Item::new("coin").with_id("coin")).unwrap();
        session.set_starting_point("meadow").unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn test_allow_changes_nothing() {
        let mut session = session_fixture();

        let applied =
            interpret(&mut session, HookOutcome::allow_with("fine")).unwrap();

        assert!(applied.allowed);
        assert_eq!(applied.message.as_deref(), Some("fine"));
        assert!(applied.action.is_none());
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn test_deny_flags_the_caller() {
        let mut session = session_fixture();

        let applied = interpret(&mut session, HookOutcome::deny("locked")).unwrap();

        assert!(!applied.allowed);
        assert_eq!(applied.message.as_deref(), Some("locked"));
    }

    #[test]
    fn test_add_to_inventory_is_idempotent() {
        let mut session = session_fixture();
        let coin = Id::new("coin");

        interpret(&mut session, HookOutcome::act(Action::add_to_inventory(&coin))).unwrap();
        interpret(&mut session, HookOutcome::act(Action::add_to_inventory(&coin))).unwrap();

        assert_eq!(session.inventory(), &[coin]);
    }

    #[test]
    fn test_remove_handles_duplicates_and_absentees() {
        let mut session = session_fixture();
        let coin = Id::new("coin");
        interpret(&mut session, HookOutcome::act(Action::add_to_inventory(&coin))).unwrap();

        // Removing [coin, coin] ends with coin absent; repeating the
        // removal on an empty inventory stays a no-op.
        let remove = Action::remove_from_inventory([coin.clone(), coin.clone()]);
        interpret(&mut session, HookOutcome::act(remove.clone())).unwrap();
        let applied = interpret(&mut session, HookOutcome::act(remove)).unwrap();

        assert!(applied.allowed);
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn test_move_to_recurses_into_walk() {
        let mut session = session_fixture();
        let cave = Id::new("cave");

        let applied =
            interpret(&mut session, HookOutcome::act(Action::move_to(&cave))).unwrap();

        assert!(applied.allowed);
        assert_eq!(applied.action, Some(Action::move_to(&cave)));
        assert_eq!(session.current_room(), Some(&cave));
    }

    #[test]
    fn test_getter_value_in_lifecycle_position_fails() {
        let mut session = session_fixture();

        let result = interpret(&mut session, HookOutcome::Value(json!("oops")));
        assert!(matches!(result, Err(EngineError::BadHookResult)));
    }

    #[test]
    fn test_fragment_merges_action_and_message() {
        let applied = Applied {
            allowed: true,
            message: Some("taken".to_string()),
            action: Some(Action::add_to_inventory(&Id::new("coin"))),
        };

        assert_eq!(
            applied.to_fragment(),
            json!({"action": "add_to_inventory", "object": "coin", "message": "taken"})
        );
    }
}
