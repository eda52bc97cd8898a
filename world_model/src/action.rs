//! Effects - the uniform state-mutation requests a hook may return.

use serde::{Deserialize, Serialize};

use crate::ids::Id;

/// A requested state change beyond "allow/deny plus message".
///
/// The same value is applied to the session by the effect interpreter and
/// serialized onto the wire as `{"action": "...", "object": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "object", rename_all = "snake_case")]
pub enum Action {
    /// Put an item into the player's inventory.
    AddToInventory(Id),

    /// Take items out of the player's inventory.
    RemoveFromInventory(Vec<Id>),

    /// Move the player to another room.
    MoveTo(Id),

    /// No state change; the message still propagates.
    Nothing,
}

impl Action {
    /// Request that an item is added to the inventory.
    pub fn add_to_inventory(item: &Id) -> Self {
        Action::AddToInventory(item.clone())
    }

    /// Request that items are removed from the inventory.
    pub fn remove_from_inventory(items: impl IntoIterator<Item = Id>) -> Self {
        Action::RemoveFromInventory(items.into_iter().collect())
    }

    /// Request a move to another room.
    pub fn move_to(room: &Id) -> Self {
        Action::MoveTo(room.clone())
    }

    /// Request nothing.
    pub fn nothing() -> Self {
        Action::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let action = Action::add_to_inventory(&Id::new("torch"));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "add_to_inventory", "object": "torch"})
        );

        let action = Action::move_to(&Id::new("cave"));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "move_to", "object": "cave"})
        );
    }

    #[test]
    fn test_remove_carries_ordered_set() {
        let action =
            Action::remove_from_inventory([Id::new("flint"), Id::new("wood")]);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"action": "remove_from_inventory", "object": ["flint", "wood"]})
        );
    }

    #[test]
    fn test_roundtrip() {
        let action = Action::nothing();
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(serde_json::from_value::<Action>(value).unwrap(), action);
    }
}
