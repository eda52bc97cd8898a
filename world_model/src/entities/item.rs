//! Item definitions.

use crate::events::{EventManager, HookContext};
use crate::ids::Id;

/// Events recognized by every item. `pickup` and `use` are lifecycle
/// hooks; the rest are getter overrides.
pub const ITEM_EVENTS: &[&str] = &["pickup", "use", "name", "description", "blueprints"];

/// A collectible object.
///
/// Items are created once at content-load time and never destroyed;
/// inventory membership is tracked on the session, not on the item.
/// Equality is identifier-based.
#[derive(Debug)]
pub struct Item {
    pub(crate) id: Id,
    pub(crate) requested_id: Option<String>,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) blueprints: Vec<Id>,
    pub(crate) events: EventManager,
}

impl Item {
    /// Create a new item with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Id::default(),
            requested_id: None,
            events: EventManager::new(&name, ITEM_EVENTS),
            name,
            description: None,
            blueprints: Vec::new(),
        }
    }

    /// Set the plain-text description.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Request a specific id instead of one generated from the name.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.requested_id = Some(id.into());
        self
    }

    /// The item's unique id (assigned at registration).
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// The stored display name (ignores overrides).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored description (ignores overrides).
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Blueprints this item participates in, in registration order.
    pub fn blueprints(&self) -> &[Id] {
        &self.blueprints
    }

    /// The item's hook table.
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    /// Mutable access to the hook table, for handler registration.
    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Display name, honoring a `name` getter override.
    pub fn display_name(&self, ctx: &HookContext<'_>) -> String {
        self.events
            .string_override("name", ctx)
            .unwrap_or_else(|| self.name.clone())
    }

    /// Description, honoring a `description` getter override.
    pub fn display_description(&self, ctx: &HookContext<'_>) -> Option<String> {
        self.events
            .string_override("description", ctx)
            .or_else(|| self.description.clone())
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_identifier_based() {
        let mut a = Item::new("Flint").with_description("a sharp stone");
        let mut b = Item::new("Flint");

        a.id = Id::new("flint");
        b.id = Id::new("flint");
        assert_eq!(a, b);

        b.id = Id::new("flint1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_builder() {
        let item = Item::new("Wood").with_description("dry branches").with_id("wood");

        assert_eq!(item.name(), "Wood");
        assert_eq!(item.description(), Some("dry branches"));
        assert_eq!(item.requested_id.as_deref(), Some("wood"));
        assert!(item.blueprints().is_empty());
    }
}
