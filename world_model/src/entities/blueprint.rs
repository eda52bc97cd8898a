//! Blueprint definitions - crafting rules.

use crate::events::EventManager;
use crate::ids::Id;

/// Events recognized by every blueprint.
pub const BLUEPRINT_EVENTS: &[&str] = &["combine"];

/// A crafting rule pairing two ingredient items with one result item.
///
/// Ingredients and result are resolved eagerly when the blueprint is
/// registered - the items must already exist - and registration pushes
/// the blueprint onto both ingredients' lists so a match can be found
/// from either side.
#[derive(Debug)]
pub struct Blueprint {
    pub(crate) id: Id,
    pub(crate) requested_id: Option<String>,
    pub(crate) item1: Id,
    pub(crate) item2: Id,
    pub(crate) result: Id,
    pub(crate) message: Option<String>,
    pub(crate) events: EventManager,
}

impl Blueprint {
    /// Create a new blueprint from two ingredient ids and a result id.
    pub fn new(
        item1: impl Into<String>,
        item2: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        let item1 = Id::new(item1);
        let item2 = Id::new(item2);
        Self {
            id: Id::default(),
            requested_id: None,
            events: EventManager::new(format!("{item1}-{item2}"), BLUEPRINT_EVENTS),
            item1,
            item2,
            result: Id::new(result),
            message: None,
        }
    }

    /// Set the message shown when the combination succeeds.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Request a specific id instead of one generated from the
    /// ingredient names.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.requested_id = Some(id.into());
        self
    }

    /// The blueprint's unique id (assigned at registration).
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// First ingredient.
    pub fn item1(&self) -> &Id {
        &self.item1
    }

    /// Second ingredient.
    pub fn item2(&self) -> &Id {
        &self.item2
    }

    /// The crafted result.
    pub fn result(&self) -> &Id {
        &self.result
    }

    /// The success message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The blueprint's hook table.
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    /// Mutable access to the hook table, for handler registration.
    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// True iff `{a, b}` set-equals the ingredient pair, order-independent.
    pub fn matches(&self, a: &Id, b: &Id) -> bool {
        (&self.item1 == a && &self.item2 == b) || (&self.item1 == b && &self.item2 == a)
    }
}
