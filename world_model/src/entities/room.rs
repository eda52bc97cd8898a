//! Room definitions.

use serde_json::Value;

use super::EntityRef;
use crate::description::Description;
use crate::errors::WorldError;
use crate::events::{EventManager, HookContext};
use crate::ids::Id;

/// Events recognized by every room.
///
/// `enter` decides entry permission; `leave` is declared for authors but
/// movement only consults the target room's `enter` hook. The rest are
/// getter overrides.
pub const ROOM_EVENTS: &[&str] = &[
    "enter",
    "leave",
    "description",
    "message",
    "name",
    "locations",
    "image",
    "sound",
];

/// A place the player can stand in.
///
/// Built with `Room::new(..).with_*(..)` and registered through
/// `World::add_room`, which assigns the id.
#[derive(Debug)]
pub struct Room {
    pub(crate) id: Id,
    pub(crate) requested_id: Option<String>,
    pub(crate) name: String,
    pub(crate) description: Description,
    pub(crate) initial_message: Option<String>,
    pub(crate) locations: Vec<EntityRef>,
    pub(crate) image: Option<String>,
    pub(crate) sound: Option<String>,
    pub(crate) entered: bool,
    pub(crate) events: EventManager,
}

impl Room {
    /// Create a new room with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Id::default(),
            requested_id: None,
            events: EventManager::new(&name, ROOM_EVENTS),
            name,
            description: Description::new(""),
            initial_message: None,
            locations: Vec::new(),
            image: None,
            sound: None,
            entered: false,
        }
    }

    /// Set the narrative description (may embed `{room|id}` / `{item|id}`
    /// tokens).
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Description::new(text);
        self
    }

    /// Set the message shown the first time the player enters.
    pub fn with_initial_message(mut self, message: impl Into<String>) -> Self {
        self.initial_message = Some(message.into());
        self
    }

    /// Add a reachable room by id. The target does not have to exist yet.
    pub fn with_location(mut self, room: impl Into<String>) -> Self {
        self.locations.push(EntityRef::Pending(room.into()));
        self
    }

    /// Set the image shown for this room.
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Set the sound played in this room.
    pub fn with_sound(mut self, path: impl Into<String>) -> Self {
        self.sound = Some(path.into());
        self
    }

    /// Request a specific id instead of one generated from the name.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.requested_id = Some(id.into());
        self
    }

    /// The room's unique id (assigned at registration).
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// The stored display name (ignores overrides).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The structured description.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// The stored image path (ignores overrides).
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// The stored sound path (ignores overrides).
    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    /// The room's hook table.
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

    /// Image path, honoring an `image` getter override.
    pub fn display_image(&self, ctx: &HookContext<'_>) -> Option<String> {
        self.events
            .string_override("image", ctx)
            .or_else(|| self.image.clone())
    }

    /// Sound path, honoring a `sound` getter override.
    pub fn display_sound(&self, ctx: &HookContext<'_>) -> Option<String> {
        self.events
            .string_override("sound", ctx)
            .or_else(|| self.sound.clone())
    }

    /// Reachable rooms, honoring a `locations` getter override.
    ///
    /// An override must be an array of known room ids; anything else is
    /// logged and the stored list is used. Fails with `IdMissing` when a
    /// stored reference was never resolved (finalize did not run).
    pub fn reachable(&self, ctx: &HookContext<'_>) -> Result<Vec<Id>, WorldError> {
        if let Some(value) = self.events.value_override("locations", ctx) {
            if let Some(ids) = parse_location_override(&value, ctx) {
                return Ok(ids);
            }
            log::warn!(
                "'locations' override for {} is not a list of room ids, ignoring",
                self.id
            );
        }

        self.locations
            .iter()
            .map(|loc| match loc {
                EntityRef::Resolved(id) => Ok(id.clone()),
                EntityRef::Pending(name) => Err(WorldError::IdMissing(name.clone())),
            })
            .collect()
    }

    /// Return the initial-entry message once, flipping the entered flag.
    pub fn take_entry_message(&mut self) -> Option<String> {
        if self.entered {
            None
        } else {
            self.entered = true;
            self.initial_message.clone()
        }
    }

    /// True once the entry message has been consumed.
    pub fn entered(&self) -> bool {
        self.entered
    }
}

fn parse_location_override(value: &Value, ctx: &HookContext<'_>) -> Option<Vec<Id>> {
    let entries = value.as_array()?;

    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = entry.as_str()?;
        if !ctx.world.has_room(id) {
            return None;
        }
        ids.push(Id::new(id));
    }

    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_captures_pending_locations() {
        let room = Room::new("Cave")
            .with_description("a dark cave")
            .with_location("meadow")
            .with_location("tunnel");

        assert_eq!(
            room.locations,
            vec![
                EntityRef::Pending("meadow".to_string()),
                EntityRef::Pending("tunnel".to_string()),
            ]
        );
    }

    #[test]
    fn test_entry_message_is_read_once() {
        let mut room = Room::new("Cave").with_initial_message("It is dark here.");

        assert!(!room.entered());
        assert_eq!(room.take_entry_message().as_deref(), Some("It is dark here."));
        assert!(room.entered());
        assert_eq!(room.take_entry_message(), None);
    }

    #[test]
    fn test_entry_message_absent() {
        let mut room = Room::new("Cave");
        assert_eq!(room.take_entry_message(), None);
        // Reading still flips the flag
        assert!(room.entered());
    }
}
