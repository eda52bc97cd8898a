//! The world arena - every entity, the id registry, and the finalize pass.

use std::collections::HashMap;
use std::mem;

use crate::entities::{Blueprint, EntityRef, Item, Room};
use crate::errors::WorldError;
use crate::ids::{Id, IdRegistry};

/// The complete content graph.
///
/// Entities are added in author-declaration order; forward references by
/// id are legal until [`World::finalize`] runs, after which every stored
/// reference is a validated key.
#[derive(Debug, Default)]
pub struct World {
    registry: IdRegistry,
    rooms: HashMap<Id, Room>,
    items: HashMap<Id, Item>,
    blueprints: HashMap<Id, Blueprint>,
    /// Rooms in declaration order, so finalize is deterministic.
    room_order: Vec<Id>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room, assigning its id (and its description's id).
    ///
    /// The id is the requested one when given (`DuplicateId` if taken),
    /// otherwise generated from the room name.
    pub fn add_room(&mut self, mut room: Room) -> Result<Id, WorldError> {
        let id = match room.requested_id.take() {
            Some(requested) => self.registry.claim(&requested)?,
            None => self.registry.generate(&room.name),
        };

        room.id = id.clone();
        room.description.id = self.registry.generate("description");

        log::debug!("room '{}' added", id);
        self.room_order.push(id.clone());
        self.rooms.insert(id.clone(), room);
        Ok(id)
    }

    /// Register an item, assigning its id.
    pub fn add_item(&mut self, mut item: Item) -> Result<Id, WorldError> {
        let id = match item.requested_id.take() {
            Some(requested) => self.registry.claim(&requested)?,
            None => self.registry.generate(&item.name),
        };

        item.id = id.clone();

        log::debug!("item '{}' added", id);
        self.items.insert(id.clone(), item);
        Ok(id)
    }

    /// Register a blueprint.
    ///
    /// Both ingredients and the result must already exist (`IdMissing`
    /// otherwise); the blueprint id is pushed onto both ingredients'
    /// lists so a match can be found from either side.
    pub fn add_blueprint(&mut self, mut blueprint: Blueprint) -> Result<Id, WorldError> {
        let name1 = self.item(&blueprint.item1)?.name.clone();
        let name2 = self.item(&blueprint.item2)?.name.clone();
        self.item(&blueprint.result)?;

        let id = match blueprint.requested_id.take() {
            Some(requested) => self.registry.claim(&requested)?,
            None => self.registry.generate(&format!("{name1}-{name2}")),
        };

        blueprint.id = id.clone();

        if let Some(item) = self.items.get_mut(&blueprint.item1) {
            item.blueprints.push(id.clone());
        }
        if blueprint.item1 != blueprint.item2 {
            if let Some(item) = self.items.get_mut(&blueprint.item2) {
                item.blueprints.push(id.clone());
            }
        }

        log::debug!("blueprint '{}' added", id);
        self.blueprints.insert(id.clone(), blueprint);
        Ok(id)
    }

    /// Look up a room, failing with `IdMissing`.
    pub fn room(&self, id: &Id) -> Result<&Room, WorldError> {
        self.rooms
            .get(id)
            .ok_or_else(|| WorldError::IdMissing(id.to_string()))
    }

    /// Mutable room lookup.
    pub fn room_mut(&mut self, id: &Id) -> Result<&mut Room, WorldError> {
        self.rooms
            .get_mut(id)
            .ok_or_else(|| WorldError::IdMissing(id.to_string()))
    }

    /// Look up an item, failing with `IdMissing`.
    pub fn item(&self, id: &Id) -> Result<&Item, WorldError> {
        self.items
            .get(id)
            .ok_or_else(|| WorldError::IdMissing(id.to_string()))
    }

    /// Mutable item lookup.
    pub fn item_mut(&mut self, id: &Id) -> Result<&mut Item, WorldError> {
        self.items
            .get_mut(id)
            .ok_or_else(|| WorldError::IdMissing(id.to_string()))
    }

    /// Look up a blueprint, failing with `IdMissing`.
    pub fn blueprint(&self, id: &Id) -> Result<&Blueprint, WorldError> {
        self.blueprints
            .get(id)
            .ok_or_else(|| WorldError::IdMissing(id.to_string()))
    }

    /// Mutable blueprint lookup.
    pub fn blueprint_mut(&mut self, id: &Id) -> Result<&mut Blueprint, WorldError> {
        self.blueprints
            .get_mut(id)
            .ok_or_else(|| WorldError::IdMissing(id.to_string()))
    }

    /// Validate a room id string into a key.
    pub fn room_id(&self, id: &str) -> Result<Id, WorldError> {
        let key = Id::new(id);
        if self.rooms.contains_key(&key) {
            Ok(key)
        } else {
            Err(WorldError::IdMissing(id.to_string()))
        }
    }

    /// Validate an item id string into a key.
    pub fn item_id(&self, id: &str) -> Result<Id, WorldError> {
        let key = Id::new(id);
        if self.items.contains_key(&key) {
            Ok(key)
        } else {
            Err(WorldError::IdMissing(id.to_string()))
        }
    }

    /// True when a room with this id exists.
    pub fn has_room(&self, id: &str) -> bool {
        self.rooms.contains_key(&Id::new(id))
    }

    /// True when an item with this id exists.
    pub fn has_item(&self, id: &str) -> bool {
        self.items.contains_key(&Id::new(id))
    }

    /// Rooms in declaration order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.room_order.iter().filter_map(|id| self.rooms.get(id))
    }

    /// Number of registered rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of registered items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Find the blueprint matching an item pair.
    ///
    /// Searches `b`'s blueprint list first, then `a`'s; the first
    /// structural match wins. The order is declaration-dependent but
    /// stable.
    pub fn matching_blueprint(&self, a: &Id, b: &Id) -> Result<Option<&Blueprint>, WorldError> {
        let item_a = self.item(a)?;
        let item_b = self.item(b)?;

        for bp_id in item_b.blueprints.iter().chain(item_a.blueprints.iter()) {
            if let Some(bp) = self.blueprints.get(bp_id) {
                if bp.matches(a, b) {
                    return Ok(Some(bp));
                }
            }
        }

        Ok(None)
    }

    /// Resolve every pending reference to a live entity.
    ///
    /// Runs over all rooms in declaration order, rewriting pending
    /// location references and description queues into validated keys.
    /// An id that never resolves fails with `IdMissing` and aborts
    /// startup. Idempotent: already-resolved references are skipped.
    pub fn finalize(&mut self) -> Result<(), WorldError> {
        let order = self.room_order.clone();

        for room_id in order {
            log::debug!("finalizing '{}'", room_id);

            let (locations, pending_rooms, pending_items) = {
                let room = self.room_mut(&room_id)?;
                (
                    mem::take(&mut room.locations),
                    mem::take(&mut room.description.pending_rooms),
                    mem::take(&mut room.description.pending_items),
                )
            };

            let mut resolved_locations = Vec::with_capacity(locations.len());
            for location in locations {
                match location {
                    EntityRef::Resolved(id) => resolved_locations.push(EntityRef::Resolved(id)),
                    EntityRef::Pending(name) => {
                        let id = self.room_id(&name)?;
                        resolved_locations.push(EntityRef::Resolved(id));
                    }
                }
            }

            let mut desc_rooms = Vec::with_capacity(pending_rooms.len());
            for name in pending_rooms {
                desc_rooms.push(self.room_id(&name)?);
            }

            let mut desc_items = Vec::with_capacity(pending_items.len());
            for name in pending_items {
                desc_items.push(self.item_id(&name)?);
            }

            let room = self.room_mut(&room_id)?;
            room.locations = resolved_locations;
            room.description.rooms.extend(desc_rooms);
            room.description.items.extend(desc_items);
        }

        Ok(())
    }
}
