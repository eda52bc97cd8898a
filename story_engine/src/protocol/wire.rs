//! Wire serialization - flattened object trees for rooms, items and
//! descriptions.

use serde_json::{json, Map, Value};

use world_model::{Description, Id};

use crate::errors::EngineError;
use crate::session::Session;

/// Serialize a room as `{name, description, msg, image, sound, id}`.
///
/// Takes the session mutably because reading the entry message consumes
/// it (the entered flag flips on first read).
pub fn room_tree(session: &mut Session, room_id: &Id) -> Result<Value, EngineError> {
    let msg = session.entry_message(room_id)?;

    let ctx = session.hook_context(room_id);
    let room = session.world().room(room_id)?;

    let name = room.display_name(&ctx);
    let image = room.display_image(&ctx);
    let sound = room.display_sound(&ctx);
    let description = {
        let mut tree = description_tree(session, room.description())?;
        if let Some(text) = room.events().string_override("description", &ctx) {
            tree["text"] = json!(text);
        }
        tree
    };

    Ok(json!({
        "name": name,
        "description": description,
        "msg": msg,
        "image": image,
        "sound": sound,
        "id": room_id,
    }))
}

/// Serialize a description as
/// `{text, rooms: {id -> {name, id}}, items: {id -> {name, description, id}}, id}`.
pub fn description_tree(session: &Session, desc: &Description) -> Result<Value, EngineError> {
    let mut rooms = Map::new();
    for room_id in desc.rooms() {
        let ctx = session.hook_context(room_id);
        let room = session.world().room(room_id)?;
        rooms.insert(
            room_id.to_string(),
            json!({"name": room.display_name(&ctx), "id": room_id}),
        );
    }

    let mut items = Map::new();
    for item_id in desc.items() {
        items.insert(item_id.to_string(), item_tree(session, item_id)?);
    }

    Ok(json!({
        "text": desc.text(),
        "rooms": rooms,
        "items": items,
        "id": desc.id(),
    }))
}

/// Serialize an item as `{name, description, id}`.
pub fn item_tree(session: &Session, item_id: &Id) -> Result<Value, EngineError> {
    let ctx = session.hook_context(item_id);
    let item = session.world().item(item_id)?;

    Ok(json!({
        "name": item.display_name(&ctx),
        "description": item.display_description(&ctx),
        "id": item_id,
    }))
}

/// Serialize a room's reachable locations as `[{name, id}, ...]`.
pub fn locations_tree(session: &Session, room_id: &Id) -> Result<Value, EngineError> {
    let ctx = session.hook_context(room_id);
    let room = session.world().room(room_id)?;

    let mut locations = Vec::new();
    for id in room.reachable(&ctx)? {
        let target_ctx = session.hook_context(&id);
        let target = session.world().room(&id)?;
        locations.push(json!({"name": target.display_name(&target_ctx), "id": id}));
    }

    Ok(Value::Array(locations))
}

/// Serialize the player's inventory as a list of item trees.
pub fn inventory_tree(session: &Session) -> Result<Value, EngineError> {
    let mut items = Vec::with_capacity(session.inventory().len());
    for item_id in session.inventory() {
        items.push(item_tree(session, item_id)?);
    }
    Ok(Value::Array(items))
}
