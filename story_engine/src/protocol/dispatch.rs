//! Operation dispatch - routes inbound requests onto the session.
//!
//! This is the catch boundary: every request produces exactly one
//! response, and no domain error crosses into the transport unhandled.

use serde_json::{json, Value};

use world_model::WorldError;

use crate::effect::{self, Applied};
use crate::errors::EngineError;
use crate::protocol::{wire, Request, RequestKind, Response, Status};
use crate::session::{Session, ENGINE_VERSION};

/// Handle one inbound request to completion.
///
/// Requests are processed strictly one at a time (`&mut Session`); the
/// ordering seen by the player equals the arrival order at this
/// boundary.
pub fn handle_request(session: &mut Session, request: Request) -> Response {
    let request_id = request.request_id.clone();

    let result = match request.kind {
        RequestKind::Event => handle_event(session, &request.name, &request.payload),
        RequestKind::Action => handle_action(session, &request.name, &request.payload),
    };

    match result {
        Ok((status, data)) => Response::new(status, data, request_id),
        Err(err) => Response::new(
            status_for(&err),
            json!({"message": err.to_string()}),
            request_id,
        ),
    }
}

/// Map a domain error onto a response status.
fn status_for(err: &EngineError) -> Status {
    match err {
        EngineError::World(WorldError::IdMissing(_)) | EngineError::NoSuchBlueprint(_, _) => {
            Status::Missing
        }
        _ => Status::Error,
    }
}

fn handle_event(
    session: &mut Session,
    name: &str,
    payload: &Value,
) -> Result<(Status, Value), EngineError> {
    match name {
        "game/handshake" => {
            let ui_version = payload.get("uiVersion").and_then(Value::as_str);
            log::info!("client connected with uiVersion {:?}", ui_version);

            Ok((
                Status::Ok,
                json!({
                    "engineVersion": ENGINE_VERSION,
                    "author": session.author(),
                    "name": session.name(),
                    "description": session.description(),
                    "sessionId": session.id(),
                }),
            ))
        }

        other => {
            log::warn!("no such event: {}", other);
            Ok((
                Status::Error,
                json!({"message": format!("no such event: {other}")}),
            ))
        }
    }
}

fn handle_action(
    session: &mut Session,
    name: &str,
    payload: &Value,
) -> Result<(Status, Value), EngineError> {
    match name {
        "room/get" => {
            let id = session.current_room_id()?.clone();
            Ok((Status::Ok, wire::room_tree(session, &id)?))
        }

        "room/get/description" => {
            let id = session.current_room_id()?.clone();
            let room = session.world().room(&id)?;
            Ok((Status::Ok, wire::description_tree(session, room.description())?))
        }

        "room/get/locations" => {
            let id = session.current_room_id()?.clone();
            Ok((
                Status::Ok,
                json!({"locations": wire::locations_tree(session, &id)?}),
            ))
        }

        "room/get/name" => {
            let id = session.current_room_id()?.clone();
            let ctx = session.hook_context(&id);
            let room = session.world().room(&id)?;
            Ok((Status::Ok, json!({"name": room.display_name(&ctx)})))
        }

        "room/get/image" => {
            let id = session.current_room_id()?.clone();
            let ctx = session.hook_context(&id);
            let room = session.world().room(&id)?;
            Ok((Status::Ok, json!({"image": room.display_image(&ctx)})))
        }

        "room/enter" => {
            let room = str_field(payload, "room")?;
            let outcome = session.walk_to(room)?;
            let applied = effect::interpret(session, outcome)?;

            if !applied.allowed {
                return Ok(forbidden(applied));
            }

            let id = session.current_room_id()?.clone();
            Ok((Status::Ok, wire::room_tree(session, &id)?))
        }

        "room/use/description" => {
            let target = str_field(payload, "item")?;

            if session.world().has_item(target) {
                let applied = session.pickup_item(target)?;
                return Ok(respond_applied(applied));
            }

            // Not an item: the reference points at a room, so walk there.
            let outcome = session.walk_to(target)?;
            let applied = effect::interpret(session, outcome)?;
            if !applied.allowed {
                return Ok(forbidden(applied));
            }

            let id = session.current_room_id()?.clone();
            let message = session.entry_message(&id)?;
            Ok((
                Status::Ok,
                json!({"action": "move_to", "object": id, "message": message}),
            ))
        }

        "game/get/inventory" | "inventory/get" => Ok((
            Status::Ok,
            json!({"inventory": wire::inventory_tree(session)?}),
        )),

        "game/get/intro" => match session.intro() {
            Some(intro) => Ok((
                Status::Ok,
                json!({"title": intro.title, "image": intro.image}),
            )),
            None => Ok((Status::Missing, Value::Null)),
        },

        "inventory/use" => {
            let item = str_field(payload, "item")?;
            let applied = session.use_item(item)?;
            Ok(respond_applied(applied))
        }

        "inventory/combine" => {
            let (a, b) = item_pair(payload)?;
            let (applied, result) = session.craft(a, b)?;

            if !applied.allowed {
                return Ok(forbidden(applied));
            }

            Ok((
                Status::Ok,
                json!({
                    "item": wire::item_tree(session, &result)?,
                    "message": applied.message,
                }),
            ))
        }

        "item/get" => {
            let id = str_field(payload, "id")?;
            let key = session.world().item_id(id)?;
            Ok((Status::Ok, json!({"item": wire::item_tree(session, &key)?})))
        }

        other => {
            log::warn!("no such action: {}", other);
            Ok((
                Status::Error,
                json!({"message": format!("no such action: {other}")}),
            ))
        }
    }
}

fn forbidden(applied: Applied) -> (Status, Value) {
    (Status::Forbidden, json!({"message": applied.message}))
}

fn respond_applied(applied: Applied) -> (Status, Value) {
    if applied.allowed {
        (Status::Ok, applied.to_fragment())
    } else {
        forbidden(applied)
    }
}

fn str_field<'a>(payload: &'a Value, key: &str) -> Result<&'a str, EngineError> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::BadRequest(format!("missing field '{key}'")))
}

fn item_pair(payload: &Value) -> Result<(&str, &str), EngineError> {
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| EngineError::BadRequest("missing field 'items'".to_string()))?;

    match items.as_slice() {
        [a, b] => match (a.as_str(), b.as_str()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(EngineError::BadRequest(
                "'items' must hold two item ids".to_string(),
            )),
        },
        _ => Err(EngineError::BadRequest(
            "'items' must hold exactly two ids".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_model::{Blueprint, HookOutcome, Item, Room};

    fn action(name: &str, payload: Value) -> Request {
        Request {
            kind: RequestKind::Action,
            name: name.to_string(),
            request_id: json!(1),
            payload,
        }
    }

    fn session_fixture() -> Session {
        let mut session = Session::new("The Hollow Hills")
            .with_author("J. Doe")
            .with_description("A short cave crawl.");
        let world = session.world_mut();
        world
            .add_room(
                Room::new("Meadow")
                    .with_id("meadow")
                    .with_description("the {item|flint} glints near the {room|cave}")
                    .with_location("cave"),
            )
            .unwrap();
        world
            .add_room(
                Room::new("Cave")
                    .with_id("cave")
                    .with_initial_message("It is dark here.")
                    .with_location("meadow"),
            )
            .unwrap();
        world.add_item(Item::new("flint").with_id("flint")).unwrap();
        world.add_item(Item::new("wood").with_id("wood")).unwrap();
        world.add_item(Item::new("torch").with_id("torch")).unwrap();
        world
            .add_blueprint(Blueprint::new("flint", "wood", "torch").with_message("A torch!"))
            .unwrap();
        session.set_starting_point("meadow").unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn test_handshake() {
        let mut session = session_fixture();
        let request = Request {
            kind: RequestKind::Event,
            name: "game/handshake".to_string(),
            request_id: json!("abc"),
            payload: json!({"uiVersion": "1.0"}),
        };

        let response = handle_request(&mut session, request);

        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.request_id, json!("abc"));
        assert_eq!(response.data["engineVersion"], ENGINE_VERSION);
        assert_eq!(response.data["author"], "J. Doe");
        assert_eq!(response.data["name"], "The Hollow Hills");
    }

    #[test]
    fn test_room_get() {
        let mut session = session_fixture();

        let response = handle_request(&mut session, action("room/get", Value::Null));

        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.data["id"], "meadow");
        assert_eq!(response.data["description"]["items"]["flint"]["id"], "flint");
    }

    #[test]
    fn test_room_enter_moves_and_reports() {
        let mut session = session_fixture();

        let response =
            handle_request(&mut session, action("room/enter", json!({"room": "cave"})));

        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.data["id"], "cave");
        assert_eq!(response.data["msg"], "It is dark here.");
    }

    #[test]
    fn test_room_enter_locked_is_forbidden() {
        let mut session = session_fixture();
        session
            .world_mut()
            .room_mut(&world_model::Id::new("cave"))
            .unwrap()
            .events_mut()
            .on("enter", |_| HookOutcome::deny("locked"))
            .unwrap();

        let response =
            handle_request(&mut session, action("room/enter", json!({"room": "cave"})));

        assert_eq!(response.status, Status::Forbidden);
        assert_eq!(response.data["message"], "locked");
        assert_eq!(session.current_room(), Some(&world_model::Id::new("meadow")));
    }

    #[test]
    fn test_room_enter_unknown_is_missing() {
        let mut session = session_fixture();

        let response =
            handle_request(&mut session, action("room/enter", json!({"room": "atlantis"})));

        assert_eq!(response.status, Status::Missing);
    }

    #[test]
    fn test_combine_crafts_torch() {
        let mut session = session_fixture();
        handle_request(
            &mut session,
            action("room/use/description", json!({"item": "flint"})),
        );
        handle_request(
            &mut session,
            action("room/use/description", json!({"item": "wood"})),
        );

        let response = handle_request(
            &mut session,
            action("inventory/combine", json!({"items": ["flint", "wood"]})),
        );

        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.data["item"]["id"], "torch");
        assert_eq!(response.data["message"], "A torch!");

        let inventory = handle_request(&mut session, action("inventory/get", Value::Null));
        assert_eq!(
            inventory.data["inventory"],
            json!([{"name": "torch", "description": Value::Null, "id": "torch"}])
        );
    }

    #[test]
    fn test_combine_without_blueprint_is_missing() {
        let mut session = session_fixture();

        let response = handle_request(
            &mut session,
            action("inventory/combine", json!({"items": ["flint", "torch"]})),
        );

        assert_eq!(response.status, Status::Missing);
    }

    #[test]
    fn test_use_description_falls_back_to_room() {
        let mut session = session_fixture();

        let response = handle_request(
            &mut session,
            action("room/use/description", json!({"item": "cave"})),
        );

        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.data["action"], "move_to");
        assert_eq!(response.data["object"], "cave");
        assert_eq!(response.data["message"], "It is dark here.");
        assert_eq!(session.current_room(), Some(&world_model::Id::new("cave")));
    }

    #[test]
    fn test_item_get() {
        let mut session = session_fixture();

        let response = handle_request(&mut session, action("item/get", json!({"id": "flint"})));

        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.data["item"]["id"], "flint");
    }

    #[test]
    fn test_item_get_unknown_is_missing() {
        let mut session = session_fixture();

        let response = handle_request(&mut session, action("item/get", json!({"id": "ruby"})));

        assert_eq!(response.status, Status::Missing);
    }

    #[test]
    fn test_intro_missing_when_unset() {
        let mut session = session_fixture();

        let response = handle_request(&mut session, action("game/get/intro", Value::Null));
        assert_eq!(response.status, Status::Missing);
    }

    #[test]
    fn test_unknown_action_is_error() {
        let mut session = session_fixture();

        let response = handle_request(&mut session, action("game/quit", Value::Null));

        assert_eq!(response.status, Status::Error);
        assert_eq!(response.data["message"], "no such action: game/quit");
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let mut session = session_fixture();

        let response = handle_request(&mut session, action("room/enter", Value::Null));

        assert_eq!(response.status, Status::Error);
    }
}
