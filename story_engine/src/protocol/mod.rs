//! The request/response protocol spoken with the transport collaborator.
//!
//! The core consumes a structured [`Request`] and produces exactly one
//! [`Response`] per request; the host owns the socket and the JSON
//! framing around these envelopes.

mod dispatch;
mod wire;

pub use dispatch::*;
pub use wire::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether an inbound message is a protocol event or a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Event,
    Action,
}

/// An inbound request from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub kind: RequestKind,

    /// Operation name, namespaced by `/` (e.g. `room/enter`).
    pub name: String,

    /// Opaque correlation id, echoed back verbatim.
    #[serde(default)]
    pub request_id: Value,

    /// Operation arguments.
    #[serde(default)]
    pub payload: Value,
}

/// Response status classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Forbidden,
    Missing,
    Error,
}

/// The reply sent back over the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: Status,
    pub data: Value,
    pub request_id: Value,
}

impl Response {
    /// Build a response, echoing the request's correlation id.
    pub fn new(status: Status, data: Value, request_id: Value) -> Self {
        Self {
            status,
            data,
            request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope() {
        let request: Request = serde_json::from_value(json!({
            "kind": "action",
            "name": "room/enter",
            "requestId": 7,
            "payload": {"room": "cave"},
        }))
        .unwrap();

        assert_eq!(request.kind, RequestKind::Action);
        assert_eq!(request.name, "room/enter");
        assert_eq!(request.request_id, json!(7));
        assert_eq!(request.payload["room"], "cave");
    }

    #[test]
    fn test_request_defaults() {
        let request: Request = serde_json::from_value(json!({
            "kind": "event",
            "name": "game/handshake",
        }))
        .unwrap();

        assert_eq!(request.request_id, Value::Null);
        assert_eq!(request.payload, Value::Null);
    }

    #[test]
    fn test_response_envelope() {
        let response = Response::new(Status::Forbidden, json!({"message": "locked"}), json!(7));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "forbidden",
                "data": {"message": "locked"},
                "requestId": 7,
            })
        );
    }
}
