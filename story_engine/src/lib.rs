//! # Story Engine
//!
//! The runtime half of the Loom narrative engine: it owns a
//! [`Session`] around a `world_model` content graph and executes player
//! operations against it.
//!
//! ## Core Components
//!
//! - **Session**: per-player state (current room, inventory) plus the
//!   operations on it: walking, picking up, using, crafting.
//! - **Effect interpreter**: the single choke point that applies hook
//!   outcomes to the session.
//! - **Config**: game metadata and default messages, parsed from TOML.
//! - **Protocol**: the request/response envelopes and the dispatcher
//!   that routes named operations onto a session.
//!
//! ## Design Philosophy
//!
//! The engine core is transport-agnostic. It consumes one structured
//! request at a time and produces exactly one response; sockets and
//! framing belong to the host. All hook-driven mutation flows through
//! the interpreter, so denial means nothing changed.
//!
//! ```
//! use story_engine::{Session, protocol::{handle_request, Request, RequestKind, Status}};
//! use world_model::Room;
//! use serde_json::{json, Value};
//!
//! let mut session = Session::new("demo");
//! session.world_mut().add_room(Room::new("Meadow").with_id("meadow")).unwrap();
//! session.set_starting_point("meadow").unwrap();
//! session.start().unwrap();
//!
//! let response = handle_request(&mut session, Request {
//!     kind: RequestKind::Action,
//!     name: "room/get".to_string(),
//!     request_id: json!(1),
//!     payload: Value::Null,
//! });
//! assert_eq!(response.status, Status::Ok);
//! ```

pub mod config;
pub mod effect;
pub mod errors;
pub mod protocol;
pub mod session;

pub use config::EngineConfig;
pub use effect::{interpret, Applied};
pub use errors::EngineError;
pub use session::{Intro, MessageDefaults, Session, ENGINE_VERSION};
