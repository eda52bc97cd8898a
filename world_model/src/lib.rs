//! # World Model
//!
//! The content graph for the Loom narrative engine: rooms, items and
//! crafting blueprints, the per-entity hook tables authors override, and
//! the two-phase loader that turns forward references into a resolved
//! graph.
//!
//! ## Core Components
//!
//! - **ids**: one global namespace of unique string identifiers
//! - **entities**: Room, Item and Blueprint definitions
//! - **description**: narrative text with embedded `{room|id}` / `{item|id}` references
//! - **events**: per-entity capability tables of named lifecycle hooks
//! - **action**: the uniform effect value hooks return to request state changes
//! - **world**: the arena owning all entities, with the one-time finalize pass
//!
//! ## Design Philosophy
//!
//! - **Two-phase construction**: authors declare content in any order; a
//!   single explicit finalize pass validates every reference
//! - **Hooks request, the engine applies**: author logic never mutates
//!   state directly - every change travels through an [`Action`]

pub mod action;
pub mod description;
pub mod entities;
pub mod errors;
pub mod events;
pub mod ids;
pub mod world;

pub use action::*;
pub use description::*;
pub use entities::*;
pub use errors::*;
pub use events::*;
pub use ids::*;
pub use world::*;
