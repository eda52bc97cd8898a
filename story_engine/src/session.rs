//! The engine session - player state and the operations on it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use world_model::{Action, Blueprint, HookContext, HookOutcome, Id, World};

use crate::config::EngineConfig;
use crate::effect::{self, Applied};
use crate::errors::EngineError;

/// Version reported to clients in the handshake.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fallback messages for common failure cases, used when an item or
/// blueprint does not override them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageDefaults {
    /// Said when an item is used but defines no behavior.
    #[serde(rename = "use")]
    pub use_item: Option<String>,

    /// Said when an item cannot be used.
    pub failed_use: Option<String>,

    /// Said when an item cannot be picked up.
    pub failed_pickup: Option<String>,

    /// Said when two items cannot be combined.
    pub failed_combine: Option<String>,
}

/// The title card shown before the game starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intro {
    pub title: String,
    pub image: Option<String>,
}

/// A single player's engine state.
///
/// Explicitly constructed and passed by reference - there is no ambient
/// global. The session owns the [`World`] and is the only place the
/// current room and inventory live; hook-driven mutation reaches them
/// exclusively through the effect interpreter.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    name: String,
    description: Option<String>,
    version: Option<String>,
    author: Option<String>,
    world: World,
    current_room: Option<Id>,
    previous_room: Option<Id>,
    starting_room: Option<Id>,
    inventory: Vec<Id>,
    defaults: MessageDefaults,
    intro: Option<Intro>,
    started: bool,
}

impl Session {
    /// Create a session for a game with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            version: None,
            author: None,
            world: World::new(),
            current_room: None,
            previous_room: None,
            starting_room: None,
            inventory: Vec::new(),
            defaults: MessageDefaults::default(),
            intro: None,
            started: false,
        }
    }

    /// Build a session from a parsed configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        let mut session = Session::new(config.name);
        session.description = config.description;
        session.version = config.version;
        session.author = config.author;
        session.defaults = config.messages;
        session.intro = config.intro;
        session
    }

    /// Set the game description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the game version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the author name.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the default failure messages.
    pub fn with_defaults(mut self, defaults: MessageDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the intro screen.
    pub fn with_intro(mut self, intro: Intro) -> Self {
        self.intro = Some(intro);
        self
    }

    /// The session's unique id, reported in the handshake.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The game name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The game description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The game version.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The author name.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// The intro screen, if configured.
    pub fn intro(&self) -> Option<&Intro> {
        self.intro.as_ref()
    }

    /// The default failure messages.
    pub fn defaults(&self) -> &MessageDefaults {
        &self.defaults
    }

    /// The content graph.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the content graph, for declarations and hook
    /// registration.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Where the player is.
    pub fn current_room(&self) -> Option<&Id> {
        self.current_room.as_ref()
    }

    /// Where the player was before the last move.
    pub fn previous_room(&self) -> Option<&Id> {
        self.previous_room.as_ref()
    }

    /// The configured starting room.
    pub fn starting_room(&self) -> Option<&Id> {
        self.starting_room.as_ref()
    }

    /// Items held by the player, in pickup order.
    pub fn inventory(&self) -> &[Id] {
        &self.inventory
    }

    /// True once `start()` has run.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Build the read-only view handed to hooks.
    pub fn hook_context<'a>(&'a self, subject: &'a Id) -> HookContext<'a> {
        HookContext {
            world: &self.world,
            inventory: &self.inventory,
            current_room: self.current_room.as_ref(),
            subject,
        }
    }

    /// Choose the room the player starts in. Must happen before
    /// [`Session::start`].
    pub fn set_starting_point(&mut self, room: &str) -> Result<(), EngineError> {
        let id = self.world.room_id(room)?;

        if self.starting_room.is_some() {
            log::warn!("starting room was already set, overwriting");
        }
        self.starting_room = Some(id);
        Ok(())
    }

    /// Finalize the content graph and place the player in the starting
    /// room. Content errors (unresolved references) abort here.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let start = self
            .starting_room
            .clone()
            .ok_or(EngineError::StartingRoomMissing)?;

        self.world.finalize()?;
        self.current_room = Some(start);
        self.started = true;

        log::info!("session {} started", self.id);
        Ok(())
    }

    /// Move the player to another room.
    ///
    /// Dispatches the *target* room's `enter` hook (default: allow);
    /// unless the hook denies, the room pointers swap. Returns the raw
    /// hook outcome - callers route it through the effect interpreter.
    pub fn walk_to(&mut self, room: &str) -> Result<HookOutcome, EngineError> {
        let current = self.current_room.clone().ok_or(EngineError::NotStarted)?;
        let target = self.world.room_id(room)?;

        let outcome = {
            let ctx = self.hook_context(&target);
            self.world
                .room(&target)?
                .events()
                .dispatch("enter", &ctx)?
                .unwrap_or_else(HookOutcome::allow)
        };

        if !outcome.is_deny() {
            self.previous_room = Some(current);
            self.current_room = Some(target);
        }

        Ok(outcome)
    }

    /// Find the blueprint matching two items, if any. Pure lookup;
    /// symmetric in its arguments.
    pub fn combine(&self, item1: &str, item2: &str) -> Result<Option<&Blueprint>, EngineError> {
        let a = self.world.item_id(item1)?;
        let b = self.world.item_id(item2)?;
        Ok(self.world.matching_blueprint(&a, &b)?)
    }

    /// The full crafting sequence: find a blueprint, confirm it through
    /// its `combine` hook, and only then commit - remove both
    /// ingredients and add the result. No partial mutation happens when
    /// confirmation denies.
    ///
    /// Returns the interpreter result plus the blueprint's result item.
    pub fn craft(&mut self, item1: &str, item2: &str) -> Result<(Applied, Id), EngineError> {
        let a = self.world.item_id(item1)?;
        let b = self.world.item_id(item2)?;

        let (bp_id, result, bp_message) = {
            let blueprint = self
                .world
                .matching_blueprint(&a, &b)?
                .ok_or_else(|| EngineError::NoSuchBlueprint(a.clone(), b.clone()))?;
            (
                blueprint.id().clone(),
                blueprint.result().clone(),
                blueprint.message().map(str::to_string),
            )
        };

        let outcome = {
            let ctx = self.hook_context(&bp_id);
            self.world
                .blueprint(&bp_id)?
                .events()
                .dispatch("combine", &ctx)?
                .unwrap_or_else(|| HookOutcome::Allow(bp_message.clone()))
        };

        let mut applied = effect::interpret(self, outcome)?;
        if applied.allowed {
            self.remove_from_inventory(&a);
            self.remove_from_inventory(&b);
            self.add_to_inventory(result.clone())?;
            if applied.message.is_none() {
                applied.message = bp_message;
            }
        } else if applied.message.is_none() {
            applied.message = self.defaults.failed_combine.clone();
        }

        Ok((applied, result))
    }

    /// Use an item: dispatch its `use` hook and interpret the outcome.
    /// Default when unbound: allow with the configured `use` message.
    pub fn use_item(&mut self, item: &str) -> Result<Applied, EngineError> {
        let id = self.world.item_id(item)?;

        let outcome = {
            let ctx = self.hook_context(&id);
            self.world
                .item(&id)?
                .events()
                .dispatch("use", &ctx)?
                .unwrap_or_else(|| HookOutcome::Allow(self.defaults.use_item.clone()))
        };

        let mut applied = effect::interpret(self, outcome)?;
        if !applied.allowed && applied.message.is_none() {
            applied.message = self.defaults.failed_use.clone();
        }
        Ok(applied)
    }

    /// Pick up an item: dispatch its `pickup` hook and interpret the
    /// outcome. Default when unbound: collect it into the inventory.
    pub fn pickup_item(&mut self, item: &str) -> Result<Applied, EngineError> {
        let id = self.world.item_id(item)?;

        let outcome = {
            let ctx = self.hook_context(&id);
            self.world
                .item(&id)?
                .events()
                .dispatch("pickup", &ctx)?
                .unwrap_or_else(|| HookOutcome::act(Action::add_to_inventory(&id)))
        };

        let mut applied = effect::interpret(self, outcome)?;
        if !applied.allowed && applied.message.is_none() {
            applied.message = self.defaults.failed_pickup.clone();
        }
        Ok(applied)
    }

    /// The current room, failing before `start()`.
    pub fn current_room_id(&self) -> Result<&Id, EngineError> {
        self.current_room.as_ref().ok_or(EngineError::NotStarted)
    }

    /// The room's initial-entry message, honoring a `message` override.
    /// Without an override the stored message is returned once and the
    /// entered flag flips.
    pub fn entry_message(&mut self, room: &Id) -> Result<Option<String>, EngineError> {
        let overridden = {
            let ctx = self.hook_context(room);
            self.world.room(room)?.events().string_override("message", &ctx)
        };

        if let Some(message) = overridden {
            return Ok(Some(message));
        }

        Ok(self.world.room_mut(room)?.take_entry_message())
    }

    /// Idempotent inventory append. Interpreter-only.
    pub(crate) fn add_to_inventory(&mut self, item: Id) -> Result<(), EngineError> {
        self.world.item(&item)?;

        if !self.inventory.contains(&item) {
            self.inventory.push(item);
        }
        Ok(())
    }

    /// Idempotent inventory removal; absent items are a no-op.
    /// Interpreter-only.
    pub(crate) fn remove_from_inventory(&mut self, item: &Id) {
        self.inventory.retain(|held| held != item);
    }
}
