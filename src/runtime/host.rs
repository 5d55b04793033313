//! Host bridge
//!
//! The engine never talks to a concrete game or application world
//! directly. Everything environment-specific (player lookup, entity
//! positions, the material vocabulary) goes through the [`Host`]
//! trait, injected into the root frame at startup. [`SimHost`] is the
//! in-memory implementation used by the CLI, the REPL, and tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use super::value::{EntityId, ItemStack, Location, Player};

/// Environment lookups injected into the engine
pub trait Host: Send + Sync {
    /// Resolve an online player by exact name
    fn player_exact(&self, name: &str) -> Option<Player>;

    /// Current position of an entity, if it exists
    fn entity_position(&self, entity: EntityId) -> Option<Location>;

    /// The item carried by a world item entity, if it is one
    fn item_of_entity(&self, entity: EntityId) -> Option<ItemStack>;

    /// Canonical material id for a name, case-insensitive
    fn material(&self, name: &str) -> Option<String>;
}

/// In-memory host for embedding tests and the CLI
#[derive(Default)]
pub struct SimHost {
    players: RwLock<HashMap<String, Player>>,
    positions: RwLock<HashMap<EntityId, Location>>,
    items: RwLock<HashMap<EntityId, ItemStack>>,
    materials: RwLock<HashSet<String>>,
    next_entity: RwLock<u64>,
}

impl SimHost {
    /// Empty host with the standard material vocabulary
    pub fn new() -> Self {
        let host = Self::default();
        for material in [
            "stone",
            "dirt",
            "grass_block",
            "oak_log",
            "iron_ingot",
            "gold_ingot",
            "diamond",
            "apple",
            "bread",
            "torch",
        ] {
            host.register_material(material);
        }
        host
    }

    /// Shared handle, ready to hand to a root frame
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a material id
    pub fn register_material(&self, name: &str) {
        self.materials.write().insert(name.to_ascii_lowercase());
    }

    /// Add an online player standing at `position`; returns its handle
    pub fn add_player(&self, name: &str, position: Location) -> Player {
        let entity = self.allocate_entity();
        let player = Player {
            entity,
            name: name.to_string(),
            online: true,
        };
        self.players.write().insert(name.to_string(), player.clone());
        self.positions.write().insert(entity, position);
        player
    }

    /// Drop a world item entity carrying `item`; returns its id
    pub fn drop_item(&self, item: ItemStack, position: Location) -> EntityId {
        let entity = self.allocate_entity();
        self.items.write().insert(entity, item);
        self.positions.write().insert(entity, position);
        entity
    }

    /// Mark a player offline, keeping its record
    pub fn disconnect(&self, name: &str) {
        if let Some(player) = self.players.write().get_mut(name) {
            player.online = false;
        }
    }

    fn allocate_entity(&self) -> EntityId {
        let mut next = self.next_entity.write();
        *next += 1;
        EntityId(*next)
    }
}

impl Host for SimHost {
    fn player_exact(&self, name: &str) -> Option<Player> {
        self.players
            .read()
            .get(name)
            .filter(|p| p.online)
            .cloned()
    }

    fn entity_position(&self, entity: EntityId) -> Option<Location> {
        self.positions.read().get(&entity).cloned()
    }

    fn item_of_entity(&self, entity: EntityId) -> Option<ItemStack> {
        self.items.read().get(&entity).cloned()
    }

    fn material(&self, name: &str) -> Option<String> {
        let id = name.to_ascii_lowercase();
        self.materials.read().get(&id).cloned()
    }
}
