//! Satchel Inventory - Slot Containers and Item Routing
//!
//! Inventory core for games where items live in fixed, index-addressed slots.
//!
//! # Features
//!
//! - Item definitions with tags, attributes and triggered effects
//! - Item catalogs loaded from TOML
//! - Fixed-size containers with deterministic stacking
//! - Special slots (weapon, quiver, ...) with acceptance rules
//! - Smart pickup routing between a quick bar and a backpack
//! - Player inventory aggregate with equip, unequip and drop
//! - Snapshots for save files
//!
//! # Example
//!
//! ```ignore
//! use satchel_inventory::prelude::*;
//! use std::sync::Arc;
//!
//! let potion = Arc::new(
//!     ItemDefinition::new("potion", "Potion")
//!         .with_category(ItemCategory::Consumable)
//!         .with_max_stack(10),
//! );
//!
//! let mut inventory = PlayerInventory::new(InventoryConfig::default());
//! let accepted = inventory.add_item_smart(&potion, 12);
//! assert_eq!(accepted, 12);
//! ```

pub mod attribute;
pub mod catalog;
pub mod config;
pub mod container;
pub mod item;
pub mod pickup;
pub mod player;
pub mod routing;
pub mod snapshot;
pub mod special_slot;
pub mod stack;

pub mod prelude {
    pub use crate::attribute::{AttributeAccumulator, AttributeOperation, ItemAttribute};
    pub use crate::catalog::{CatalogError, CatalogResult, ItemCatalog};
    pub use crate::config::{ConfigError, ConfigResult, InventoryConfig};
    pub use crate::container::{InventoryContainer, InventoryEvent};
    pub use crate::item::{EffectTrigger, ItemCategory, ItemDefinition, ItemEffect, ItemId};
    pub use crate::pickup::{PickupOutcome, WorldItem};
    pub use crate::player::{ContainerId, PlayerInventory, PlayerInventoryEvent};
    pub use crate::routing::PickupRouting;
    pub use crate::snapshot::{
        ContainerSnapshot, PlayerInventorySnapshot, SlotRecord, SnapshotError, SnapshotResult,
        StackRecord,
    };
    pub use crate::special_slot::{slot_ids, Assignment, SpecialInventorySlot, SpecialSlotConfig};
    pub use crate::stack::InventoryItemStack;
}

pub use prelude::*;
