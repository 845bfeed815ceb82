//! Satchel GameState - Inventory Save Files
//!
//! Persists player inventories as versioned save slots.
//!
//! # Features
//!
//! - JSON (readable) or bincode (compact) save files
//! - Save headers for slot listings
//! - Quicksave and quickload
//! - Saves from a newer build are refused
//!
//! # Example
//!
//! ```ignore
//! use satchel_gamestate::prelude::*;
//!
//! let mut manager = SaveManager::new("saves").with_format(SaveFormat::Json);
//! let save = SaveData::capture("Before the boss", &inventory);
//! manager.save("slot1", &save)?;
//!
//! let loaded = manager.load("slot1")?;
//! loaded.restore_into(&mut inventory, &catalog)?;
//! ```

pub mod save;

pub mod prelude {
    pub use crate::save::{
        SaveData, SaveError, SaveFormat, SaveHeader, SaveManager, SaveResult, SaveSlot,
        SAVE_VERSION,
    };
}

pub use prelude::*;
