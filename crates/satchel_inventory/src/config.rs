//! Inventory configuration
//!
//! # Config Format
//!
//! ```toml
//! backpack_slots = 24
//! quick_bar_slots = 5
//! drop_amount_per_action = 0   # 0 = drop the whole stack
//!
//! [routing]
//! reserved_quick_bar_slots = [0]
//!
//! [[special_slots]]
//! slot_id = "primary_weapon"
//! display_name = "Weapon"
//! accepted_categories = ["weapon"]
//! max_quantity = 1
//! ```

use crate::routing::PickupRouting;
use crate::special_slot::SpecialSlotConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Slot counts accepted for any container
pub const MIN_SLOTS: usize = 1;
pub const MAX_SLOTS: usize = 200;

/// Errors from config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Player inventory layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub backpack_slots: usize,
    pub quick_bar_slots: usize,
    pub routing: PickupRouting,
    pub special_slots: Vec<SpecialSlotConfig>,
    /// Units dropped per drop action (0 = whole stack)
    pub drop_amount_per_action: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            backpack_slots: 24,
            quick_bar_slots: 5,
            routing: PickupRouting::default(),
            special_slots: vec![SpecialSlotConfig::default_weapon()],
            drop_amount_per_action: 0,
        }
    }
}

impl InventoryConfig {
    /// Parse and validate a config from TOML
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check_slots("backpack_slots", self.backpack_slots)?;
        check_slots("quick_bar_slots", self.quick_bar_slots)?;

        if let Some(bad) = self
            .routing
            .reserved_quick_bar_slots
            .iter()
            .find(|&&i| i >= self.quick_bar_slots)
        {
            return Err(ConfigError::Validation(format!(
                "reserved quick bar slot {} is outside a {}-slot quick bar",
                bad, self.quick_bar_slots
            )));
        }

        let mut seen = HashSet::new();
        for slot in &self.special_slots {
            if slot.slot_id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "special slot id must not be empty".to_string(),
                ));
            }
            if !seen.insert(slot.slot_id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate special slot id: {}",
                    slot.slot_id
                )));
            }
            if slot.max_quantity == 0 {
                return Err(ConfigError::Validation(format!(
                    "special slot {} must hold at least one item",
                    slot.slot_id
                )));
            }
        }

        Ok(())
    }
}

fn check_slots(field: &str, count: usize) -> ConfigResult<()> {
    if (MIN_SLOTS..=MAX_SLOTS).contains(&count) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{} must be between {} and {}, got {}",
            field, MIN_SLOTS, MAX_SLOTS, count
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;
    use crate::special_slot::slot_ids;

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::default();

        assert_eq!(config.backpack_slots, 24);
        assert_eq!(config.quick_bar_slots, 5);
        assert_eq!(config.routing.reserved_quick_bar_slots, vec![0]);
        assert_eq!(config.special_slots[0].slot_id, slot_ids::PRIMARY_WEAPON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
backpack_slots = 30
quick_bar_slots = 4
drop_amount_per_action = 1

[routing]
reserved_quick_bar_slots = [0, 3]

[[special_slots]]
slot_id = "primary_weapon"
accepted_categories = ["weapon"]

[[special_slots]]
slot_id = "quiver"
accepted_categories = ["ammo"]
max_quantity = 99
"#;
        let config = InventoryConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.backpack_slots, 30);
        assert_eq!(config.drop_amount_per_action, 1);
        assert!(config.routing.is_reserved(3));
        assert_eq!(config.special_slots.len(), 2);
        assert_eq!(config.special_slots[0].max_quantity, 1);
        assert_eq!(config.special_slots[1].accepted_categories, vec![ItemCategory::Ammo]);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = InventoryConfig::from_toml_str("").unwrap();
        assert_eq!(config, InventoryConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            InventoryConfig::from_toml_str("backpack_slots = 0"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            InventoryConfig::from_toml_str("quick_bar_slots = 201"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            InventoryConfig::from_toml_str("quick_bar_slots = 2\n[routing]\nreserved_quick_bar_slots = [2]"),
            Err(ConfigError::Validation(_))
        ));

        let duplicate = r#"
[[special_slots]]
slot_id = "ring"
[[special_slots]]
slot_id = "ring"
"#;
        assert!(matches!(
            InventoryConfig::from_toml_str(duplicate),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            InventoryConfig::from_toml_str("backpack_slots = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
