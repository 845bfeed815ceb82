//! Item catalog - the shared registry of item definitions
//!
//! # Catalog Format
//!
//! ```toml
//! [[items]]
//! id = "health_potion"
//! display_name = "Health Potion"
//! category = "consumable"
//! max_stack_size = 10
//! tags = ["healing"]
//!
//! [[items.attributes]]
//! attribute_id = "weight"
//! operation = "add"
//! value = 0.2
//!
//! [[items.effects]]
//! trigger = "on_use"
//! effect_id = "heal"
//! magnitude = 25.0
//! ```

use crate::item::{ItemDefinition, ItemId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors from catalog registration and loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate item id: {0}")]
    DuplicateId(ItemId),

    #[error("Invalid item definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Root TOML structure
#[derive(Debug, Deserialize)]
struct CatalogToml {
    #[serde(default)]
    items: Vec<ItemDefinition>,
}

/// Registry of item definitions, keyed by ID
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, Arc<ItemDefinition>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition and return the shared handle stacks will hold
    pub fn register(&mut self, definition: ItemDefinition) -> CatalogResult<Arc<ItemDefinition>> {
        validate(&definition)?;

        if self.items.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateId(definition.id));
        }

        let shared = Arc::new(definition);
        self.items.insert(shared.id.clone(), shared.clone());
        Ok(shared)
    }

    pub fn get(&self, id: &str) -> Option<Arc<ItemDefinition>> {
        self.items.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Definitions in ID order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> {
        self.items.values()
    }

    /// Parse a catalog from TOML
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let raw: CatalogToml = toml::from_str(content)?;

        let mut catalog = Self::new();
        for definition in raw.items {
            catalog.register(definition)?;
        }

        log::debug!("Loaded item catalog with {} definitions", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn validate(definition: &ItemDefinition) -> CatalogResult<()> {
    let invalid = |reason: &str| CatalogError::InvalidDefinition {
        id: definition.id.to_string(),
        reason: reason.to_string(),
    };

    if definition.id.as_str().trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }
    if definition.max_stack_size == 0 {
        return Err(invalid("max_stack_size must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeOperation;
    use crate::item::{EffectTrigger, ItemCategory};

    const CATALOG: &str = r#"
[[items]]
id = "health_potion"
display_name = "Health Potion"
category = "consumable"
max_stack_size = 10
tags = ["healing"]

[[items.attributes]]
attribute_id = "weight"
value = 0.2

[[items.effects]]
trigger = "on_use"
effect_id = "heal"
magnitude = 25.0

[[items]]
id = "iron_sword"
display_name = "Iron Sword"
category = "weapon"

[[items.attributes]]
attribute_id = "attack"
operation = "add"
value = 5.0

[[items]]
id = "empty_item"
display_name = ""
placeholder = true
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = ItemCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let potion = catalog.get("health_potion").unwrap();
        assert_eq!(potion.category, ItemCategory::Consumable);
        assert_eq!(potion.max_stack_size, 10);
        assert_eq!(potion.attributes[0].operation, AttributeOperation::Add);
        assert_eq!(potion.effects_for(EffectTrigger::OnUse).count(), 1);

        let sword = catalog.get("iron_sword").unwrap();
        assert_eq!(sword.max_stack_size, 1);

        assert!(catalog.get("empty_item").unwrap().is_placeholder());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = ItemCatalog::new();
        catalog.register(ItemDefinition::new("gold", "Gold")).unwrap();

        let result = catalog.register(ItemDefinition::new("gold", "More Gold"));
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_invalid_definitions() {
        let mut catalog = ItemCatalog::new();
        assert!(matches!(
            catalog.register(ItemDefinition::new("", "Nameless")),
            Err(CatalogError::InvalidDefinition { .. })
        ));

        let toml = "[[items]]\nid = \"dust\"\ndisplay_name = \"Dust\"\nmax_stack_size = 0\n";
        assert!(matches!(
            ItemCatalog::from_toml_str(toml),
            Err(CatalogError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ItemCatalog::from_toml_str("[[items]]\nid = 3"),
            Err(CatalogError::Parse(_))
        ));
    }
}
