//! Item definitions

use crate::attribute::{AttributeOperation, ItemAttribute};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Catalog identifier of an item definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Weapons (swords, bows, etc.)
    Weapon,
    /// Armor pieces
    Armor,
    /// Consumables (potions, food, etc.)
    Consumable,
    /// Materials for crafting
    Material,
    /// Quest items
    Quest,
    /// Key items
    Key,
    /// Ammunition
    Ammo,
    /// Currency
    Currency,
    /// Misc items
    Misc,
}

impl Default for ItemCategory {
    fn default() -> Self {
        Self::Misc
    }
}

/// When an item effect fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTrigger {
    OnPickup,
    OnEquip,
    OnUnequip,
    OnUse,
}

/// An effect entry attached to an item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub trigger: EffectTrigger,
    /// Identifier resolved by whoever executes effects
    pub effect_id: String,
    #[serde(default)]
    pub magnitude: f32,
}

impl ItemEffect {
    pub fn new(trigger: EffectTrigger, effect_id: impl Into<String>) -> Self {
        Self {
            trigger,
            effect_id: effect_id.into(),
            magnitude: 0.0,
        }
    }

    pub fn with_magnitude(mut self, magnitude: f32) -> Self {
        self.magnitude = magnitude;
        self
    }
}

fn default_max_stack() -> u32 {
    1
}

/// Item definition
///
/// Immutable once registered in a catalog; stacks share it through an `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier
    pub id: ItemId,
    /// Display name
    pub display_name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Category
    #[serde(default)]
    pub category: ItemCategory,
    /// Maximum stack size (1 = not stackable)
    #[serde(default = "default_max_stack")]
    pub max_stack_size: u32,
    /// Icon handle, opaque to the inventory
    #[serde(default)]
    pub icon: String,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attribute contributions
    #[serde(default)]
    pub attributes: Vec<ItemAttribute>,
    /// Triggered effects
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
    /// Blank filler that any real item may overwrite
    #[serde(default)]
    pub placeholder: bool,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(id: impl Into<ItemId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            category: ItemCategory::default(),
            max_stack_size: 1,
            icon: String::new(),
            tags: Vec::new(),
            attributes: Vec::new(),
            effects: Vec::new(),
            placeholder: false,
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Set max stack size
    pub fn with_max_stack(mut self, max: u32) -> Self {
        self.max_stack_size = max.max(1);
        self
    }

    /// Set icon handle
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an attribute contribution
    pub fn with_attribute(
        mut self,
        attribute_id: impl Into<String>,
        operation: AttributeOperation,
        value: f32,
    ) -> Self {
        self.attributes
            .push(ItemAttribute::new(attribute_id, operation, value));
        self
    }

    /// Add an effect
    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Mark as a placeholder
    pub fn as_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    /// Check if item has a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Find the first attribute entry with this ID
    pub fn attribute(&self, attribute_id: &str) -> Option<&ItemAttribute> {
        self.attributes
            .iter()
            .find(|a| a.attribute_id == attribute_id)
    }

    /// Effects fired by a trigger
    pub fn effects_for(&self, trigger: EffectTrigger) -> impl Iterator<Item = &ItemEffect> {
        self.effects.iter().filter(move |e| e.trigger == trigger)
    }

    /// Check if stackable
    pub fn is_stackable(&self) -> bool {
        self.max_stack_size > 1
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}
