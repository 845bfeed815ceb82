//! Single-stack equip slots

use crate::item::{ItemCategory, ItemDefinition};
use crate::stack::InventoryItemStack;
use serde::{Deserialize, Serialize};

/// Well-known special slot IDs
pub mod slot_ids {
    pub const PRIMARY_WEAPON: &str = "primary_weapon";
}

fn default_max_quantity() -> u32 {
    1
}

/// Configuration of a special slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialSlotConfig {
    pub slot_id: String,
    #[serde(default)]
    pub display_name: String,
    /// Categories accepted (empty = any category)
    #[serde(default)]
    pub accepted_categories: Vec<ItemCategory>,
    /// Tags an item must all carry
    #[serde(default)]
    pub required_tags: Vec<String>,
    /// Most units the slot holds at once
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

impl SpecialSlotConfig {
    pub fn new(slot_id: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            display_name: String::new(),
            accepted_categories: Vec::new(),
            required_tags: Vec::new(),
            max_quantity: 1,
        }
    }

    /// The primary weapon slot: one weapon at a time
    pub fn default_weapon() -> Self {
        Self::new(slot_ids::PRIMARY_WEAPON)
            .with_display_name("Weapon")
            .accepting(ItemCategory::Weapon)
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn accepting(mut self, category: ItemCategory) -> Self {
        self.accepted_categories.push(category);
        self
    }

    pub fn requiring_tag(mut self, tag: impl Into<String>) -> Self {
        self.required_tags.push(tag.into());
        self
    }

    pub fn with_max_quantity(mut self, max: u32) -> Self {
        self.max_quantity = max.max(1);
        self
    }
}

/// Result of a successful `try_assign`
///
/// Nothing handed to the slot is ever dropped: units that did not fit come
/// back as `overflow`, and a replaced stack comes back as `displaced`.
#[derive(Debug, Default, PartialEq)]
pub struct Assignment {
    pub overflow: Option<InventoryItemStack>,
    pub displaced: Option<InventoryItemStack>,
}

impl Assignment {
    /// Check if the whole incoming stack was stored and nothing was displaced
    pub fn is_complete(&self) -> bool {
        self.overflow.is_none() && self.displaced.is_none()
    }
}

/// A slot holding at most one stack, guarded by an acceptance rule
#[derive(Debug, Clone)]
pub struct SpecialInventorySlot {
    config: SpecialSlotConfig,
    stack: Option<InventoryItemStack>,
}

impl SpecialInventorySlot {
    pub fn new(config: SpecialSlotConfig) -> Self {
        Self {
            config,
            stack: None,
        }
    }

    pub fn slot_id(&self) -> &str {
        &self.config.slot_id
    }

    pub fn config(&self) -> &SpecialSlotConfig {
        &self.config
    }

    pub fn stack(&self) -> Option<&InventoryItemStack> {
        self.stack.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    /// Check the acceptance rule
    pub fn can_accept(&self, item: &ItemDefinition) -> bool {
        if item.is_placeholder() {
            return false;
        }
        let category_ok = self.config.accepted_categories.is_empty()
            || self.config.accepted_categories.contains(&item.category);
        category_ok && self.config.required_tags.iter().all(|t| item.has_tag(t))
    }

    /// Limit a proposed transfer to what the slot allows
    pub fn clamp_quantity(&self, amount: u32) -> u32 {
        amount.min(self.config.max_quantity)
    }

    /// Store `stack` in the slot
    ///
    /// Rejected (stack handed back untouched) when the item is not
    /// accepted, or when the slot is occupied, `replace_existing` is false
    /// and the held stack cannot take any of it. An occupied slot holding
    /// the same item absorbs what fits; with `replace_existing` a different
    /// or full held stack is swapped out into `displaced`.
    pub fn try_assign(
        &mut self,
        mut stack: InventoryItemStack,
        replace_existing: bool,
    ) -> Result<Assignment, InventoryItemStack> {
        if stack.is_empty() || !self.can_accept(stack.item()) {
            return Err(stack);
        }

        let limit = self.config.max_quantity;

        if let Some(held) = &mut self.stack {
            let room = limit
                .saturating_sub(held.quantity())
                .min(held.remaining_capacity());
            if held.can_merge_with(&stack) && room > 0 {
                held.add(stack.remove(room));
                let overflow = (!stack.is_empty()).then_some(stack);
                return Ok(Assignment {
                    overflow,
                    displaced: None,
                });
            }
            if !replace_existing {
                return Err(stack);
            }
        }

        let keep = self.clamp_quantity(stack.quantity());
        if keep == 0 {
            return Err(stack);
        }
        let overflow = stack.split(stack.quantity() - keep);
        let displaced = self.stack.replace(stack);

        Ok(Assignment {
            overflow: (!overflow.is_empty()).then_some(overflow),
            displaced,
        })
    }

    /// Remove and return the held stack
    pub fn take_stack(&mut self) -> Option<InventoryItemStack> {
        self.stack.take()
    }
}
