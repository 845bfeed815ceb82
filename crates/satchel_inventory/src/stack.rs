//! Item stacks

use crate::attribute::ItemAttribute;
use crate::item::{ItemDefinition, ItemId};
use std::fmt;
use std::sync::Arc;

/// A quantity of one item occupying one slot
///
/// `quantity` never exceeds the item's `max_stack_size`. Every quantity
/// operation saturates instead of failing.
#[derive(Clone)]
pub struct InventoryItemStack {
    item: Arc<ItemDefinition>,
    quantity: u32,
}

impl InventoryItemStack {
    /// Create a stack, clamping `quantity` to the item's max stack size
    pub fn new(item: Arc<ItemDefinition>, quantity: u32) -> Self {
        let quantity = quantity.min(item.max_stack_size);
        Self { item, quantity }
    }

    /// Create an empty stack of `item`
    pub fn empty(item: Arc<ItemDefinition>) -> Self {
        Self { item, quantity: 0 }
    }

    pub fn item(&self) -> &Arc<ItemDefinition> {
        &self.item
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max_stack_size(&self) -> u32 {
        self.item.max_stack_size
    }

    /// Units that can still be added
    pub fn remaining_capacity(&self) -> u32 {
        self.item.max_stack_size.saturating_sub(self.quantity)
    }

    pub fn is_full(&self) -> bool {
        self.quantity >= self.item.max_stack_size
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Add up to `amount`, returning the amount actually added
    pub fn add(&mut self, amount: u32) -> u32 {
        let to_add = amount.min(self.remaining_capacity());
        self.quantity += to_add;
        to_add
    }

    /// Remove up to `amount`, returning the amount actually removed
    pub fn remove(&mut self, amount: u32) -> u32 {
        let to_remove = amount.min(self.quantity);
        self.quantity -= to_remove;
        to_remove
    }

    /// Move up to `amount` into a new stack of the same item
    ///
    /// The returned stack is empty when `amount` is zero or this stack is
    /// empty. An emptied source must be cleared from its slot by the caller.
    pub fn split(&mut self, amount: u32) -> InventoryItemStack {
        let taken = self.remove(amount);
        InventoryItemStack {
            item: self.item.clone(),
            quantity: taken,
        }
    }

    /// Check if both stacks hold the same item
    pub fn can_merge_with(&self, other: &InventoryItemStack) -> bool {
        self.is_same_item(&other.item)
    }

    pub fn is_same_item(&self, item: &ItemDefinition) -> bool {
        self.item.id == item.id
    }

    /// Pull as much of `other` into this stack as fits
    ///
    /// Returns the amount moved; `other` keeps the rest.
    pub fn merge_from(&mut self, other: &mut InventoryItemStack) -> u32 {
        if !self.can_merge_with(other) {
            return 0;
        }
        let moved = self.add(other.quantity);
        other.quantity -= moved;
        moved
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.item.has_tag(tag)
    }

    /// First valid attribute entry with this ID
    pub fn attribute(&self, attribute_id: &str) -> Option<&ItemAttribute> {
        self.item
            .attributes
            .iter()
            .find(|a| a.attribute_id == attribute_id && a.is_valid())
    }

    /// All valid attribute entries of the item
    pub fn attributes(&self) -> impl Iterator<Item = &ItemAttribute> {
        self.item.attributes.iter().filter(|a| a.is_valid())
    }
}

impl PartialEq for InventoryItemStack {
    fn eq(&self, other: &Self) -> bool {
        self.item.id == other.item.id && self.quantity == other.quantity
    }
}

impl Eq for InventoryItemStack {}

impl fmt::Debug for InventoryItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryItemStack")
            .field("item", &self.item.id)
            .field("quantity", &self.quantity)
            .field("max", &self.item.max_stack_size)
            .finish()
    }
}
