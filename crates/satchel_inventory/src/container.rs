//! Slot containers

use crate::attribute::AttributeAccumulator;
use crate::item::{ItemDefinition, ItemId};
use crate::stack::InventoryItemStack;
use satchel_event::{Observers, Priority, SubscriberId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Container notifications
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    /// A slot's content changed; `item_id` is `None` once the slot is empty
    SlotChanged {
        slot: usize,
        item_id: Option<ItemId>,
        quantity: u32,
    },
    /// Emitted once per mutating call that changed anything
    InventoryChanged,
}

/// Fixed-size ordered collection of slots
///
/// Slot indices are stable: nothing in here reorders slots on its own, so a
/// UI can bind to an index. Out-of-range indices are treated as no-ops.
#[derive(Debug)]
pub struct InventoryContainer {
    /// Inventory slots (None = empty)
    slots: Vec<Option<InventoryItemStack>>,
    observers: Observers<InventoryEvent>,
}

impl InventoryContainer {
    /// Create a container with `slot_count` empty slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
            observers: Observers::new(),
        }
    }

    /// Create a container pre-filled from `stacks`, padded or truncated to `slot_count`
    pub fn with_stacks(slot_count: usize, stacks: Vec<Option<InventoryItemStack>>) -> Self {
        let mut slots: Vec<Option<InventoryItemStack>> = stacks
            .into_iter()
            .map(|s| s.filter(|s| !s.is_empty()))
            .collect();

        let dropped = slots.iter().skip(slot_count).flatten().count();
        if dropped > 0 {
            log::warn!(
                "Container of {} slots dropped {} stacks past its last slot",
                slot_count,
                dropped
            );
        }
        slots.resize(slot_count, None);
        Self {
            slots,
            observers: Observers::new(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<InventoryItemStack>] {
        &self.slots
    }

    /// Occupied slots in index order
    pub fn iter_stacks(&self) -> impl Iterator<Item = (usize, &InventoryItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|stack| (i, stack)))
    }

    /// Get slot contents, `None` for an empty slot or a bad index
    pub fn get_stack(&self, slot: usize) -> Option<&InventoryItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn free_slots(&self) -> usize {
        self.slot_count() - self.used_slots()
    }

    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// Subscribe to slot and inventory notifications
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(handler)
    }

    pub fn subscribe_with_priority<F>(&mut self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe_with_priority(handler, priority)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Add as much of `amount` as fits, returning the accepted amount
    ///
    /// Non-full stacks of the same item are topped up first, lowest index
    /// first; the rest goes into empty slots, lowest index first.
    pub fn add_item(&mut self, item: &Arc<ItemDefinition>, amount: u32) -> u32 {
        let remaining = self.add_internal(item, amount);
        amount - remaining
    }

    /// Add the whole amount or report failure
    ///
    /// A partial insertion is kept even when this returns false.
    pub fn try_add_item(&mut self, item: &Arc<ItemDefinition>, amount: u32) -> bool {
        self.add_internal(item, amount) == 0
    }

    /// Add into one specific slot, returning the amount added
    ///
    /// Works on an empty slot, a slot holding a placeholder item, or a
    /// non-full stack of the same item. Anything else adds nothing.
    pub fn try_add_item_to_slot(
        &mut self,
        item: &Arc<ItemDefinition>,
        amount: u32,
        slot: usize,
    ) -> u32 {
        if amount == 0 || slot >= self.slots.len() {
            return 0;
        }

        let occupant = &mut self.slots[slot];
        let added = match occupant {
            Some(stack) if stack.is_same_item(item) => stack.add(amount),
            Some(stack) if !stack.item().is_placeholder() => 0,
            // Empty, or a placeholder that any real item may overwrite
            _ => {
                let mut fresh = InventoryItemStack::empty(item.clone());
                let added = fresh.add(amount);
                if added > 0 {
                    *occupant = Some(fresh);
                }
                added
            }
        };

        if added > 0 {
            self.emit_slot(slot);
            self.emit_changed();
        }
        added
    }

    /// Remove up to `amount` of an item across slots in index order
    pub fn remove_item(&mut self, item_id: &str, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }

        let mut removed = 0;
        for i in 0..self.slots.len() {
            if removed >= amount {
                break;
            }

            let Some(stack) = &mut self.slots[i] else {
                continue;
            };
            if stack.item_id() != item_id {
                continue;
            }

            removed += stack.remove(amount - removed);
            if stack.is_empty() {
                self.slots[i] = None;
            }
            self.emit_slot(i);
        }

        if removed > 0 {
            self.emit_changed();
        }
        removed
    }

    /// Remove up to `amount` from one slot
    pub fn remove_item_from_slot(&mut self, slot: usize, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }

        let Some(Some(stack)) = self.slots.get_mut(slot) else {
            return 0;
        };

        let removed = stack.remove(amount);
        if removed == 0 {
            return 0;
        }
        if stack.is_empty() {
            self.slots[slot] = None;
        }

        self.emit_slot(slot);
        self.emit_changed();
        removed
    }

    /// Overwrite a slot directly, bypassing merge rules
    ///
    /// Used for UI swaps and save restoration. The caller is responsible for
    /// not duplicating items. Empty stacks are stored as an empty slot.
    pub fn set_stack(&mut self, slot: usize, stack: Option<InventoryItemStack>) -> bool {
        if slot >= self.slots.len() {
            return false;
        }

        self.slots[slot] = stack.filter(|s| !s.is_empty());
        self.emit_slot(slot);
        self.emit_changed();
        true
    }

    /// Take a slot's whole stack, leaving it empty
    pub fn take_stack(&mut self, slot: usize) -> Option<InventoryItemStack> {
        let taken = self.slots.get_mut(slot)?.take()?;
        self.emit_slot(slot);
        self.emit_changed();
        Some(taken)
    }

    /// Split up to `amount` out of a slot into a detached stack
    pub fn try_extract_from_slot(&mut self, slot: usize, amount: u32) -> Option<InventoryItemStack> {
        if amount == 0 {
            return None;
        }

        let stack = self.slots.get_mut(slot)?.as_mut()?;
        let extracted = stack.split(amount);
        if extracted.is_empty() {
            return None;
        }
        if stack.is_empty() {
            self.slots[slot] = None;
        }

        self.emit_slot(slot);
        self.emit_changed();
        Some(extracted)
    }

    /// Move up to `amount` from one of our slots into `target`
    ///
    /// Whatever `target` refuses goes back into the source slot, so the
    /// combined quantity of both containers is unchanged. Returns the amount
    /// that ended up in `target`.
    pub fn move_to(&mut self, target: &mut InventoryContainer, slot: usize, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }

        let Some(Some(stack)) = self.slots.get_mut(slot) else {
            return 0;
        };

        let split = stack.split(amount);
        if split.is_empty() {
            return 0;
        }

        let rejected = target.add_internal(split.item(), split.quantity());
        let transferred = split.quantity() - rejected;

        // Rollback always fits: the units were just taken from this stack
        stack.add(rejected);

        if transferred == 0 {
            return 0;
        }
        if rejected > 0 {
            log::debug!(
                "Moved {} of {} {}, target refused {}",
                transferred,
                split.quantity(),
                split.item_id(),
                rejected
            );
        }
        if stack.is_empty() {
            self.slots[slot] = None;
        }

        self.emit_slot(slot);
        self.emit_changed();
        transferred
    }

    /// Swap two slots' contents
    pub fn swap_slots(&mut self, slot_a: usize, slot_b: usize) -> bool {
        let len = self.slots.len();
        if slot_a >= len || slot_b >= len || slot_a == slot_b {
            return false;
        }

        self.slots.swap(slot_a, slot_b);
        self.emit_slot(slot_a);
        self.emit_slot(slot_b);
        self.emit_changed();
        true
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        let mut changed = false;
        for i in 0..self.slots.len() {
            if self.slots[i].take().is_some() {
                self.emit_slot(i);
                changed = true;
            }
        }
        if changed {
            self.emit_changed();
        }
    }

    /// How much of `item` would be accepted right now
    pub fn capacity_for(&self, item: &ItemDefinition) -> u32 {
        self.slots
            .iter()
            .map(|slot| match slot {
                Some(stack) if stack.is_same_item(item) => stack.remaining_capacity(),
                Some(_) => 0,
                None => item.max_stack_size,
            })
            .fold(0u32, |acc, n| acc.saturating_add(n))
    }

    /// Total quantity of an item
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.iter_stacks()
            .filter(|(_, s)| s.item_id() == item_id)
            .map(|(_, s)| s.quantity())
            .fold(0u32, u32::saturating_add)
    }

    /// Find first slot holding an item
    pub fn find_item(&self, item_id: &str) -> Option<usize> {
        self.iter_stacks()
            .find(|(_, s)| s.item_id() == item_id)
            .map(|(i, _)| i)
    }

    pub fn stacks_with_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a InventoryItemStack> + 'a {
        let tag = tag.trim().to_string();
        self.iter_stacks()
            .map(|(_, s)| s)
            .filter(move |s| !tag.is_empty() && s.has_tag(&tag))
    }

    /// Total quantity of items carrying a tag
    pub fn count_with_tag(&self, tag: &str) -> u32 {
        self.stacks_with_tag(tag)
            .map(|s| s.quantity())
            .fold(0u32, u32::saturating_add)
    }

    pub fn find_first_with_tag(&self, tag: &str) -> Option<&InventoryItemStack> {
        self.stacks_with_tag(tag).next()
    }

    /// Resolve one attribute over every stack, `base` when nothing contributes
    pub fn get_attribute_value(&self, attribute_id: &str, base: f32) -> f32 {
        if attribute_id.trim().is_empty() {
            return base;
        }

        let mut accumulator = AttributeAccumulator::new();
        self.accumulate_into(attribute_id, &mut accumulator);

        if accumulator.has_contribution() {
            accumulator.resolve(base)
        } else {
            base
        }
    }

    /// Resolve every attribute any stack contributes to, from a zero baseline
    pub fn get_attribute_snapshot(&self) -> BTreeMap<String, f32> {
        let mut accumulators = BTreeMap::new();
        self.accumulate_all(&mut accumulators);
        accumulators
            .into_iter()
            .map(|(id, acc)| (id, acc.resolve(0.0)))
            .collect()
    }

    pub(crate) fn accumulate_into(&self, attribute_id: &str, accumulator: &mut AttributeAccumulator) {
        for (_, stack) in self.iter_stacks() {
            if let Some(attribute) = stack.attribute(attribute_id) {
                accumulator.accumulate(attribute, stack.quantity());
            }
        }
    }

    pub(crate) fn accumulate_all(&self, accumulators: &mut BTreeMap<String, AttributeAccumulator>) {
        for (_, stack) in self.iter_stacks() {
            for attribute in stack.attributes() {
                accumulators
                    .entry(attribute.attribute_id.clone())
                    .or_default()
                    .accumulate(attribute, stack.quantity());
            }
        }
    }

    /// Two-pass insertion; returns the amount that did not fit
    pub(crate) fn add_internal(&mut self, item: &Arc<ItemDefinition>, amount: u32) -> u32 {
        let mut remaining = amount;

        // Fill partial stacks
        for i in 0..self.slots.len() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = &mut self.slots[i] else {
                continue;
            };
            if !stack.is_same_item(item) || stack.is_full() {
                continue;
            }

            remaining -= stack.add(remaining);
            self.emit_slot(i);
        }

        // Fill empty slots
        for i in 0..self.slots.len() {
            if remaining == 0 {
                break;
            }
            if self.slots[i].is_some() {
                continue;
            }

            let mut stack = InventoryItemStack::empty(item.clone());
            let added = stack.add(remaining);
            if added == 0 {
                // Zero-capacity item: no slot can ever hold it
                break;
            }
            remaining -= added;
            self.slots[i] = Some(stack);
            self.emit_slot(i);
        }

        if remaining != amount {
            self.emit_changed();
        }
        remaining
    }

    fn emit_slot(&self, slot: usize) {
        if self.observers.is_empty() {
            return;
        }
        let (item_id, quantity) = match self.get_stack(slot) {
            Some(stack) => (Some(stack.item_id().clone()), stack.quantity()),
            None => (None, 0),
        };
        self.observers.notify(&InventoryEvent::SlotChanged {
            slot,
            item_id,
            quantity,
        });
    }

    fn emit_changed(&self) {
        self.observers.notify(&InventoryEvent::InventoryChanged);
    }
}

impl Default for InventoryContainer {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeOperation;
    use crate::item::ItemCategory;
    use satchel_event::EventChannel;

    fn potion() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("potion", "Potion")
                .with_category(ItemCategory::Consumable)
                .with_max_stack(10)
                .with_tag("healing")
                .with_attribute("weight", AttributeOperation::Add, 0.5),
        )
    }

    fn sword() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("sword", "Sword")
                .with_category(ItemCategory::Weapon)
                .with_attribute("attack", AttributeOperation::Add, 5.0)
                .with_attribute("weight", AttributeOperation::Add, 3.0),
        )
    }

    fn quantities(container: &InventoryContainer) -> Vec<u32> {
        container
            .slots()
            .iter()
            .map(|s| s.as_ref().map(|s| s.quantity()).unwrap_or(0))
            .collect()
    }

    fn record(container: &mut InventoryContainer) -> Arc<EventChannel<InventoryEvent>> {
        let channel = Arc::new(EventChannel::new());
        let sink = channel.clone();
        container.subscribe(move |e| sink.send(e.clone()));
        channel
    }

    #[test]
    fn test_container_creation() {
        let inv = InventoryContainer::new(10);

        assert_eq!(inv.slot_count(), 10);
        assert_eq!(inv.used_slots(), 0);
        assert!(inv.is_empty());
        assert!(inv.get_stack(0).is_none());
        assert!(inv.get_stack(99).is_none());
    }

    #[test]
    fn test_non_stackable_overflow() {
        let sword = sword();
        let mut inv = InventoryContainer::new(2);
        inv.set_stack(0, Some(InventoryItemStack::new(sword.clone(), 1)));

        let accepted = inv.add_item(&sword, 3);

        assert_eq!(accepted, 1);
        assert_eq!(quantities(&inv), vec![1, 1]);
    }

    #[test]
    fn test_fill_existing_then_empty() {
        let potion = potion();
        let mut inv = InventoryContainer::new(3);
        inv.set_stack(0, Some(InventoryItemStack::new(potion.clone(), 4)));

        let accepted = inv.add_item(&potion, 8);

        assert_eq!(accepted, 8);
        assert_eq!(quantities(&inv), vec![10, 2, 0]);
    }

    #[test]
    fn test_existing_stacks_before_lower_empty_slots() {
        let potion = potion();
        let mut inv = InventoryContainer::new(3);
        inv.set_stack(2, Some(InventoryItemStack::new(potion.clone(), 7)));

        let accepted = inv.add_item(&potion, 5);

        assert_eq!(accepted, 5);
        // Slot 2 is topped up before empty slot 0 is used
        assert_eq!(quantities(&inv), vec![2, 0, 10]);
    }

    #[test]
    fn test_try_add_item_keeps_partial() {
        let potion = potion();
        let mut inv = InventoryContainer::new(1);

        assert!(!inv.try_add_item(&potion, 15));
        assert_eq!(inv.count_item("potion"), 10);

        assert!(inv.try_add_item(&sword(), 0));
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut inv = InventoryContainer::new(2);
        let events = record(&mut inv);

        assert_eq!(inv.add_item(&potion(), 0), 0);
        assert!(inv.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_try_add_item_to_slot() {
        let potion = potion();
        let sword = sword();
        let mut inv = InventoryContainer::new(3);

        assert_eq!(inv.try_add_item_to_slot(&potion, 4, 1), 4);
        assert_eq!(inv.try_add_item_to_slot(&potion, 10, 1), 6);
        assert_eq!(inv.try_add_item_to_slot(&potion, 1, 1), 0); // Full
        assert_eq!(inv.try_add_item_to_slot(&sword, 1, 1), 0); // Incompatible
        assert_eq!(inv.try_add_item_to_slot(&sword, 1, 7), 0); // Out of range
        assert_eq!(quantities(&inv), vec![0, 10, 0]);
    }

    #[test]
    fn test_placeholder_overwritten() {
        let blank = Arc::new(ItemDefinition::new("empty_item", "").as_placeholder());
        let mut inv = InventoryContainer::new(2);
        inv.set_stack(0, Some(InventoryItemStack::new(blank, 1)));

        assert_eq!(inv.try_add_item_to_slot(&sword(), 1, 0), 1);
        assert_eq!(inv.get_stack(0).unwrap().item_id(), "sword");
    }

    #[test]
    fn test_remove_item() {
        let potion = potion();
        let mut inv = InventoryContainer::new(3);
        inv.add_item(&potion, 25);

        let removed = inv.remove_item("potion", 12);

        assert_eq!(removed, 12);
        assert_eq!(quantities(&inv), vec![0, 8, 5]);
        assert_eq!(inv.remove_item("potion", 100), 13);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_remove_missing_item_is_noop() {
        let mut inv = InventoryContainer::new(2);
        inv.add_item(&potion(), 3);
        let events = record(&mut inv);

        assert_eq!(inv.remove_item("sword", 5), 0);
        assert_eq!(quantities(&inv), vec![3, 0]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_remove_from_slot() {
        let mut inv = InventoryContainer::new(2);
        inv.add_item(&potion(), 6);

        assert_eq!(inv.remove_item_from_slot(0, 2), 2);
        assert_eq!(inv.remove_item_from_slot(1, 2), 0);
        assert_eq!(inv.remove_item_from_slot(9, 2), 0);
        assert_eq!(inv.remove_item_from_slot(0, 10), 4);
        assert!(inv.get_stack(0).is_none());
    }

    #[test]
    fn test_set_stack_out_of_range() {
        let mut inv = InventoryContainer::new(2);
        assert!(!inv.set_stack(2, Some(InventoryItemStack::new(sword(), 1))));
        assert!(inv.set_stack(1, Some(InventoryItemStack::empty(sword()))));
        assert!(inv.get_stack(1).is_none());
    }

    #[test]
    fn test_extract_from_slot() {
        let potion = potion();
        let mut inv = InventoryContainer::new(2);
        inv.add_item(&potion, 7);

        let part = inv.try_extract_from_slot(0, 3).unwrap();
        assert_eq!(part.quantity(), 3);
        assert_eq!(inv.count_item("potion"), 4);

        let rest = inv.try_extract_from_slot(0, 50).unwrap();
        assert_eq!(rest.quantity(), 4);
        assert!(inv.get_stack(0).is_none());

        assert!(inv.try_extract_from_slot(0, 1).is_none());
        assert!(inv.try_extract_from_slot(5, 1).is_none());
    }

    #[test]
    fn test_move_to_with_rollback() {
        let potion = potion();
        let mut source = InventoryContainer::new(1);
        source.add_item(&potion, 5);
        let mut target = InventoryContainer::new(1);
        target.add_item(&potion, 7);

        let moved = source.move_to(&mut target, 0, 5);

        assert_eq!(moved, 3);
        assert_eq!(source.count_item("potion"), 2);
        assert_eq!(target.count_item("potion"), 10);
    }

    #[test]
    fn test_move_to_whole_stack() {
        let potion = potion();
        let mut source = InventoryContainer::new(1);
        source.add_item(&potion, 5);
        let mut target = InventoryContainer::new(2);

        assert_eq!(source.move_to(&mut target, 0, 5), 5);
        assert!(source.get_stack(0).is_none());
        assert_eq!(target.count_item("potion"), 5);
    }

    #[test]
    fn test_move_to_full_target() {
        let mut source = InventoryContainer::new(1);
        source.add_item(&potion(), 5);
        let mut target = InventoryContainer::new(1);
        target.add_item(&sword(), 1);
        let events = record(&mut source);

        assert_eq!(source.move_to(&mut target, 0, 5), 0);
        assert_eq!(source.count_item("potion"), 5);
        assert!(events.is_empty());
    }

    #[test]
    fn test_swap_slots() {
        let mut inv = InventoryContainer::new(3);
        inv.add_item(&sword(), 1);
        inv.add_item(&potion(), 2);

        assert!(inv.swap_slots(0, 2));
        assert_eq!(inv.get_stack(2).unwrap().item_id(), "sword");
        assert!(inv.get_stack(0).is_none());
        assert!(!inv.swap_slots(0, 3));
        assert!(!inv.swap_slots(1, 1));
    }

    #[test]
    fn test_slot_events() {
        let potion = potion();
        let mut inv = InventoryContainer::new(2);
        inv.set_stack(0, Some(InventoryItemStack::new(potion.clone(), 9)));
        let events = record(&mut inv);

        inv.add_item(&potion, 3);

        assert_eq!(
            events.drain(),
            vec![
                InventoryEvent::SlotChanged {
                    slot: 0,
                    item_id: Some(ItemId::from("potion")),
                    quantity: 10
                },
                InventoryEvent::SlotChanged {
                    slot: 1,
                    item_id: Some(ItemId::from("potion")),
                    quantity: 2
                },
                InventoryEvent::InventoryChanged,
            ]
        );

        inv.remove_item_from_slot(1, 2);
        assert_eq!(
            events.drain(),
            vec![
                InventoryEvent::SlotChanged {
                    slot: 1,
                    item_id: None,
                    quantity: 0
                },
                InventoryEvent::InventoryChanged,
            ]
        );
    }

    #[test]
    fn test_tags_and_counts() {
        let mut inv = InventoryContainer::new(4);
        inv.add_item(&potion(), 14);
        inv.add_item(&sword(), 1);

        assert_eq!(inv.count_with_tag("healing"), 14);
        assert_eq!(inv.stacks_with_tag("healing").count(), 2);
        assert_eq!(inv.count_with_tag(""), 0);
        assert_eq!(inv.find_first_with_tag("healing").unwrap().quantity(), 10);
        assert!(inv.find_first_with_tag("cursed").is_none());
        assert_eq!(inv.find_item("sword"), Some(2));
    }

    #[test]
    fn test_capacity_for() {
        let potion = potion();
        let mut inv = InventoryContainer::new(3);
        inv.add_item(&potion, 4);
        inv.add_item(&sword(), 1);

        assert_eq!(inv.capacity_for(&potion), 16);
    }

    #[test]
    fn test_tag_lookup_outlives_tag_string() {
        let mut inv = InventoryContainer::new(2);
        inv.add_item(&potion(), 3);

        let found = {
            let tag = format!("  {}  ", "healing");
            inv.find_first_with_tag(&tag)
        };
        assert_eq!(found.map(|s| s.quantity()), Some(3));
    }

    #[test]
    fn test_counts_saturate() {
        let ore = Arc::new(
            ItemDefinition::new("ore", "Ore")
                .with_max_stack(u32::MAX)
                .with_tag("metal"),
        );
        let mut inv = InventoryContainer::new(2);

        assert_eq!(inv.add_item(&ore, u32::MAX), u32::MAX);
        assert_eq!(inv.add_item(&ore, 5), 5);

        assert_eq!(inv.count_item("ore"), u32::MAX);
        assert_eq!(inv.count_with_tag("metal"), u32::MAX);
    }

    #[test]
    fn test_zero_capacity_item_takes_no_slot() {
        let mut dust = ItemDefinition::new("dust", "Dust");
        dust.max_stack_size = 0;
        let dust = Arc::new(dust);
        let mut inv = InventoryContainer::new(3);
        let events = record(&mut inv);

        assert_eq!(inv.add_item(&dust, 4), 0);
        assert!(!inv.try_add_item(&dust, 1));
        assert_eq!(inv.used_slots(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_with_stacks_truncates_past_slot_count() {
        let potion = potion();
        let stacks = vec![
            Some(InventoryItemStack::new(potion.clone(), 2)),
            None,
            Some(InventoryItemStack::new(potion.clone(), 5)),
        ];

        let inv = InventoryContainer::with_stacks(2, stacks);

        assert_eq!(quantities(&inv), vec![2, 0]);
        assert_eq!(inv.count_item("potion"), 2);
    }

    #[test]
    fn test_attributes() {
        let mut inv = InventoryContainer::new(4);
        inv.add_item(&potion(), 4);
        inv.add_item(&sword(), 1);

        assert_eq!(inv.get_attribute_value("attack", 10.0), 15.0);
        assert_eq!(inv.get_attribute_value("weight", 0.0), 5.0);
        assert_eq!(inv.get_attribute_value("magic", 1.5), 1.5);
        assert_eq!(inv.get_attribute_value("", 2.0), 2.0);

        let snapshot = inv.get_attribute_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["attack"], 5.0);
        assert_eq!(snapshot["weight"], 5.0);
    }

    #[test]
    fn test_clear() {
        let mut inv = InventoryContainer::new(2);
        inv.add_item(&potion(), 12);
        inv.clear();
        assert!(inv.is_empty());
    }
}
