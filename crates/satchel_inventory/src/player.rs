//! Player inventory: backpack, quick bar and special slots

use crate::attribute::AttributeAccumulator;
use crate::catalog::ItemCatalog;
use crate::config::InventoryConfig;
use crate::container::InventoryContainer;
use crate::item::{EffectTrigger, ItemDefinition, ItemId};
use crate::snapshot::{
    fill_slots, ContainerSnapshot, PlayerInventorySnapshot, SnapshotError, SnapshotResult,
    StackRecord,
};
use crate::special_slot::{slot_ids, Assignment, SpecialInventorySlot, SpecialSlotConfig};
use crate::stack::InventoryItemStack;
use satchel_event::{Observers, SubscriberId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Which container of the player an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerId {
    Backpack,
    QuickBar,
}

/// Player-level notifications
///
/// `effects` lists the item's effect IDs for the trigger matching the event.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInventoryEvent {
    ItemPicked {
        item_id: ItemId,
        quantity: u32,
        effects: Vec<String>,
    },
    ItemRemoved {
        item_id: ItemId,
        quantity: u32,
    },
    Equipped {
        slot_id: String,
        item_id: ItemId,
        quantity: u32,
        effects: Vec<String>,
    },
    Unequipped {
        slot_id: String,
        item_id: ItemId,
        quantity: u32,
        effects: Vec<String>,
    },
    /// Units that could not be put back anywhere after a failed transfer
    ItemsLost {
        item_id: ItemId,
        quantity: u32,
    },
}

/// Everything a player carries
pub struct PlayerInventory {
    config: InventoryConfig,
    backpack: InventoryContainer,
    quick_bar: InventoryContainer,
    /// Special slots in config order
    special_slots: Vec<SpecialInventorySlot>,
    observers: Observers<PlayerInventoryEvent>,
}

impl PlayerInventory {
    /// Build the containers and slots described by `config`
    ///
    /// A primary weapon slot is added when the config does not name one.
    /// Duplicate slot ids are skipped and a zero `max_quantity` is raised to 1.
    pub fn new(config: InventoryConfig) -> Self {
        let mut special_slots: Vec<SpecialInventorySlot> = Vec::new();
        for slot_config in &config.special_slots {
            if special_slots.iter().any(|s| s.slot_id() == slot_config.slot_id) {
                log::warn!("Ignoring duplicate special slot {}", slot_config.slot_id);
                continue;
            }
            let mut slot_config = slot_config.clone();
            if slot_config.max_quantity == 0 {
                log::warn!("Special slot {} has max_quantity 0, using 1", slot_config.slot_id);
                slot_config.max_quantity = 1;
            }
            special_slots.push(SpecialInventorySlot::new(slot_config));
        }
        if !special_slots.iter().any(|s| s.slot_id() == slot_ids::PRIMARY_WEAPON) {
            special_slots.push(SpecialInventorySlot::new(SpecialSlotConfig::default_weapon()));
        }

        Self {
            backpack: InventoryContainer::new(config.backpack_slots),
            quick_bar: InventoryContainer::new(config.quick_bar_slots),
            special_slots,
            observers: Observers::new(),
            config,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn backpack(&self) -> &InventoryContainer {
        &self.backpack
    }

    pub fn quick_bar(&self) -> &InventoryContainer {
        &self.quick_bar
    }

    pub fn container(&self, id: ContainerId) -> &InventoryContainer {
        match id {
            ContainerId::Backpack => &self.backpack,
            ContainerId::QuickBar => &self.quick_bar,
        }
    }

    /// Direct container access; changes made here raise container events only
    pub fn container_mut(&mut self, id: ContainerId) -> &mut InventoryContainer {
        match id {
            ContainerId::Backpack => &mut self.backpack,
            ContainerId::QuickBar => &mut self.quick_bar,
        }
    }

    pub fn special_slots(&self) -> &[SpecialInventorySlot] {
        &self.special_slots
    }

    pub fn special_slot(&self, slot_id: &str) -> Option<&SpecialInventorySlot> {
        self.slot_position(slot_id).map(|i| &self.special_slots[i])
    }

    pub fn special_slot_mut(&mut self, slot_id: &str) -> Option<&mut SpecialInventorySlot> {
        self.slot_position(slot_id).map(move |i| &mut self.special_slots[i])
    }

    pub fn weapon_slot(&self) -> Option<&SpecialInventorySlot> {
        self.special_slot(slot_ids::PRIMARY_WEAPON)
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&PlayerInventoryEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Add the whole amount to the backpack or report failure
    ///
    /// Like `InventoryContainer::try_add_item`, a partial insertion is kept.
    pub fn try_add_item(&mut self, item: &Arc<ItemDefinition>, amount: u32) -> bool {
        let accepted = self.backpack.add_item(item, amount);
        self.notify_picked(item, accepted);
        accepted == amount
    }

    /// Route through the quick bar then the backpack; returns the accepted amount
    pub fn add_item_smart(&mut self, item: &Arc<ItemDefinition>, amount: u32) -> u32 {
        let accepted =
            self.config
                .routing
                .add_item_smart(&mut self.quick_bar, &mut self.backpack, item, amount);
        self.notify_picked(item, accepted);
        accepted
    }

    /// Acquire items while the player holds quick-bar slot `hand_slot`
    ///
    /// An open hand slot (empty or holding a placeholder, and not reserved)
    /// is filled first; everything else goes through smart routing.
    pub fn pick_up(&mut self, item: &Arc<ItemDefinition>, amount: u32, hand_slot: Option<usize>) -> u32 {
        let mut accepted = 0;

        if let Some(hand) = hand_slot.filter(|&slot| self.is_open_hand_slot(slot)) {
            accepted += self.quick_bar.try_add_item_to_slot(item, amount, hand);
        }
        if accepted < amount {
            accepted += self.config.routing.add_item_smart(
                &mut self.quick_bar,
                &mut self.backpack,
                item,
                amount - accepted,
            );
        }

        self.notify_picked(item, accepted);
        accepted
    }

    /// Remove up to `amount` of an item from the backpack
    pub fn remove_item(&mut self, item_id: &str, amount: u32) -> u32 {
        let removed = self.backpack.remove_item(item_id, amount);
        if removed > 0 {
            self.observers.notify(&PlayerInventoryEvent::ItemRemoved {
                item_id: ItemId::new(item_id),
                quantity: removed,
            });
        }
        removed
    }

    /// Remove the first backpack stack of an item, returning its quantity
    pub fn remove_first_item(&mut self, item_id: &str) -> u32 {
        let Some(slot) = self.backpack.find_item(item_id) else {
            return 0;
        };
        let Some(stack) = self.backpack.take_stack(slot) else {
            return 0;
        };

        self.observers.notify(&PlayerInventoryEvent::ItemRemoved {
            item_id: stack.item_id().clone(),
            quantity: stack.quantity(),
        });
        stack.quantity()
    }

    /// Move a stack from a container slot into an empty special slot
    ///
    /// `requested` of 0 means the whole stack; the amount is then clamped by
    /// the slot. On failure the extracted units go back to where they came
    /// from.
    pub fn try_equip_from(
        &mut self,
        source: ContainerId,
        index: usize,
        slot_id: &str,
        requested: u32,
    ) -> bool {
        let Some(pos) = self.slot_position(slot_id) else {
            log::warn!("Unknown special slot {}", slot_id);
            return false;
        };

        let slot = &self.special_slots[pos];
        if !slot.is_empty() {
            return false;
        }
        let Some(stack) = self.container(source).get_stack(index) else {
            return false;
        };
        if !slot.can_accept(stack.item()) {
            return false;
        }

        let wanted = match requested {
            0 => stack.quantity(),
            n => n.min(stack.quantity()),
        };
        let amount = slot.clamp_quantity(wanted);
        if amount == 0 {
            return false;
        }

        let Some(extracted) = self.container_mut(source).try_extract_from_slot(index, amount) else {
            return false;
        };
        let item = extracted.item().clone();
        let quantity = extracted.quantity();

        match self.special_slots[pos].try_assign(extracted, false) {
            Ok(Assignment { overflow, displaced }) => {
                let mut equipped = quantity;
                if let Some(overflow) = overflow {
                    equipped -= overflow.quantity();
                    self.restore_into(source, index, overflow);
                }
                if let Some(displaced) = displaced {
                    self.restore_into(source, index, displaced);
                }

                self.observers.notify(&PlayerInventoryEvent::Equipped {
                    slot_id: slot_id.to_string(),
                    item_id: item.id.clone(),
                    quantity: equipped,
                    effects: effect_ids(&item, EffectTrigger::OnEquip),
                });
                true
            }
            Err(rejected) => {
                self.restore_into(source, index, rejected);
                false
            }
        }
    }

    pub fn try_equip_weapon_from_backpack(&mut self, index: usize) -> bool {
        self.try_equip_from(ContainerId::Backpack, index, slot_ids::PRIMARY_WEAPON, 0)
    }

    /// Move a special slot's stack into the backpack
    ///
    /// Returns false when the slot is empty or the backpack could not take
    /// everything; the leftover stays in the special slot.
    pub fn try_unequip_to_backpack(&mut self, slot_id: &str) -> bool {
        let Some(pos) = self.slot_position(slot_id) else {
            return false;
        };
        let Some(stack) = self.special_slots[pos].take_stack() else {
            return false;
        };

        let item = stack.item().clone();
        let stored = self.backpack.add_item(&item, stack.quantity());
        let remaining = stack.quantity() - stored;

        if remaining > 0 {
            let leftover = InventoryItemStack::new(item.clone(), remaining);
            match self.special_slots[pos].try_assign(leftover, true) {
                Ok(assignment) => {
                    for lost in assignment.overflow.into_iter().chain(assignment.displaced) {
                        self.report_loss(lost.item_id(), lost.quantity());
                    }
                }
                Err(lost) => self.report_loss(lost.item_id(), lost.quantity()),
            }
        }

        if stored > 0 {
            self.observers.notify(&PlayerInventoryEvent::Unequipped {
                slot_id: slot_id.to_string(),
                item_id: item.id.clone(),
                quantity: stored,
                effects: effect_ids(&item, EffectTrigger::OnUnequip),
            });
        }
        remaining == 0
    }

    pub fn try_unequip_weapon_to_backpack(&mut self) -> bool {
        self.try_unequip_to_backpack(slot_ids::PRIMARY_WEAPON)
    }

    /// Drop items from a container slot into the world
    ///
    /// Extracts `drop_amount_per_action` units (0 = whole stack) and hands
    /// them to `spawn`. A refused stack is put back. Returns the amount
    /// dropped.
    pub fn drop_from_slot<F>(&mut self, source: ContainerId, index: usize, spawn: F) -> u32
    where
        F: FnOnce(InventoryItemStack) -> Result<(), InventoryItemStack>,
    {
        let amount = match self.config.drop_amount_per_action {
            0 => match self.container(source).get_stack(index) {
                Some(stack) => stack.quantity(),
                None => return 0,
            },
            n => n,
        };

        let Some(extracted) = self.container_mut(source).try_extract_from_slot(index, amount) else {
            return 0;
        };
        let item_id = extracted.item_id().clone();
        let quantity = extracted.quantity();

        match spawn(extracted) {
            Ok(()) => {
                self.observers.notify(&PlayerInventoryEvent::ItemRemoved { item_id, quantity });
                quantity
            }
            Err(refused) => {
                log::warn!("World refused {} x {}, restoring", refused.quantity(), refused.item_id());
                self.restore_into(source, index, refused);
                0
            }
        }
    }

    /// Resolve an attribute over backpack, quick bar and special slots
    pub fn attribute_value(&self, attribute_id: &str, base: f32) -> f32 {
        if attribute_id.trim().is_empty() {
            return base;
        }

        let mut accumulator = AttributeAccumulator::new();
        self.backpack.accumulate_into(attribute_id, &mut accumulator);
        self.quick_bar.accumulate_into(attribute_id, &mut accumulator);
        for stack in self.equipped_stacks() {
            if let Some(attribute) = stack.attribute(attribute_id) {
                accumulator.accumulate(attribute, stack.quantity());
            }
        }

        if accumulator.has_contribution() {
            accumulator.resolve(base)
        } else {
            base
        }
    }

    /// Every attribute contributed anywhere, resolved from zero
    pub fn attribute_snapshot(&self) -> BTreeMap<String, f32> {
        let mut accumulators: BTreeMap<String, AttributeAccumulator> = BTreeMap::new();
        self.backpack.accumulate_all(&mut accumulators);
        self.quick_bar.accumulate_all(&mut accumulators);
        for stack in self.equipped_stacks() {
            for attribute in stack.attributes() {
                accumulators
                    .entry(attribute.attribute_id.clone())
                    .or_default()
                    .accumulate(attribute, stack.quantity());
            }
        }

        accumulators
            .into_iter()
            .map(|(id, acc)| (id, acc.resolve(0.0)))
            .collect()
    }

    pub fn backpack_attribute_value(&self, attribute_id: &str, base: f32) -> f32 {
        self.backpack.get_attribute_value(attribute_id, base)
    }

    pub fn backpack_attribute_snapshot(&self) -> BTreeMap<String, f32> {
        self.backpack.get_attribute_snapshot()
    }

    /// Total quantity of an item across every container and slot
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.equipped_stacks()
            .filter(|s| s.item_id() == item_id)
            .map(|s| s.quantity())
            .fold(
                self.backpack
                    .count_item(item_id)
                    .saturating_add(self.quick_bar.count_item(item_id)),
                u32::saturating_add,
            )
    }

    pub fn snapshot(&self) -> PlayerInventorySnapshot {
        PlayerInventorySnapshot {
            backpack: ContainerSnapshot::capture(&self.backpack),
            quick_bar: ContainerSnapshot::capture(&self.quick_bar),
            special_slots: self
                .special_slots
                .iter()
                .filter_map(|slot| {
                    slot.stack()
                        .map(|stack| (slot.slot_id().to_string(), StackRecord::capture(stack)))
                })
                .collect(),
        }
    }

    /// Replace all contents with `snapshot`
    ///
    /// Nothing changes unless every part of the snapshot is valid.
    pub fn restore(&mut self, snapshot: &PlayerInventorySnapshot, catalog: &ItemCatalog) -> SnapshotResult<()> {
        let backpack = snapshot.backpack.resolve(self.backpack.slot_count(), catalog)?;
        let quick_bar = snapshot.quick_bar.resolve(self.quick_bar.slot_count(), catalog)?;

        let mut equipped = Vec::new();
        for (slot_id, record) in &snapshot.special_slots {
            let pos = self
                .slot_position(slot_id)
                .ok_or_else(|| SnapshotError::UnknownSpecialSlot(slot_id.clone()))?;
            let Some(stack) = record.resolve(catalog)? else {
                continue;
            };

            let slot = &self.special_slots[pos];
            if !slot.can_accept(stack.item()) {
                return Err(SnapshotError::NotAccepted {
                    slot_id: slot_id.clone(),
                    item_id: record.item_id.clone(),
                });
            }
            let max = slot.config().max_quantity;
            if stack.quantity() > max {
                return Err(SnapshotError::QuantityExceedsStack {
                    item_id: record.item_id.clone(),
                    quantity: stack.quantity(),
                    max,
                });
            }
            equipped.push((pos, stack));
        }

        fill_slots(&mut self.backpack, backpack);
        fill_slots(&mut self.quick_bar, quick_bar);
        for slot in &mut self.special_slots {
            slot.take_stack();
        }
        for (pos, stack) in equipped {
            if let Err(rejected) = self.special_slots[pos].try_assign(stack, true) {
                self.report_loss(rejected.item_id(), rejected.quantity());
            }
        }

        log::debug!(
            "Restored inventory: {} backpack stacks, {} quick bar stacks, {} special slots",
            self.backpack.used_slots(),
            self.quick_bar.used_slots(),
            snapshot.special_slots.len()
        );
        Ok(())
    }

    fn slot_position(&self, slot_id: &str) -> Option<usize> {
        if slot_id.trim().is_empty() {
            return None;
        }
        self.special_slots.iter().position(|s| s.slot_id() == slot_id)
    }

    fn equipped_stacks(&self) -> impl Iterator<Item = &InventoryItemStack> {
        self.special_slots.iter().filter_map(|s| s.stack())
    }

    fn is_open_hand_slot(&self, slot: usize) -> bool {
        if slot >= self.quick_bar.slot_count() || self.config.routing.is_reserved(slot) {
            return false;
        }
        self.quick_bar
            .get_stack(slot)
            .map_or(true, |s| s.item().is_placeholder())
    }

    /// Put a stack back into its original slot, then anywhere in the same container
    fn restore_into(&mut self, target: ContainerId, index: usize, stack: InventoryItemStack) {
        let item = stack.item().clone();
        let mut remaining = stack.quantity();

        let container = self.container_mut(target);
        remaining -= container.try_add_item_to_slot(&item, remaining, index);
        if remaining > 0 {
            remaining -= container.add_item(&item, remaining);
        }

        if remaining > 0 {
            self.report_loss(&item.id, remaining);
        }
    }

    fn report_loss(&self, item_id: &ItemId, quantity: u32) {
        log::error!("Lost {} x {} while restoring a failed transfer", quantity, item_id);
        self.observers.notify(&PlayerInventoryEvent::ItemsLost {
            item_id: item_id.clone(),
            quantity,
        });
    }

    fn notify_picked(&self, item: &ItemDefinition, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.observers.notify(&PlayerInventoryEvent::ItemPicked {
            item_id: item.id.clone(),
            quantity,
            effects: effect_ids(item, EffectTrigger::OnPickup),
        });
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new(InventoryConfig::default())
    }
}

impl std::fmt::Debug for PlayerInventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerInventory")
            .field("backpack_used", &self.backpack.used_slots())
            .field("quick_bar_used", &self.quick_bar.used_slots())
            .field("special_slots", &self.special_slots.len())
            .finish()
    }
}

fn effect_ids(item: &ItemDefinition, trigger: EffectTrigger) -> Vec<String> {
    item.effects_for(trigger).map(|e| e.effect_id.clone()).collect()
}
