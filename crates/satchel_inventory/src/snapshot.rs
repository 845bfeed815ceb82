//! Flat snapshots of slot contents for save files

use crate::catalog::ItemCatalog;
use crate::container::InventoryContainer;
use crate::item::ItemId;
use crate::stack::InventoryItemStack;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Errors raised while rehydrating a snapshot
///
/// Restoration validates the whole snapshot first, so on error the target
/// is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("Unknown item id: {0}")]
    UnknownItem(ItemId),

    #[error("Slot {index} is outside a {slot_count}-slot container")]
    SlotOutOfRange { index: usize, slot_count: usize },

    #[error("Slot {0} appears more than once")]
    DuplicateSlot(usize),

    #[error("{quantity} x {item_id} exceeds the max stack size of {max}")]
    QuantityExceedsStack { item_id: ItemId, quantity: u32, max: u32 },

    #[error("Unknown special slot: {0}")]
    UnknownSpecialSlot(String),

    #[error("Special slot {slot_id} does not accept {item_id}")]
    NotAccepted { slot_id: String, item_id: ItemId },
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Item and quantity of one stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRecord {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl StackRecord {
    pub fn capture(stack: &InventoryItemStack) -> Self {
        Self {
            item_id: stack.item_id().clone(),
            quantity: stack.quantity(),
        }
    }

    /// Resolve against the catalog; `Ok(None)` for a zero quantity
    pub fn resolve(&self, catalog: &ItemCatalog) -> SnapshotResult<Option<InventoryItemStack>> {
        let item = catalog
            .get(self.item_id.as_str())
            .ok_or_else(|| SnapshotError::UnknownItem(self.item_id.clone()))?;

        if self.quantity > item.max_stack_size {
            return Err(SnapshotError::QuantityExceedsStack {
                item_id: self.item_id.clone(),
                quantity: self.quantity,
                max: item.max_stack_size,
            });
        }
        if self.quantity == 0 {
            return Ok(None);
        }
        Ok(Some(InventoryItemStack::new(item, self.quantity)))
    }
}

/// One occupied slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub index: usize,
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Occupied slots of a container, in index order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub slot_count: usize,
    pub slots: Vec<SlotRecord>,
}

impl ContainerSnapshot {
    /// Enumerate a container's slots
    pub fn capture(container: &InventoryContainer) -> Self {
        Self {
            slot_count: container.slot_count(),
            slots: container
                .iter_stacks()
                .map(|(index, stack)| SlotRecord {
                    index,
                    item_id: stack.item_id().clone(),
                    quantity: stack.quantity(),
                })
                .collect(),
        }
    }

    /// Total quantity recorded for an item
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|r| r.item_id == item_id)
            .map(|r| r.quantity)
            .fold(0u32, u32::saturating_add)
    }

    /// Overwrite every slot of `container` with this snapshot
    ///
    /// Slots without a record are cleared. Returns the number of slots filled.
    pub fn restore(&self, container: &mut InventoryContainer, catalog: &ItemCatalog) -> SnapshotResult<usize> {
        let stacks = self.resolve(container.slot_count(), catalog)?;
        let filled = stacks.len();
        fill_slots(container, stacks);
        Ok(filled)
    }

    /// Validate every record and build the stacks, keyed by slot
    pub fn resolve(
        &self,
        slot_count: usize,
        catalog: &ItemCatalog,
    ) -> SnapshotResult<BTreeMap<usize, InventoryItemStack>> {
        if self.slot_count != slot_count {
            log::warn!(
                "Restoring a {}-slot snapshot into {} slots",
                self.slot_count,
                slot_count
            );
        }

        let mut seen = HashSet::new();
        let mut stacks = BTreeMap::new();

        for record in &self.slots {
            if record.index >= slot_count {
                return Err(SnapshotError::SlotOutOfRange {
                    index: record.index,
                    slot_count,
                });
            }
            if !seen.insert(record.index) {
                return Err(SnapshotError::DuplicateSlot(record.index));
            }

            let stack = StackRecord {
                item_id: record.item_id.clone(),
                quantity: record.quantity,
            }
            .resolve(catalog)?;

            if let Some(stack) = stack {
                stacks.insert(record.index, stack);
            }
        }

        Ok(stacks)
    }
}

/// Write resolved stacks into every slot, clearing the rest
pub(crate) fn fill_slots(container: &mut InventoryContainer, mut stacks: BTreeMap<usize, InventoryItemStack>) {
    for index in 0..container.slot_count() {
        container.set_stack(index, stacks.remove(&index));
    }
}

/// Everything a player inventory holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInventorySnapshot {
    pub backpack: ContainerSnapshot,
    pub quick_bar: ContainerSnapshot,
    /// Occupied special slots by slot ID
    pub special_slots: BTreeMap<String, StackRecord>,
}

impl PlayerInventorySnapshot {
    /// Total quantity recorded for an item across all parts
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.special_slots
            .values()
            .filter(|r| r.item_id == item_id)
            .map(|r| r.quantity)
            .fold(
                self.backpack
                    .count_item(item_id)
                    .saturating_add(self.quick_bar.count_item(item_id)),
                u32::saturating_add,
            )
    }
}
