//! Items lying in the world

use crate::player::PlayerInventory;
use crate::stack::InventoryItemStack;

/// Result of a pickup attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// Everything was taken; the world item is now disabled
    Picked { quantity: u32 },
    /// Some units were taken, the rest stays in the world
    Partial { picked: u32, remaining: u32 },
    /// Nothing was taken
    Refused,
}

/// A stack waiting to be picked up
#[derive(Debug, Clone)]
pub struct WorldItem {
    /// Item stack to pick up
    pub stack: InventoryItemStack,
    /// Whether the pickup is enabled
    pub enabled: bool,
}

impl WorldItem {
    pub fn new(stack: InventoryItemStack) -> Self {
        let enabled = !stack.is_empty();
        Self { stack, enabled }
    }

    /// Check if can be picked up
    pub fn can_pickup(&self) -> bool {
        self.enabled && !self.stack.is_empty()
    }

    /// Move as much of the stack as possible into `inventory`
    ///
    /// `hand_slot` is the quick-bar index the player currently holds.
    pub fn try_pickup(&mut self, inventory: &mut PlayerInventory, hand_slot: Option<usize>) -> PickupOutcome {
        if !self.can_pickup() {
            return PickupOutcome::Refused;
        }

        let item = self.stack.item().clone();
        let picked = inventory.pick_up(&item, self.stack.quantity(), hand_slot);
        self.stack.remove(picked);

        if self.stack.is_empty() {
            self.enabled = false;
            PickupOutcome::Picked { quantity: picked }
        } else if picked > 0 {
            log::debug!("Picked {} {}, {} left in the world", picked, item.id, self.stack.quantity());
            PickupOutcome::Partial {
                picked,
                remaining: self.stack.quantity(),
            }
        } else {
            log::warn!("No room to pick up {}", item.id);
            PickupOutcome::Refused
        }
    }
}
