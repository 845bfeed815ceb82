//! Smart pickup routing between the quick bar and the backpack

use crate::container::InventoryContainer;
use crate::item::ItemDefinition;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_reserved() -> Vec<usize> {
    vec![0]
}

/// Where newly acquired items go
///
/// Order: (a) top up quick-bar stacks of the same item, (b) fill free
/// quick-bar slots that are not reserved, (c) overflow into the backpack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupRouting {
    /// Quick-bar indices never filled by routing (slot 0 holds the starter item)
    #[serde(default = "default_reserved")]
    pub reserved_quick_bar_slots: Vec<usize>,
}

impl PickupRouting {
    pub fn new(reserved_quick_bar_slots: Vec<usize>) -> Self {
        Self {
            reserved_quick_bar_slots,
        }
    }

    pub fn is_reserved(&self, slot: usize) -> bool {
        self.reserved_quick_bar_slots.contains(&slot)
    }

    /// Route `amount` units of `item`, returning the accepted amount
    ///
    /// Whatever is not accepted stays with the caller.
    pub fn add_item_smart(
        &self,
        quick_bar: &mut InventoryContainer,
        backpack: &mut InventoryContainer,
        item: &Arc<ItemDefinition>,
        amount: u32,
    ) -> u32 {
        let mut remaining = amount;

        // Merge into quick-bar stacks of the same item
        for slot in 0..quick_bar.slot_count() {
            if remaining == 0 {
                break;
            }
            let mergeable = quick_bar
                .get_stack(slot)
                .map(|s| s.is_same_item(item) && !s.is_full())
                .unwrap_or(false);
            if mergeable {
                remaining -= quick_bar.try_add_item_to_slot(item, remaining, slot);
            }
        }

        // Free quick-bar slots, skipping reserved ones
        for slot in 0..quick_bar.slot_count() {
            if remaining == 0 {
                break;
            }
            if self.is_reserved(slot) {
                continue;
            }
            let free = match quick_bar.get_stack(slot) {
                None => true,
                Some(s) => s.item().is_placeholder() && !s.is_same_item(item),
            };
            if free {
                remaining -= quick_bar.try_add_item_to_slot(item, remaining, slot);
            }
        }

        if remaining > 0 {
            remaining -= backpack.add_item(item, remaining);
        }

        let accepted = amount - remaining;
        if remaining > 0 {
            log::debug!(
                "Routed {} of {} {}, {} left over",
                accepted,
                amount,
                item.id,
                remaining
            );
        }
        accepted
    }
}

impl Default for PickupRouting {
    fn default() -> Self {
        Self {
            reserved_quick_bar_slots: default_reserved(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::InventoryItemStack;

    fn potion() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("potion", "Potion").with_max_stack(10))
    }

    fn blank() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("empty_item", "").as_placeholder())
    }

    #[test]
    fn test_quick_bar_first_skipping_reserved() {
        let routing = PickupRouting::default();
        let mut quick_bar = InventoryContainer::new(3);
        let mut backpack = InventoryContainer::new(4);

        let accepted = routing.add_item_smart(&mut quick_bar, &mut backpack, &potion(), 15);

        assert_eq!(accepted, 15);
        assert!(quick_bar.get_stack(0).is_none());
        assert_eq!(quick_bar.get_stack(1).unwrap().quantity(), 10);
        assert_eq!(quick_bar.get_stack(2).unwrap().quantity(), 5);
        assert!(backpack.is_empty());
    }

    #[test]
    fn test_merge_includes_reserved_slot() {
        let potion = potion();
        let routing = PickupRouting::default();
        let mut quick_bar = InventoryContainer::new(2);
        quick_bar.set_stack(0, Some(InventoryItemStack::new(potion.clone(), 8)));
        let mut backpack = InventoryContainer::new(2);

        routing.add_item_smart(&mut quick_bar, &mut backpack, &potion, 5);

        assert_eq!(quick_bar.get_stack(0).unwrap().quantity(), 10);
        assert_eq!(quick_bar.get_stack(1).unwrap().quantity(), 3);
    }

    #[test]
    fn test_overflow_to_backpack_and_leftover() {
        let potion = potion();
        let routing = PickupRouting::new(vec![0]);
        let mut quick_bar = InventoryContainer::new(2);
        let mut backpack = InventoryContainer::new(1);

        let accepted = routing.add_item_smart(&mut quick_bar, &mut backpack, &potion, 35);

        assert_eq!(accepted, 20);
        assert_eq!(quick_bar.count_item("potion"), 10);
        assert_eq!(backpack.count_item("potion"), 10);
    }

    #[test]
    fn test_placeholder_slots_are_free() {
        let routing = PickupRouting::new(Vec::new());
        let mut quick_bar = InventoryContainer::new(2);
        quick_bar.set_stack(0, Some(InventoryItemStack::new(blank(), 1)));
        let mut backpack = InventoryContainer::new(1);

        routing.add_item_smart(&mut quick_bar, &mut backpack, &potion(), 3);

        assert_eq!(quick_bar.get_stack(0).unwrap().item_id(), "potion");
        assert!(quick_bar.get_stack(1).is_none());
    }

    #[test]
    fn test_zero_amount() {
        let routing = PickupRouting::default();
        let mut quick_bar = InventoryContainer::new(2);
        let mut backpack = InventoryContainer::new(2);

        assert_eq!(routing.add_item_smart(&mut quick_bar, &mut backpack, &potion(), 0), 0);
        assert!(quick_bar.is_empty());
        assert!(backpack.is_empty());
    }
}
