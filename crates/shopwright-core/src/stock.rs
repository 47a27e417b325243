use crate::id::ItemKindId;
use serde::{Serialize, Deserialize};

/// A stack of fungible items of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemKindId,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item: ItemKindId, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// Bounded contents of a stockable fixture (display cabinet, wall shelf, ...).
///
/// Capacity counts items across all kinds, not stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub stacks: Vec<ItemStack>,
    pub capacity: u32,
}

impl Stock {
    pub fn new(capacity: u32) -> Self {
        Self {
            stacks: Vec::new(),
            capacity,
        }
    }

    /// Add items of one kind. Returns the amount that didn't fit.
    #[must_use = "overflow count indicates items that did not fit"]
    pub fn add(&mut self, item: ItemKindId, quantity: u32) -> u32 {
        let space = self.capacity.saturating_sub(self.total());
        let to_add = quantity.min(space);
        let overflow = quantity - to_add;

        if to_add > 0 {
            if let Some(stack) = self.stacks.iter_mut().find(|s| s.item == item) {
                stack.quantity += to_add;
            } else {
                self.stacks.push(ItemStack::new(item, to_add));
            }
        }

        overflow
    }

    /// Remove items of one kind. Returns the amount actually removed.
    #[must_use = "returns the quantity actually removed, which may be less than requested"]
    pub fn remove(&mut self, item: ItemKindId, quantity: u32) -> u32 {
        if let Some(stack) = self.stacks.iter_mut().find(|s| s.item == item) {
            let to_remove = quantity.min(stack.quantity);
            stack.quantity -= to_remove;
            if stack.quantity == 0 {
                self.stacks.retain(|s| s.quantity > 0);
            }
            to_remove
        } else {
            0
        }
    }

    /// Quantity of a specific item kind.
    pub fn quantity(&self, item: ItemKindId) -> u32 {
        self.stacks
            .iter()
            .find(|s| s.item == item)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    /// Total items across all kinds.
    pub fn total(&self) -> u32 {
        self.stacks.iter().map(|s| s.quantity).sum()
    }

    pub fn has_space(&self) -> bool {
        self.total() < self.capacity
    }

    pub fn is_full(&self) -> bool {
        !self.has_space()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_add_and_remove() {
        let mut stock = Stock::new(100);
        let jar = ItemKindId(0);
        let overflow = stock.add(jar, 50);
        assert_eq!(overflow, 0);
        assert_eq!(stock.quantity(jar), 50);

        let removed = stock.remove(jar, 30);
        assert_eq!(removed, 30);
        assert_eq!(stock.quantity(jar), 20);
    }

    #[test]
    fn stock_overflow() {
        let mut stock = Stock::new(10);
        let jar = ItemKindId(0);
        let overflow = stock.add(jar, 15);
        assert_eq!(overflow, 5);
        assert_eq!(stock.quantity(jar), 10);
        assert!(stock.is_full());
    }

    #[test]
    fn stock_remove_more_than_available() {
        let mut stock = Stock::new(100);
        let jar = ItemKindId(0);
        let _ = stock.add(jar, 5);
        let removed = stock.remove(jar, 10);
        assert_eq!(removed, 5);
        assert_eq!(stock.quantity(jar), 0);
        assert!(stock.stacks.is_empty());
    }

    #[test]
    fn stock_multiple_kinds() {
        let mut stock = Stock::new(100);
        let jar = ItemKindId(0);
        let tin = ItemKindId(1);
        let _ = stock.add(jar, 30);
        let _ = stock.add(tin, 20);
        assert_eq!(stock.total(), 50);
        assert_eq!(stock.quantity(jar), 30);
        assert_eq!(stock.quantity(tin), 20);
    }

    #[test]
    fn stock_full_rejects_everything() {
        let mut stock = Stock::new(10);
        let jar = ItemKindId(0);
        let _ = stock.add(jar, 10);
        let overflow = stock.add(jar, 20);
        assert_eq!(overflow, 20);
        assert_eq!(stock.total(), 10);
    }

    #[test]
    fn stock_has_space() {
        let mut stock = Stock::new(10);
        assert!(stock.has_space());
        let _ = stock.add(ItemKindId(0), 10);
        assert!(!stock.has_space());
    }
}
