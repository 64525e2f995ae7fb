//! Locally persisted cart.
//!
//! Entries live as one serialized list under a fixed slot of the key-value
//! store, rewritten synchronously after every mutation. The store knows
//! nothing about the catalog; pricing joins against snapshots supplied by
//! the caller.

use rust_decimal::Decimal;

use floret_core::{CartLineEntry, CatalogItemSnapshot, ItemId, MAX_QUANTITY, MIN_QUANTITY};

use crate::error::Result;
use crate::storage::{CART_KEY, KeyValueStore};

/// Cart entries persisted on this device.
#[derive(Debug, Clone)]
pub struct LocalCartStore {
    store: KeyValueStore,
}

impl LocalCartStore {
    #[must_use]
    pub const fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Current entries, oldest first. An absent slot is an empty cart.
    pub fn entries(&self) -> Result<Vec<CartLineEntry>> {
        Ok(self.store.get(CART_KEY)?.unwrap_or_default())
    }

    /// Add `quantity` of an item, merging with an existing entry for the
    /// same item rather than duplicating it. The merged quantity is capped
    /// at the per-line maximum.
    ///
    /// Stored entries always hold at least one unit, so adding less than
    /// the minimum is a no-op.
    pub fn add(&self, item: ItemId, quantity: u32) -> Result<()> {
        if quantity < MIN_QUANTITY {
            return Ok(());
        }
        let mut entries = self.entries()?;
        if let Some(entry) = entries.iter_mut().find(|e| e.item_id == item) {
            entry.quantity = entry.quantity.saturating_add(quantity).min(MAX_QUANTITY);
        } else {
            entries.push(CartLineEntry::new(item, quantity.min(MAX_QUANTITY)));
        }
        self.persist(&entries)
    }

    /// Remove an item. Removing an item that is not in the cart is a no-op.
    pub fn remove(&self, item: ItemId) -> Result<()> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|e| e.item_id != item);
        if entries.len() != before {
            self.persist(&entries)?;
        }
        Ok(())
    }

    /// Set an item's quantity. A quantity below one removes the entry.
    pub fn set_quantity(&self, item: ItemId, quantity: u32) -> Result<()> {
        if quantity < 1 {
            return self.remove(item);
        }
        let mut entries = self.entries()?;
        if let Some(entry) = entries.iter_mut().find(|e| e.item_id == item) {
            entry.quantity = quantity.min(MAX_QUANTITY);
            self.persist(&entries)?;
        }
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CART_KEY)?;
        Ok(())
    }

    /// Total number of units across all entries.
    pub fn item_count(&self) -> Result<u32> {
        Ok(self.entries()?.iter().map(|e| e.quantity).sum())
    }

    /// Sum of line totals, joined against catalog snapshots.
    ///
    /// Entries whose item has no snapshot are skipped; a stale entry must
    /// not distort the total.
    pub fn total_price(&self, catalog: &[CatalogItemSnapshot]) -> Result<Decimal> {
        let total = self
            .entries()?
            .iter()
            .filter_map(|entry| {
                catalog
                    .iter()
                    .find(|snapshot| snapshot.id == entry.item_id)
                    .map(|snapshot| snapshot.line_total(entry.quantity))
            })
            .sum();
        Ok(total)
    }

    fn persist(&self, entries: &[CartLineEntry]) -> Result<()> {
        self.store.put(CART_KEY, &entries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floret_core::{CurrencyCode, Price};

    fn temp_store() -> (tempfile::TempDir, LocalCartStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalCartStore::new(KeyValueStore::new(dir.path().join("storage.json")));
        (dir, store)
    }

    fn snapshot(id: i64, amount: Decimal) -> CatalogItemSnapshot {
        CatalogItemSnapshot {
            id: ItemId::new(id),
            name: format!("Bouquet {id}"),
            price: Price::new(amount, CurrencyCode::RUB),
            image_ref: None,
            category_name: None,
        }
    }

    #[test]
    fn test_add_merges_by_item_id() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(7), 2).expect("add");
        cart.add(ItemId::new(7), 3).expect("add");

        let entries = cart.entries().expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 5);
    }

    #[test]
    fn test_merged_quantity_is_capped() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(7), 60).expect("add");
        cart.add(ItemId::new(7), 60).expect("add");

        let entries = cart.entries().expect("entries");
        assert_eq!(entries[0].quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_add_below_minimum_stores_nothing() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(7), 0).expect("add");
        assert!(cart.entries().expect("entries").is_empty());

        // And it must not disturb an existing entry either.
        cart.add(ItemId::new(7), 2).expect("add");
        cart.add(ItemId::new(7), 0).expect("add");
        assert_eq!(cart.entries().expect("entries")[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_the_entry() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(7), 2).expect("add");
        cart.set_quantity(ItemId::new(7), 0).expect("set");
        assert!(cart.entries().expect("entries").is_empty());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(1), 2).expect("add");
        cart.add(ItemId::new(2), 3).expect("add");
        assert_eq!(cart.item_count().expect("count"), 5);
    }

    #[test]
    fn test_total_price_joins_catalog_snapshots() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(1), 2).expect("add");
        cart.add(ItemId::new(2), 3).expect("add");

        let catalog = vec![
            snapshot(1, Decimal::new(10, 0)),
            snapshot(2, Decimal::new(5, 0)),
        ];
        let total = cart.total_price(&catalog).expect("total");
        assert_eq!(total, Decimal::new(35, 0));
    }

    #[test]
    fn test_total_price_skips_unresolvable_entries() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(1), 2).expect("add");
        cart.add(ItemId::new(99), 4).expect("add");

        let catalog = vec![snapshot(1, Decimal::new(10, 0))];
        let total = cart.total_price(&catalog).expect("total");
        assert_eq!(total, Decimal::new(20, 0));
    }

    #[test]
    fn test_removing_a_missing_item_is_a_noop() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(1), 2).expect("add");
        cart.remove(ItemId::new(42)).expect("remove");
        assert_eq!(cart.entries().expect("entries").len(), 1);
    }

    #[test]
    fn test_clear_empties_the_cart() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(1), 2).expect("add");
        cart.clear().expect("clear");
        assert!(cart.entries().expect("entries").is_empty());
        assert_eq!(cart.item_count().expect("count"), 0);
    }

    #[test]
    fn test_add_preserves_original_added_at() {
        let (_dir, cart) = temp_store();
        cart.add(ItemId::new(7), 1).expect("add");
        let first = cart.entries().expect("entries")[0].added_at;
        cart.add(ItemId::new(7), 1).expect("add");
        let after_merge = cart.entries().expect("entries")[0].added_at;
        assert_eq!(first, after_merge);
    }
}
