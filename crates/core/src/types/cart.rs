//! Cart line entries and catalog snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ItemId, Price};

/// Minimum quantity a stored cart line may hold.
pub const MIN_QUANTITY: u32 = 1;
/// Maximum quantity a stored cart line may hold.
pub const MAX_QUANTITY: u32 = 99;

/// Clamp a requested quantity into the `[MIN_QUANTITY, MAX_QUANTITY]` range.
///
/// Quantities below the minimum are not clamped up; callers treat them as a
/// removal request instead (see `CartService::update_quantity`).
#[must_use]
pub const fn clamp_quantity(quantity: u32) -> u32 {
    if quantity > MAX_QUANTITY {
        MAX_QUANTITY
    } else {
        quantity
    }
}

/// One item/quantity pair within a cart.
///
/// Entries are unique by `item_id`; adding an existing item increments the
/// quantity of its entry rather than appending a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineEntry {
    pub item_id: ItemId,
    pub quantity: u32,
    /// When the entry was first added. Informational only; entries keep their
    /// insertion order regardless of this value.
    pub added_at: DateTime<Utc>,
}

impl CartLineEntry {
    /// Create a new entry stamped with the current time.
    #[must_use]
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self {
            item_id,
            quantity,
            added_at: Utc::now(),
        }
    }
}

/// Read-only catalog data for one item, as served by the catalog API.
///
/// The cart never mutates these; it only joins against them by `item_id`
/// to resolve display fields and compute totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemSnapshot {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub image_ref: Option<String>,
    pub category_name: Option<String>,
}

impl CatalogItemSnapshot {
    /// Line total for `quantity` units of this item.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.price.amount * Decimal::from(quantity)
    }
}
