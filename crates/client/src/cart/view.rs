//! Cart view models.
//!
//! Pure functions from entries + catalog snapshots to the structure a
//! rendering surface displays. Totals are recomputed on every render; the
//! view never caches money.

use rust_decimal::Decimal;

use floret_core::{CartLineEntry, CatalogItemSnapshot, ItemId, MAX_QUANTITY, MIN_QUANTITY, Price};

/// Message shown when the cart has nothing to display.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Call-to-action shown alongside the empty-cart message.
pub const EMPTY_CART_CTA: &str = "Continue shopping";

/// One renderable cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub image_ref: Option<String>,
    pub unit_price: Price,
    pub quantity: u32,
    /// Lower bound of the quantity control.
    pub min_quantity: u32,
    /// Upper bound of the quantity control.
    pub max_quantity: u32,
    /// `unit_price × quantity`, rounded to 2 decimal places.
    pub line_total: Decimal,
}

/// A populated cart, lines in entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledCart {
    pub lines: Vec<CartLine>,
    /// Sum of line totals, recomputed per render.
    pub grand_total: Decimal,
}

/// What the cart page shows.
///
/// An empty cart is its own variant rather than a zero-line [`FilledCart`];
/// the page swaps the whole layout, it doesn't render an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    Empty,
    Filled(FilledCart),
}

impl CartView {
    /// Build the view for `entries` against `catalog`.
    ///
    /// Entries whose item has no catalog snapshot are dropped entirely; a
    /// row with no name and a zero price would be worse than no row. If
    /// nothing survives the join, the view is [`CartView::Empty`].
    #[must_use]
    pub fn render(entries: &[CartLineEntry], catalog: &[CatalogItemSnapshot]) -> Self {
        let lines: Vec<CartLine> = entries
            .iter()
            .filter_map(|entry| {
                catalog
                    .iter()
                    .find(|snapshot| snapshot.id == entry.item_id)
                    .map(|snapshot| CartLine {
                        item_id: entry.item_id,
                        name: snapshot.name.clone(),
                        image_ref: snapshot.image_ref.clone(),
                        unit_price: snapshot.price,
                        quantity: entry.quantity,
                        min_quantity: MIN_QUANTITY,
                        max_quantity: MAX_QUANTITY,
                        line_total: snapshot.line_total(entry.quantity).round_dp(2),
                    })
            })
            .collect();

        if lines.is_empty() {
            return Self::Empty;
        }

        let grand_total = lines.iter().map(|line| line.line_total).sum();
        Self::Filled(FilledCart { lines, grand_total })
    }
}
