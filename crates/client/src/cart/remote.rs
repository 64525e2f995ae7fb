//! Server-backed cart.
//!
//! The server owns the cart state and identifies it by session; this gateway
//! only issues requests and reads back the authoritative count. Mutations
//! return nothing on success because the page re-reads whatever it needs.

use serde::Serialize;
use tracing::instrument;

use floret_core::ItemId;

use crate::error::Result;
use crate::http::ApiClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartRequest {
    item_id: ItemId,
    quantity: u32,
}

/// Gateway to the server-side cart endpoints.
#[derive(Debug, Clone)]
pub struct RemoteCartGateway {
    api: ApiClient,
}

impl RemoteCartGateway {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Add `quantity` of an item to the session cart.
    #[instrument(skip(self))]
    pub async fn add(&self, item: ItemId, quantity: u32) -> Result<()> {
        self.api
            .post("/api/cart/add", &AddToCartRequest { item_id: item, quantity })
            .await
    }

    /// Remove an item from the session cart.
    #[instrument(skip(self))]
    pub async fn remove(&self, item: ItemId) -> Result<()> {
        self.api.delete(&format!("/api/cart/remove/{item}")).await
    }

    /// Set an item's quantity. The caller clamps before this is issued.
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, item: ItemId, quantity: u32) -> Result<()> {
        self.api
            .put(&format!("/api/cart/update/{item}?quantity={quantity}"))
            .await
    }

    /// Empty the session cart.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        self.api.delete("/api/cart/clear").await
    }

    /// Authoritative item count for the session cart.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u32> {
        self.api.get("/api/cart/count").await
    }
}
