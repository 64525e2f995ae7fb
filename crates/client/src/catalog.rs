//! Catalog reads.
//!
//! The cart only needs read-only snapshots to resolve names and prices;
//! catalog management is server territory.

use tracing::instrument;

use floret_core::CatalogItemSnapshot;

use crate::error::Result;
use crate::http::ApiClient;

/// Client for the public catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All catalog items currently on sale.
    #[instrument(skip(self))]
    pub async fn items(&self) -> Result<Vec<CatalogItemSnapshot>> {
        self.api.get("/api/items").await
    }
}
