//! Cart capability.
//!
//! One interface, two backends: [`LocalCartStore`] keeps entries in the
//! durable key-value store, [`RemoteCartGateway`] talks to the server-side
//! session cart. [`CartService`] wraps whichever the configuration selects
//! and owns everything both pages shared: quantity clamping, the
//! confirmation gate on `clear`, outcome toasts, the published item
//! counter, and per-item request sequencing.

mod local;
mod remote;
mod view;

pub use local::LocalCartStore;
pub use remote::RemoteCartGateway;
pub use view::{CartLine, CartView, EMPTY_CART_CTA, EMPTY_CART_MESSAGE, FilledCart};

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::instrument;

use floret_core::{
    CartLineEntry, CatalogItemSnapshot, ItemId, MAX_QUANTITY, MIN_QUANTITY, clamp_quantity,
};

use crate::config::{CartBackendKind, ClientConfig};
use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::notify::{CART_TOAST_DWELL, NotificationKind, Notifier};
use crate::storage::KeyValueStore;

// =============================================================================
// Request sequencing
// =============================================================================

/// Per-item monotonic tokens for in-flight quantity updates.
///
/// A rapid pair of updates to the same line can complete out of order; the
/// published counter must reflect the newest request, not the newest
/// response. Callers take a token with [`Self::begin`] before issuing the
/// request and publish only if [`Self::is_current`] still holds when the
/// response lands.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Mutex<HashMap<ItemId, u64>>,
}

impl RequestSequencer {
    /// Start a new request for `item`, invalidating all earlier tokens.
    pub fn begin(&self, item: ItemId) -> u64 {
        let mut latest = self.lock();
        let token = latest.entry(item).or_insert(0);
        *token += 1;
        *token
    }

    /// Whether `token` is still the newest request for `item`.
    #[must_use]
    pub fn is_current(&self, item: ItemId, token: u64) -> bool {
        self.lock().get(&item).copied() == Some(token)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ItemId, u64>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Backend dispatch
// =============================================================================

/// Where cart state lives.
#[derive(Debug)]
pub enum CartBackend {
    /// Entries persisted on this device.
    Local(LocalCartStore),
    /// Entries owned by the server, keyed by session.
    Remote(RemoteCartGateway),
    #[cfg(test)]
    Mock(mock::MockBackend),
}

impl CartBackend {
    async fn add(&mut self, item: ItemId, quantity: u32) -> Result<()> {
        match self {
            Self::Local(store) => store.add(item, quantity),
            Self::Remote(gateway) => gateway.add(item, quantity).await,
            #[cfg(test)]
            Self::Mock(mock) => mock.next(),
        }
    }

    async fn remove(&mut self, item: ItemId) -> Result<()> {
        match self {
            Self::Local(store) => store.remove(item),
            Self::Remote(gateway) => gateway.remove(item).await,
            #[cfg(test)]
            Self::Mock(mock) => mock.next(),
        }
    }

    async fn set_quantity(&mut self, item: ItemId, quantity: u32) -> Result<()> {
        match self {
            Self::Local(store) => store.set_quantity(item, quantity),
            Self::Remote(gateway) => gateway.set_quantity(item, quantity).await,
            #[cfg(test)]
            Self::Mock(mock) => mock.next(),
        }
    }

    async fn clear(&mut self) -> Result<()> {
        match self {
            Self::Local(store) => store.clear(),
            Self::Remote(gateway) => gateway.clear().await,
            #[cfg(test)]
            Self::Mock(mock) => mock.next(),
        }
    }

    async fn count(&mut self) -> Result<u32> {
        match self {
            Self::Local(store) => store.item_count(),
            Self::Remote(gateway) => gateway.count().await,
            #[cfg(test)]
            Self::Mock(mock) => Ok(mock.count),
        }
    }
}

// =============================================================================
// Cart service
// =============================================================================

/// Backend-agnostic cart operations.
pub struct CartService {
    backend: CartBackend,
    notifier: Notifier,
    counter: watch::Sender<u32>,
    sequencer: RequestSequencer,
}

impl CartService {
    /// Wrap a backend. The counter starts at zero until the first refresh.
    #[must_use]
    pub fn new(backend: CartBackend, notifier: Notifier) -> Self {
        let (counter, _) = watch::channel(0);
        Self {
            backend,
            notifier,
            counter,
            sequencer: RequestSequencer::default(),
        }
    }

    /// Build the backend the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend's HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig, notifier: Notifier) -> Result<Self> {
        let backend = match config.cart_backend {
            CartBackendKind::Local => {
                CartBackend::Local(LocalCartStore::new(KeyValueStore::new(&config.storage_path)))
            }
            CartBackendKind::Remote => {
                CartBackend::Remote(RemoteCartGateway::new(ApiClient::new(config)?))
            }
        };
        Ok(Self::new(backend, notifier))
    }

    /// Subscribe to the published item count. Every subscriber sees every
    /// refresh, so any number of counter badges stay in sync.
    #[must_use]
    pub fn counter(&self) -> watch::Receiver<u32> {
        self.counter.subscribe()
    }

    /// Add `quantity` of an item, clamped to the `[1, 99]` range.
    #[instrument(skip(self))]
    pub async fn add(&mut self, item: ItemId, quantity: u32) -> Result<()> {
        let quantity = quantity.clamp(MIN_QUANTITY, MAX_QUANTITY);
        let outcome = self.backend.add(item, quantity).await;
        self.report(outcome, "adding to cart", Some("Item added to cart"))?;
        self.publish_count().await;
        Ok(())
    }

    /// Remove an item. Removing an item not in the cart succeeds quietly.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, item: ItemId) -> Result<()> {
        let outcome = self.backend.remove(item).await;
        self.report(outcome, "removing from cart", Some("Item removed from cart"))?;
        self.publish_count().await;
        Ok(())
    }

    /// Set an item's quantity.
    ///
    /// Below one removes the item; above the line maximum clamps before any
    /// request is issued. Responses that have been superseded by a newer
    /// update for the same item do not touch the published counter.
    #[instrument(skip(self))]
    pub async fn update_quantity(&mut self, item: ItemId, quantity: u32) -> Result<()> {
        if quantity < MIN_QUANTITY {
            return self.remove(item).await;
        }
        let quantity = clamp_quantity(quantity);
        let token = self.sequencer.begin(item);
        let outcome = self.backend.set_quantity(item, quantity).await;
        self.report(outcome, "updating cart", None)?;
        self.finish_update(item, token).await;
        Ok(())
    }

    /// Empty the cart.
    ///
    /// Clearing is destructive, so it only proceeds with `confirmed` set;
    /// otherwise it returns `false` and does nothing.
    #[instrument(skip(self))]
    pub async fn clear(&mut self, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        let outcome = self.backend.clear().await;
        self.report(outcome, "clearing cart", Some("Cart cleared"))?;
        self.publish_count().await;
        Ok(true)
    }

    /// Re-read the authoritative item count and publish it.
    #[instrument(skip(self))]
    pub async fn refresh_count(&mut self) -> Result<u32> {
        let outcome = self.backend.count().await;
        let count = self.report(outcome, "refreshing cart count", None)?;
        self.counter.send_replace(count);
        Ok(count)
    }

    /// Entries of the local backend.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the remote backend; the server-side
    /// cart has no client-visible entry list.
    pub fn entries(&self) -> Result<Vec<CartLineEntry>> {
        match &self.backend {
            CartBackend::Local(store) => store.entries(),
            _ => Err(ClientError::Validation(
                "the server-backed cart has no local entries".to_string(),
            )),
        }
    }

    /// Render the local cart against catalog snapshots.
    ///
    /// # Errors
    ///
    /// Same availability as [`Self::entries`].
    pub fn view(&self, catalog: &[CatalogItemSnapshot]) -> Result<CartView> {
        Ok(CartView::render(&self.entries()?, catalog))
    }

    /// Total price of the local cart against catalog snapshots.
    ///
    /// # Errors
    ///
    /// Same availability as [`Self::entries`].
    pub fn total_price(&self, catalog: &[CatalogItemSnapshot]) -> Result<Decimal> {
        match &self.backend {
            CartBackend::Local(store) => store.total_price(catalog),
            _ => Err(ClientError::Validation(
                "the server-backed cart has no local entries".to_string(),
            )),
        }
    }

    /// Handle a landed quantity-update response: publish the count unless
    /// a newer update for the same item has superseded `token`. Split from
    /// [`Self::update_quantity`] so response landings can be driven in an
    /// order the serialized `&mut self` API never produces on its own.
    async fn finish_update(&mut self, item: ItemId, token: u64) {
        if self.sequencer.is_current(item, token) {
            self.publish_count().await;
        }
    }

    /// Surface an outcome: success toast on `Ok` (when the action warrants
    /// one), taxonomy-mapped toast on `Err`. A 401 produces no toast at all;
    /// the caller shows the sign-in prompt instead.
    fn report<T>(
        &self,
        outcome: Result<T>,
        action: &str,
        success_message: Option<&str>,
    ) -> Result<T> {
        match outcome {
            Ok(value) => {
                if let Some(message) = success_message {
                    self.notifier
                        .push(NotificationKind::Success, message, CART_TOAST_DWELL);
                }
                Ok(value)
            }
            Err(error) => {
                if let Some((kind, message)) = error.toast(action) {
                    self.notifier.push(kind, message, CART_TOAST_DWELL);
                }
                Err(error)
            }
        }
    }

    /// Publish the current count, ignoring a failed read; the badge keeps
    /// its previous value rather than flashing an error.
    async fn publish_count(&mut self) {
        match self.backend.count().await {
            Ok(count) => {
                self.counter.send_replace(count);
            }
            Err(error) => {
                tracing::warn!(%error, "failed to refresh cart count");
            }
        }
    }
}

// =============================================================================
// Test backend
// =============================================================================

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;

    use crate::error::Result;

    /// Scripted backend: mutations pop the next scripted outcome, the count
    /// is whatever the test last set.
    #[derive(Debug, Default)]
    pub struct MockBackend {
        pub script: VecDeque<Result<()>>,
        pub count: u32,
    }

    impl MockBackend {
        pub fn next(&mut self) -> Result<()> {
            self.script.pop_front().unwrap_or(Ok(()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_service() -> (tempfile::TempDir, CartService, Notifier) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalCartStore::new(KeyValueStore::new(dir.path().join("storage.json")));
        let notifier = Notifier::new();
        let service = CartService::new(CartBackend::Local(store), notifier.clone());
        (dir, service, notifier)
    }

    fn mock_service(script: Vec<Result<()>>) -> (CartService, Notifier) {
        let notifier = Notifier::new();
        let backend = CartBackend::Mock(mock::MockBackend {
            script: script.into_iter().collect(),
            count: 0,
        });
        (CartService::new(backend, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_add_publishes_count_and_toasts() {
        let (_dir, mut service, notifier) = local_service();
        let counter = service.counter();

        service.add(ItemId::new(7), 2).await.expect("add");
        service.add(ItemId::new(7), 3).await.expect("add");

        assert_eq!(*counter.borrow(), 5);
        let toasts = notifier.active();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].message, "Item added to cart");
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_and_150_clamps() {
        let (_dir, mut service, _notifier) = local_service();
        service.add(ItemId::new(1), 2).await.expect("add");
        service.add(ItemId::new(2), 2).await.expect("add");

        service.update_quantity(ItemId::new(1), 0).await.expect("update");
        service.update_quantity(ItemId::new(2), 150).await.expect("update");

        let entries = service.entries().expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item_id, ItemId::new(2));
        assert_eq!(entries[0].quantity, MAX_QUANTITY);
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let (_dir, mut service, _notifier) = local_service();
        service.add(ItemId::new(1), 2).await.expect("add");
        let counter = service.counter();

        assert!(!service.clear(false).await.expect("clear"));
        assert_eq!(service.entries().expect("entries").len(), 1);
        assert_eq!(*counter.borrow(), 2);

        assert!(service.clear(true).await.expect("clear"));
        assert!(service.entries().expect("entries").is_empty());
        assert_eq!(*counter.borrow(), 0);
    }

    #[tokio::test]
    async fn test_401_on_add_leaves_state_untouched_and_shows_no_toast() {
        let (mut service, notifier) = mock_service(vec![Err(ClientError::Unauthorized)]);
        let counter = service.counter();

        let result = service.add(ItemId::new(7), 2).await;

        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert!(notifier.active().is_empty());
        assert_eq!(*counter.borrow(), 0);
    }

    #[tokio::test]
    async fn test_rejected_add_toasts_the_server_message() {
        let (mut service, notifier) =
            mock_service(vec![Err(ClientError::Rejected("out of stock".to_string()))]);

        let result = service.add(ItemId::new(7), 2).await;

        assert!(result.is_err());
        let toasts = notifier.active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert_eq!(toasts[0].message, "Error: out of stock");
    }

    #[tokio::test]
    async fn test_counter_fans_out_to_every_subscriber() {
        let (_dir, mut service, _notifier) = local_service();
        let badge_a = service.counter();
        let badge_b = service.counter();

        service.add(ItemId::new(1), 4).await.expect("add");

        assert_eq!(*badge_a.borrow(), 4);
        assert_eq!(*badge_b.borrow(), 4);
    }

    fn set_mock_count(service: &mut CartService, count: u32) {
        if let CartBackend::Mock(mock) = &mut service.backend {
            mock.count = count;
        }
    }

    // The badge shows whatever response landed last; a stale count that
    // arrives after a newer one overwrites it. This is the hazard the
    // sequencer exists to stop.
    #[tokio::test]
    async fn test_badge_shows_the_last_response_to_land() {
        let (mut service, _notifier) = mock_service(vec![]);
        let counter = service.counter();

        // The newer response (quantity set to 2) lands first...
        set_mock_count(&mut service, 2);
        service.publish_count().await;
        // ...then the older response lands late and wins the badge.
        set_mock_count(&mut service, 5);
        service.publish_count().await;

        assert_eq!(*counter.borrow(), 5);
    }

    #[tokio::test]
    async fn test_stale_update_response_is_discarded() {
        let (mut service, _notifier) = mock_service(vec![]);
        let item = ItemId::new(7);
        let counter = service.counter();

        // Two updates for the same line, both in flight at once.
        let first = service.sequencer.begin(item);
        let second = service.sequencer.begin(item);

        // The newer update's response lands first and publishes.
        set_mock_count(&mut service, 2);
        service.finish_update(item, second).await;
        // The older one lands late; its token is stale, so the badge
        // keeps the newer count.
        set_mock_count(&mut service, 5);
        service.finish_update(item, first).await;

        assert_eq!(*counter.borrow(), 2);
    }

    #[test]
    fn test_sequencer_tracks_items_independently() {
        let sequencer = RequestSequencer::default();
        let token_a = sequencer.begin(ItemId::new(1));
        sequencer.begin(ItemId::new(2));
        assert!(sequencer.is_current(ItemId::new(1), token_a));
    }
}
