//! Cart commands.
//!
//! Each command builds the backend the configuration selects, performs one
//! operation, and drains the resulting toasts into the log.

use floret_client::cart::{CartService, CartView};
use floret_client::catalog::CatalogClient;
use floret_client::http::ApiClient;
use floret_core::ItemId;
use thiserror::Error;

use super::{flush_notifications, setup};

/// Errors from cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error(transparent)]
    Config(#[from] floret_client::config::ConfigError),

    /// The user must sign in before the server-backed cart will answer.
    #[error("authorization required: sign in and retry")]
    SignInRequired,

    #[error(transparent)]
    Client(floret_client::ClientError),
}

impl From<floret_client::ClientError> for CartCommandError {
    fn from(error: floret_client::ClientError) -> Self {
        match error {
            floret_client::ClientError::Unauthorized => Self::SignInRequired,
            other => Self::Client(other),
        }
    }
}

pub async fn add(item: i64, quantity: u32) -> Result<(), CartCommandError> {
    let (config, notifier) = setup()?;
    let mut cart = CartService::from_config(&config, notifier.clone())?;

    let result = cart.add(ItemId::new(item), quantity).await;
    flush_notifications(&notifier);
    result?;

    tracing::info!("Cart now holds {} items", cart.refresh_count().await?);
    Ok(())
}

pub async fn remove(item: i64) -> Result<(), CartCommandError> {
    let (config, notifier) = setup()?;
    let mut cart = CartService::from_config(&config, notifier.clone())?;

    let result = cart.remove(ItemId::new(item)).await;
    flush_notifications(&notifier);
    result?;
    Ok(())
}

pub async fn update(item: i64, quantity: u32) -> Result<(), CartCommandError> {
    let (config, notifier) = setup()?;
    let mut cart = CartService::from_config(&config, notifier.clone())?;

    let result = cart.update_quantity(ItemId::new(item), quantity).await;
    flush_notifications(&notifier);
    result?;
    Ok(())
}

pub async fn clear(confirmed: bool) -> Result<(), CartCommandError> {
    let (config, notifier) = setup()?;
    let mut cart = CartService::from_config(&config, notifier.clone())?;

    let cleared = cart.clear(confirmed).await;
    flush_notifications(&notifier);
    if !cleared? {
        tracing::warn!("Clearing the cart is destructive; pass --yes to confirm");
    }
    Ok(())
}

pub async fn count() -> Result<(), CartCommandError> {
    let (config, notifier) = setup()?;
    let mut cart = CartService::from_config(&config, notifier.clone())?;

    let count = cart.refresh_count().await;
    flush_notifications(&notifier);
    tracing::info!("Cart holds {} items", count?);
    Ok(())
}

pub async fn show() -> Result<(), CartCommandError> {
    let (config, notifier) = setup()?;
    let cart = CartService::from_config(&config, notifier.clone())?;
    let catalog = CatalogClient::new(ApiClient::new(&config)?);

    let items = catalog.items().await?;
    match cart.view(&items)? {
        CartView::Empty => {
            tracing::info!(
                "{}. {}.",
                floret_client::cart::EMPTY_CART_MESSAGE,
                floret_client::cart::EMPTY_CART_CTA
            );
        }
        CartView::Filled(filled) => {
            for line in &filled.lines {
                tracing::info!(
                    "{} x{} @ {} = {}",
                    line.name,
                    line.quantity,
                    line.unit_price.display(),
                    line.line_total
                );
            }
            tracing::info!("Total: {}", filled.grand_total);
        }
    }
    Ok(())
}
