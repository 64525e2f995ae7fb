//! Admin commands.

use floret_client::admin::AdminClient;
use floret_client::http::ApiClient;
use floret_core::{OrderId, OrderStatus, UserId, UserRole};
use thiserror::Error;

use super::{flush_notifications, setup};

/// Errors from admin commands.
#[derive(Debug, Error)]
pub enum AdminCommandError {
    #[error(transparent)]
    Config(#[from] floret_client::config::ConfigError),

    /// Role or status argument did not parse.
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Client(#[from] floret_client::ClientError),
}

fn admin_client() -> Result<(AdminClient, floret_client::notify::Notifier), AdminCommandError> {
    let (config, notifier) = setup()?;
    let client = AdminClient::new(ApiClient::new(&config)?, notifier.clone());
    Ok((client, notifier))
}

pub async fn change_role(user: i64, role: &str) -> Result<(), AdminCommandError> {
    let role: UserRole = role
        .parse()
        .map_err(AdminCommandError::InvalidArgument)?;
    let (admin, notifier) = admin_client()?;

    let result = admin.change_role(UserId::new(user), role).await;
    flush_notifications(&notifier);
    result?;
    Ok(())
}

pub async fn delete_user(user: i64, confirmed: bool) -> Result<(), AdminCommandError> {
    let (admin, notifier) = admin_client()?;

    let deleted = admin.delete_user(UserId::new(user), confirmed).await;
    flush_notifications(&notifier);
    if !deleted? {
        tracing::warn!("Deleting a user is destructive; pass --yes to confirm");
    }
    Ok(())
}

pub async fn bulk_delete(users: &[i64], confirmed: bool) -> Result<(), AdminCommandError> {
    let ids: Vec<UserId> = users.iter().copied().map(UserId::new).collect();
    let (admin, notifier) = admin_client()?;

    let result = admin.bulk_delete(&ids, confirmed).await;
    flush_notifications(&notifier);
    if result? == 0 && !ids.is_empty() {
        tracing::warn!("Deleting users is destructive; pass --yes to confirm");
    }
    Ok(())
}

pub async fn restore_user(user: i64) -> Result<(), AdminCommandError> {
    let (admin, notifier) = admin_client()?;

    let result = admin.restore_user(UserId::new(user)).await;
    flush_notifications(&notifier);
    result?;
    Ok(())
}

pub async fn update_order_status(order: i64, status: &str) -> Result<(), AdminCommandError> {
    let status: OrderStatus = status
        .parse()
        .map_err(AdminCommandError::InvalidArgument)?;
    let (admin, notifier) = admin_client()?;

    let result = admin.update_order_status(OrderId::new(order), status).await;
    flush_notifications(&notifier);
    result?;
    Ok(())
}

pub async fn pending() -> Result<(), AdminCommandError> {
    let (admin, notifier) = admin_client()?;

    let count = admin.pending_order_count().await;
    flush_notifications(&notifier);
    tracing::info!("{} pending orders", count?);
    Ok(())
}
