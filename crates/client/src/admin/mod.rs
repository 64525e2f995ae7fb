//! Admin panel actions.
//!
//! User role changes, deletes/restores, order status changes, and the audit
//! log. Every action reports its outcome through the shared [`Notifier`];
//! admin toasts dwell longer than cart toasts because the messages carry
//! more consequence.

mod audit;
mod export;

pub use audit::{AuditClient, AuditEntry, AuditFilter, format_json_data};
pub use export::{CsvExport, audit_csv};

use tracing::instrument;

use floret_core::{OrderId, OrderStatus, UserId, UserRole};

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::notify::{ADMIN_TOAST_DWELL, NotificationKind, Notifier};

/// Client for the admin user and order endpoints.
#[derive(Debug, Clone)]
pub struct AdminClient {
    api: ApiClient,
    notifier: Notifier,
}

impl AdminClient {
    #[must_use]
    pub const fn new(api: ApiClient, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Change a user's role.
    #[instrument(skip(self))]
    pub async fn change_role(&self, user: UserId, role: UserRole) -> Result<()> {
        let outcome = self
            .api
            .put(&format!("/api/users/{user}/role?role={role}"))
            .await;
        self.report(outcome, "updating user role", Some("User role updated"))
    }

    /// Delete a user.
    ///
    /// Deletion is destructive, so it only proceeds with `confirmed` set;
    /// otherwise it returns `false` and sends nothing.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user: UserId, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        let outcome = self.api.delete(&format!("/api/users/{user}")).await;
        self.report(outcome, "deleting user", Some("User deleted"))?;
        Ok(true)
    }

    /// Delete several users, one request per user.
    ///
    /// An empty selection is a local validation failure; nothing is sent and
    /// a warning toast tells the operator to select someone first. A failed
    /// delete stops the batch; users already deleted stay deleted.
    #[instrument(skip(self))]
    pub async fn bulk_delete(&self, users: &[UserId], confirmed: bool) -> Result<usize> {
        if users.is_empty() {
            let error = ClientError::Validation("Select users to delete".to_string());
            return self.report(Err(error), "deleting users", None);
        }
        if !confirmed {
            return Ok(0);
        }
        for user in users {
            let outcome = self.api.delete(&format!("/api/users/{user}")).await;
            self.report(outcome, "deleting users", None)?;
        }
        self.notifier.push(
            NotificationKind::Success,
            format!("Deleted {} users", users.len()),
            ADMIN_TOAST_DWELL,
        );
        Ok(users.len())
    }

    /// Restore a soft-deleted user.
    #[instrument(skip(self))]
    pub async fn restore_user(&self, user: UserId) -> Result<()> {
        let outcome = self.api.post_empty(&format!("/api/users/{user}/restore")).await;
        self.report(outcome, "restoring user", Some("User restored"))
    }

    /// Move an order to a new status.
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, order: OrderId, status: OrderStatus) -> Result<()> {
        let outcome = self
            .api
            .put(&format!("/api/orders/{order}/status?status={status}"))
            .await;
        self.report(outcome, "updating order status", Some("Order status updated"))
    }

    /// Number of orders currently pending, for the admin badge.
    #[instrument(skip(self))]
    pub async fn pending_order_count(&self) -> Result<u64> {
        self.api
            .get(&format!(
                "/api/orders/stats/count-by-status?status={}",
                OrderStatus::Pending
            ))
            .await
    }

    /// Surface an outcome the same way the cart does, with the admin dwell.
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
                        .push(NotificationKind::Success, message, ADMIN_TOAST_DWELL);
                }
                Ok(value)
            }
            Err(error) => {
                if let Some((kind, message)) = error.toast(action) {
                    self.notifier.push(kind, message, ADMIN_TOAST_DWELL);
                }
                Err(error)
            }
        }
    }
}
