//! Audit log commands.

use std::path::Path;

use floret_client::admin::{AuditClient, AuditFilter, format_json_data};
use floret_client::http::ApiClient;
use floret_core::{AuditAction, AuditEntryId};
use thiserror::Error;

use super::{flush_notifications, setup};

/// Errors from audit commands.
#[derive(Debug, Error)]
pub enum AuditCommandError {
    #[error(transparent)]
    Config(#[from] floret_client::config::ConfigError),

    /// Action filter argument did not parse.
    #[error("invalid action: {0} (expected CREATE|UPDATE|DELETE)")]
    InvalidAction(String),

    #[error("failed to write export: {0}")]
    Write(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] floret_client::ClientError),
}

fn audit_client() -> Result<(AuditClient, floret_client::notify::Notifier), AuditCommandError> {
    let (config, notifier) = setup()?;
    let client = AuditClient::new(ApiClient::new(&config)?, notifier.clone());
    Ok((client, notifier))
}

pub async fn show(id: i64) -> Result<(), AuditCommandError> {
    let (audit, notifier) = audit_client()?;

    let entry = audit.detail(AuditEntryId::new(id)).await;
    flush_notifications(&notifier);
    let entry = entry?;

    tracing::info!(
        "#{} {} {} record {} by {} at {}",
        entry.id,
        entry.action.label(),
        entry.table_name,
        entry.record_id,
        entry.changed_by,
        entry.changed_at.format("%Y-%m-%d %H:%M:%S"),
    );
    if let Some(old_value) = &entry.old_value {
        tracing::info!("Before:\n{}", format_json_data(old_value));
    }
    if let Some(new_value) = &entry.new_value {
        tracing::info!("After:\n{}", format_json_data(new_value));
    }
    Ok(())
}

pub fn url(
    table: Option<String>,
    action: Option<&str>,
    username: Option<String>,
) -> Result<(), AuditCommandError> {
    let action = action
        .map(|raw| {
            parse_action(raw).ok_or_else(|| AuditCommandError::InvalidAction(raw.to_string()))
        })
        .transpose()?;

    let filter = AuditFilter {
        table,
        action,
        username,
    };
    tracing::info!("/admin/audit{}", filter.to_query_string());
    Ok(())
}

pub async fn export(out: &Path) -> Result<(), AuditCommandError> {
    let (audit, notifier) = audit_client()?;

    let export = audit.export_csv(chrono::Utc::now().date_naive()).await;
    flush_notifications(&notifier);
    let export = export?;

    let path = out.join(&export.file_name);
    std::fs::write(&path, &export.bytes)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn parse_action(raw: &str) -> Option<AuditAction> {
    match raw {
        "CREATE" => Some(AuditAction::Create),
        "UPDATE" => Some(AuditAction::Update),
        "DELETE" => Some(AuditAction::Delete),
        _ => None,
    }
}
