//! Audit log client.
//!
//! The audit log records every admin mutation (table, record, actor, time,
//! before/after values as JSON strings). This client fetches single entries
//! for the detail view, builds the filtered list URL, and pulls a bounded
//! batch for CSV export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use floret_core::{AuditAction, AuditEntryId};

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::notify::{ADMIN_TOAST_DWELL, Notifier};

use super::export::{CsvExport, audit_csv};

/// How many entries one export pulls at most.
const EXPORT_BATCH_SIZE: u32 = 1000;

/// One audit log entry as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub table_name: String,
    pub record_id: i64,
    pub action: AuditAction,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    /// JSON snapshot before the change; absent for creates.
    pub old_value: Option<String>,
    /// JSON snapshot after the change; absent for deletes.
    pub new_value: Option<String>,
}

/// Filter parameters for the audit list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub table: Option<String>,
    pub action: Option<AuditAction>,
    pub username: Option<String>,
}

impl AuditFilter {
    /// Serialize to a query string, `?`-prefixed when non-empty. Blank
    /// values are treated as unset so a cleared form field drops its
    /// parameter instead of filtering on the empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Some(table) = self.table.as_deref().filter(|t| !t.trim().is_empty()) {
            params.push(format!("table={}", urlencoding::encode(table)));
        }
        if let Some(action) = self.action {
            params.push(format!("action={action}"));
        }
        if let Some(username) = self.username.as_deref().filter(|u| !u.trim().is_empty()) {
            params.push(format!("username={}", urlencoding::encode(username)));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Client for the audit log endpoints.
#[derive(Debug, Clone)]
pub struct AuditClient {
    api: ApiClient,
    notifier: Notifier,
}

impl AuditClient {
    #[must_use]
    pub const fn new(api: ApiClient, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Fetch one entry for the detail view.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: AuditEntryId) -> Result<AuditEntry> {
        self.api.get(&format!("/api/audit/{id}")).await
    }

    /// Fetch the newest entries, up to the export batch size.
    #[instrument(skip(self))]
    pub async fn recent(&self) -> Result<Vec<AuditEntry>> {
        self.api
            .get(&format!("/api/audit?size={EXPORT_BATCH_SIZE}"))
            .await
    }

    /// Fetch the newest entries and render them as a CSV export.
    ///
    /// An empty log is a local validation failure surfaced as a warning
    /// toast; there is nothing worth downloading.
    #[instrument(skip(self))]
    pub async fn export_csv(&self, today: chrono::NaiveDate) -> Result<CsvExport> {
        let outcome = self.fetch_csv(today).await;
        if let Err(error) = &outcome
            && let Some((kind, message)) = error.toast("exporting audit log")
        {
            self.notifier.push(kind, message, ADMIN_TOAST_DWELL);
        }
        outcome
    }

    async fn fetch_csv(&self, today: chrono::NaiveDate) -> Result<CsvExport> {
        let entries = self.recent().await?;
        if entries.is_empty() {
            return Err(ClientError::Validation(
                "No audit entries to export".to_string(),
            ));
        }
        Ok(audit_csv(&entries, today))
    }
}

/// Pretty-print a stored JSON snapshot for the detail view.
///
/// Snapshots are stored as opaque strings and occasionally hold plain text;
/// anything that doesn't parse as JSON is shown verbatim.
#[must_use]
pub fn format_json_data(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_serializes_to_nothing() {
        assert_eq!(AuditFilter::default().to_query_string(), "");
    }

    #[test]
    fn test_blank_fields_are_dropped() {
        let filter = AuditFilter {
            table: Some("   ".to_string()),
            action: None,
            username: Some(String::new()),
        };
        assert_eq!(filter.to_query_string(), "");
    }

    #[test]
    fn test_full_filter_query_string() {
        let filter = AuditFilter {
            table: Some("orders".to_string()),
            action: Some(AuditAction::Update),
            username: Some("anna k".to_string()),
        };
        assert_eq!(
            filter.to_query_string(),
            "?table=orders&action=UPDATE&username=anna%20k"
        );
    }

    #[test]
    fn test_format_json_data_pretty_prints() {
        let formatted = format_json_data(r#"{"status":"PENDING"}"#);
        assert!(formatted.contains("\n"));
        assert!(formatted.contains("\"status\": \"PENDING\""));
    }

    #[test]
    fn test_format_json_data_passes_through_non_json() {
        assert_eq!(format_json_data("not json"), "not json");
    }

    #[test]
    fn test_audit_entry_deserializes_camel_case() {
        let entry: AuditEntry = serde_json::from_str(
            r#"{
                "id": 41,
                "tableName": "orders",
                "recordId": 7,
                "action": "DELETE",
                "changedBy": "admin",
                "changedAt": "2024-05-01T10:30:00Z",
                "oldValue": "{\"status\":\"PENDING\"}",
                "newValue": null
            }"#,
        )
        .expect("deserializes");
        assert_eq!(entry.action, AuditAction::Delete);
        assert_eq!(entry.table_name, "orders");
        assert!(entry.new_value.is_none());
    }
}
