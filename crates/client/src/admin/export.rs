//! CSV rendering for the audit log.
//!
//! Produces bytes and a suggested file name; where they end up (disk,
//! download, pipe) is the embedding surface's business.

use chrono::NaiveDate;

use super::audit::AuditEntry;

/// UTF-8 byte order mark. Spreadsheet tools mis-detect the encoding of
/// plain UTF-8 CSV without it.
const UTF8_BOM: &str = "\u{feff}";

const HEADER: &str = "ID,Date,User,Action,Table,Record ID";

/// A rendered export: the bytes and the name to save them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Render audit entries as CSV, one row per entry in input order.
#[must_use]
pub fn audit_csv(entries: &[AuditEntry], today: NaiveDate) -> CsvExport {
    let mut out = String::from(UTF8_BOM);
    out.push_str(HEADER);
    out.push('\n');

    for entry in entries {
        let row = [
            entry.id.to_string(),
            entry.changed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.changed_by.clone(),
            entry.action.label().to_string(),
            entry.table_name.clone(),
            entry.record_id.to_string(),
        ];
        let escaped: Vec<String> = row.iter().map(|field| escape_field(field)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }

    CsvExport {
        bytes: out.into_bytes(),
        file_name: format!("audit_log_{}.csv", today.format("%Y-%m-%d")),
    }
}

/// Quote a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
