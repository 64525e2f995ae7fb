//! Command implementations.

pub mod admin;
pub mod audit;
pub mod cart;
pub mod theme;

use floret_client::config::ClientConfig;
use floret_client::notify::Notifier;

/// Load configuration and a fresh notifier for one command invocation.
pub(crate) fn setup() -> Result<(ClientConfig, Notifier), floret_client::config::ConfigError> {
    Ok((ClientConfig::from_env()?, Notifier::new()))
}

/// Log every toast the command produced. The CLI has no toast surface, so
/// the queue drains into the log instead.
pub(crate) fn flush_notifications(notifier: &Notifier) {
    for toast in notifier.active() {
        tracing::info!(kind = toast.kind.css_class(), "{}", toast.message);
        notifier.dismiss(toast.id);
    }
}
