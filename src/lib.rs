//! PrivateClaw: transaction-lifecycle reconciliation for a private
//! limit-order interface on Aleo.
//!
//! The workspace splits into focused crates:
//! - [`types`]: order and pair domain model
//! - [`ledger`]: identifier classification, status client, program calls
//! - [`reconciler`]: order store seam, attempt tracking, the polling loop
//! - [`config`]: file/env configuration loading and validation
//!
//! This crate re-exports the pieces and wires them together.

pub use privateclaw_config as config;
pub use privateclaw_ledger as ledger;
pub use privateclaw_reconciler as reconciler;
pub use privateclaw_types as types;

pub use privateclaw_config::{validate_config, AppConfig, ConfigLoader, PollerSettings};
pub use privateclaw_ledger::{
    is_chain_tx_id, HttpLedgerClient, LedgerClient, ProgramCalls, TransactionPlan,
    TransactionSigner, TxVerdict,
};
pub use privateclaw_reconciler::{
    Notifier, OrderReconciler, OrderStore, ReconcilerConfig, SharedOrderStore, TickSummary,
    TracingNotifier,
};
pub use privateclaw_types::{Order, OrderSide, OrderStatus, TradingPair};

use privateclaw_config::NetworkConfig;
use privateclaw_ledger::LedgerError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Translate configured polling policy into the reconciler's config
pub fn reconciler_config(settings: &PollerSettings) -> ReconcilerConfig {
    ReconcilerConfig {
        poll_interval: Duration::from_secs(settings.poll_interval_secs),
        initial_delay: Duration::from_secs(settings.initial_delay_secs),
        max_attempts: settings.max_attempts,
        receipt_grace_attempts: settings.receipt_grace_attempts,
        optimistic_receipts: settings.optimistic_receipts,
    }
}

/// Install the global tracing subscriber using the configured log level.
///
/// `RUST_LOG` takes precedence when set. Safe to call more than once; later
/// calls are no-ops.
pub fn init_logging(network: &NetworkConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(network.log_level.clone()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Wire the HTTP ledger client and log notifier around a shared store and
/// start the reconciliation loop.
///
/// Aborting the returned handle tears the loop down.
pub fn spawn_reconciler(
    store: Arc<SharedOrderStore>,
    config: &AppConfig,
) -> Result<JoinHandle<()>, LedgerError> {
    let client = HttpLedgerClient::with_timeout(
        config.ledger.api_base_url.clone(),
        Duration::from_millis(config.ledger.request_timeout_ms),
    )?;

    let reconciler = Arc::new(OrderReconciler::new(
        store,
        Arc::new(client),
        Arc::new(TracingNotifier),
        reconciler_config(&config.reconciler),
    ));
    Ok(reconciler.start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poller_settings_translate_to_durations() {
        let settings = PollerSettings::default();
        let config = reconciler_config(&settings);

        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.initial_delay, Duration::from_secs(3));
        assert_eq!(config.max_attempts, 40);
        assert_eq!(config.receipt_grace_attempts, 20);
        assert!(config.optimistic_receipts);
    }
}
