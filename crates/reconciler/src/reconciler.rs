use futures::future::join_all;
use privateclaw_ledger::{is_chain_tx_id, LedgerClient, TxVerdict};
use privateclaw_types::Order;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::attempts::AttemptTracker;
use crate::notifier::Notifier;
use crate::store::{OrderStore, StoreError};

/// Polling policy for the reconciliation loop
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Cadence between polls; roughly the network block time
    pub poll_interval: Duration,

    /// Delay before the first poll, so freshly placed orders are stored
    /// before the first check runs
    pub initial_delay: Duration,

    /// Polls after which a still-unresolved order is cancelled
    pub max_attempts: u32,

    /// Polls after which an opaque wallet receipt is assumed confirmed
    pub receipt_grace_attempts: u32,

    /// Whether opaque receipts are ever optimistically confirmed
    pub optimistic_receipts: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(15), // testnet blocks are ~15 s
            initial_delay: Duration::from_secs(3),
            max_attempts: 40,           // ~10 minutes at the default cadence
            receipt_grace_attempts: 20, // ~5 minutes
            optimistic_receipts: true,
        }
    }
}

/// Terminal verdict applied to an order within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Filled,
    Cancelled,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Pending orders examined this tick
    pub checked: usize,

    /// Orders transitioned to filled
    pub filled: usize,

    /// Orders transitioned to cancelled (rejection or timeout)
    pub cancelled: usize,
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("order store error: {0}")]
    Store(#[from] StoreError),
}

/// Drives periodic re-evaluation of pending orders against the ledger and
/// commits state transitions back to the shared store.
///
/// All collaborators are injected: the store the UI shares, the ledger
/// client, and the notification sink. The loop owns nothing global.
pub struct OrderReconciler<S, L, N> {
    store: Arc<S>,
    ledger: Arc<L>,
    notifier: Arc<N>,
    config: ReconcilerConfig,
    attempts: Mutex<AttemptTracker>,
}

impl<S, L, N> OrderReconciler<S, L, N>
where
    S: OrderStore + 'static,
    L: LedgerClient + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, ledger: Arc<L>, notifier: Arc<N>, config: ReconcilerConfig) -> Self {
        Self {
            store,
            ledger,
            notifier,
            config,
            attempts: Mutex::new(AttemptTracker::new()),
        }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Run one reconciliation pass over the current order snapshot.
    ///
    /// A tick with no pending orders issues no queries and writes nothing.
    /// Per-order failures degrade to "still pending" and never abort the
    /// tick; only store errors propagate.
    pub async fn tick(&self) -> Result<TickSummary, ReconcileError> {
        let snapshot = self.store.get_orders().await?;

        let pending: Vec<&Order> = snapshot.iter().filter(|o| o.is_pending()).collect();
        if pending.is_empty() {
            return Ok(TickSummary::default());
        }

        // Counters are bumped up front under one lock, so the concurrent
        // checks below stay read-only.
        let mut work: Vec<(String, String, u32)> = Vec::with_capacity(pending.len());
        {
            let mut attempts = self.attempts.lock().await;
            for order in &pending {
                let attempt = attempts.record(&order.id);
                let tx_id = order.transaction_id.clone().unwrap_or_default();
                work.push((order.id.clone(), tx_id, attempt));
            }
        }

        let checks = work
            .iter()
            .map(|(order_id, tx_id, attempt)| self.check_order(order_id, tx_id, *attempt));
        let resolved: Vec<(String, Resolution)> =
            join_all(checks).await.into_iter().flatten().collect();

        let mut summary = TickSummary {
            checked: pending.len(),
            ..TickSummary::default()
        };
        if resolved.is_empty() {
            return Ok(summary);
        }

        let mut confirmations: Vec<(String, String)> = Vec::new();
        let updated: Vec<Order> = snapshot
            .into_iter()
            .map(|mut order| {
                match resolved.iter().find(|(id, _)| *id == order.id) {
                    Some((_, Resolution::Filled)) => {
                        order.mark_filled();
                        summary.filled += 1;
                        confirmations.push((
                            order.side.as_str().to_uppercase(),
                            order.pair_id.clone(),
                        ));
                    }
                    Some((_, Resolution::Cancelled)) => {
                        order.mark_cancelled();
                        summary.cancelled += 1;
                    }
                    None => {}
                }
                order
            })
            .collect();

        self.store.set_orders(updated).await?;

        {
            let mut attempts = self.attempts.lock().await;
            for (order_id, _) in &resolved {
                attempts.clear(order_id);
            }
        }

        // Confirmations notify; cancellations and timeouts stay silent
        for (side, pair_id) in confirmations {
            self.notifier.notify(
                "Order confirmed on-chain",
                &format!("Your {side} order on {pair_id} was confirmed by the network."),
            );
        }

        info!(
            checked = summary.checked,
            filled = summary.filled,
            cancelled = summary.cancelled,
            "reconciliation tick committed"
        );
        Ok(summary)
    }

    async fn check_order(
        &self,
        order_id: &str,
        tx_id: &str,
        attempt: u32,
    ) -> Option<(String, Resolution)> {
        if attempt > self.config.max_attempts {
            warn!(
                order_id = %order_id,
                tx_id = %tx_id,
                attempt,
                "pending transaction timed out"
            );
            return Some((order_id.to_string(), Resolution::Cancelled));
        }

        if !is_chain_tx_id(tx_id) {
            // Wallet-local receipt: the confirmed endpoint can never resolve
            // it, so after the grace window it is assumed confirmed rather
            // than left stuck forever.
            if self.config.optimistic_receipts && attempt >= self.config.receipt_grace_attempts {
                info!(
                    order_id = %order_id,
                    tx_id = %tx_id,
                    attempt,
                    "wallet receipt assumed confirmed after grace window"
                );
                return Some((order_id.to_string(), Resolution::Filled));
            }
            debug!(
                order_id = %order_id,
                tx_id = %tx_id,
                attempt,
                "wallet receipt is not a chain transaction id yet"
            );
            return None;
        }

        match self.ledger.transaction_status(tx_id).await {
            TxVerdict::Confirmed => Some((order_id.to_string(), Resolution::Filled)),
            TxVerdict::Failed => {
                warn!(order_id = %order_id, tx_id = %tx_id, "transaction rejected on-chain");
                Some((order_id.to_string(), Resolution::Cancelled))
            }
            TxVerdict::Pending => {
                debug!(order_id = %order_id, tx_id = %tx_id, attempt, "still pending");
                None
            }
            TxVerdict::Unknown => {
                debug!(order_id = %order_id, tx_id = %tx_id, attempt, "status ambiguous, will retry");
                None
            }
        }
    }

    /// Spawn the polling loop.
    ///
    /// The first tick fires after `initial_delay`; the steady cadence is
    /// anchored at spawn time so the early first tick does not shift the
    /// schedule. Aborting the returned handle cancels both the delayed first
    /// tick and the interval; an in-flight query's result is simply dropped.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let started = Instant::now();

            tokio::time::sleep(self.config.initial_delay).await;
            self.run_tick().await;

            let mut ticker = interval_at(
                started + self.config.poll_interval,
                self.config.poll_interval,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.run_tick().await;
            }
        })
    }

    async fn run_tick(&self) {
        if let Err(e) = self.tick().await {
            error!(error = %e, "reconciliation tick failed");
        }
    }
}
