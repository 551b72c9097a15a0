use async_trait::async_trait;
use privateclaw::{
    reconciler_config, LedgerClient, Order, OrderReconciler, OrderSide, OrderStatus,
    PollerSettings, ProgramCalls, SharedOrderStore, TxVerdict,
};
use privateclaw_reconciler::{OrderStore, RecordingNotifier};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ═══════════════════════════════════════════════════════════════════════════
// MOCK IMPLEMENTATIONS FOR TESTING
// ═══════════════════════════════════════════════════════════════════════════

/// Ledger that reports every transaction as pending until flipped, then
/// confirms everything
struct FlippingLedger {
    confirmed: AtomicBool,
    queries: AtomicUsize,
}

impl FlippingLedger {
    fn new() -> Self {
        Self {
            confirmed: AtomicBool::new(false),
            queries: AtomicUsize::new(0),
        }
    }

    fn confirm_everything(&self) {
        self.confirmed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerClient for FlippingLedger {
    async fn transaction_status(&self, _tx_id: &str) -> TxVerdict {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.confirmed.load(Ordering::SeqCst) {
            TxVerdict::Confirmed
        } else {
            TxVerdict::Pending
        }
    }
}

/// Ledger with a fixed verdict per transaction id
struct TableLedger {
    verdicts: Mutex<HashMap<String, TxVerdict>>,
}

impl TableLedger {
    fn new(entries: &[(&str, TxVerdict)]) -> Self {
        Self {
            verdicts: Mutex::new(
                entries
                    .iter()
                    .map(|(id, v)| (id.to_string(), *v))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl LedgerClient for TableLedger {
    async fn transaction_status(&self, tx_id: &str) -> TxVerdict {
        self.verdicts
            .lock()
            .unwrap()
            .get(tx_id)
            .copied()
            .unwrap_or(TxVerdict::Pending)
    }
}

fn open_order(pair: &str, side: OrderSide, tx_id: &str) -> Order {
    Order::new(pair, side, 2_000_000, Decimal::ONE, "aleo1trader").with_transaction_id(tx_id)
}

// ═══════════════════════════════════════════════════════════════════════════
// END-TO-END RECONCILIATION
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn order_lifecycle_from_submission_to_confirmation() {
    let store = Arc::new(SharedOrderStore::new());
    let ledger = Arc::new(FlippingLedger::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let order = open_order("pair-1", OrderSide::Buy, "at1abcdef0123456789");
    let order_id = order.id.clone();
    store.insert(order);

    let engine = OrderReconciler::new(
        store.clone(),
        ledger.clone(),
        notifier.clone(),
        reconciler_config(&PollerSettings::default()),
    );

    // First poll: the broadcast is not yet indexed
    let summary = engine.tick().await.unwrap();
    assert_eq!(summary.checked, 1);
    assert_eq!(summary.filled, 0);
    assert_eq!(ledger.queries.load(Ordering::SeqCst), 1);

    let orders = store.get_orders().await.unwrap();
    assert_eq!(orders[0].order_status, OrderStatus::Open);
    assert!(!orders[0].is_settled);

    // The network confirms; the next poll resolves the order
    ledger.confirm_everything();
    let summary = engine.tick().await.unwrap();
    assert_eq!(summary.filled, 1);

    let orders = store.get_orders().await.unwrap();
    let resolved = orders.iter().find(|o| o.id == order_id).unwrap();
    assert_eq!(resolved.order_status, OrderStatus::Filled);
    assert!(resolved.is_settled);

    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "Order confirmed on-chain");

    // Later polls have nothing left to do
    let summary = engine.tick().await.unwrap();
    assert_eq!(summary.checked, 0);
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn mixed_batch_resolves_in_a_single_pass() {
    let store = Arc::new(SharedOrderStore::new());
    let ledger = Arc::new(TableLedger::new(&[
        ("at1winner", TxVerdict::Confirmed),
        ("at1loser", TxVerdict::Failed),
        ("at1waiting", TxVerdict::Pending),
    ]));
    let notifier = Arc::new(RecordingNotifier::new());

    store.insert(open_order("pair-1", OrderSide::Buy, "at1winner"));
    store.insert(open_order("pair-1", OrderSide::Sell, "at1loser"));
    store.insert(open_order("pair-2", OrderSide::Buy, "at1waiting"));

    let engine = OrderReconciler::new(
        store.clone(),
        ledger,
        notifier.clone(),
        reconciler_config(&PollerSettings::default()),
    );

    let summary = engine.tick().await.unwrap();

    assert_eq!(summary.checked, 3);
    assert_eq!(summary.filled, 1);
    assert_eq!(summary.cancelled, 1);

    let by_tx = |orders: &[Order], tx: &str| -> OrderStatus {
        orders
            .iter()
            .find(|o| o.transaction_id.as_deref() == Some(tx))
            .unwrap()
            .order_status
    };

    let orders = store.get_orders().await.unwrap();
    assert_eq!(by_tx(&orders, "at1winner"), OrderStatus::Filled);
    assert_eq!(by_tx(&orders, "at1loser"), OrderStatus::Cancelled);
    assert_eq!(by_tx(&orders, "at1waiting"), OrderStatus::Open);

    // One confirmation, nothing for the rejection
    assert_eq!(notifier.messages().len(), 1);
    assert!(notifier.messages()[0].1.contains("BUY"));
}

#[tokio::test]
async fn wallet_receipt_flow_submits_then_settles_optimistically() {
    // The wallet accepted the broadcast but returned a local receipt id
    // instead of a chain transaction id.
    let plan = ProgramCalls::default()
        .place_order("pair-7", OrderSide::Sell, 3_000_000)
        .unwrap();
    assert_eq!(plan.inputs, vec!["7field", "2field", "3000000u64"]);

    let store = Arc::new(SharedOrderStore::new());
    let ledger = Arc::new(FlippingLedger::new());
    let notifier = Arc::new(RecordingNotifier::new());

    store.insert(open_order(
        "pair-7",
        OrderSide::Sell,
        "0b5fa774-19a7-4b1c-a64d-5be0a83f0274",
    ));

    let settings = PollerSettings {
        receipt_grace_attempts: 3,
        ..PollerSettings::default()
    };
    let engine = OrderReconciler::new(
        store.clone(),
        ledger.clone(),
        notifier.clone(),
        reconciler_config(&settings),
    );

    engine.tick().await.unwrap();
    engine.tick().await.unwrap();
    assert_eq!(
        store.get_orders().await.unwrap()[0].order_status,
        OrderStatus::Open
    );

    // Third poll reaches the grace threshold
    engine.tick().await.unwrap();
    let orders = store.get_orders().await.unwrap();
    assert_eq!(orders[0].order_status, OrderStatus::Filled);
    assert!(orders[0].is_settled);

    // A receipt id is never queried against the ledger
    assert_eq!(ledger.queries.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.messages().len(), 1);
}
