use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side of a limit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }

    /// Numeric outcome id used by the on-chain program (1 = buy, 2 = sell)
    pub fn outcome_id(&self) -> u8 {
        match self {
            OrderSide::Buy => 1,
            OrderSide::Sell => 2,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a locally tracked order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Partial,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states never transition again through the reconciler
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// A locally tracked limit order.
///
/// Order size is private on-chain; the amount here is the local record of
/// what was submitted, in microcredits. `transaction_id` is whatever
/// identifier the wallet handed back at submission time; it is not
/// guaranteed to be a chain-native transaction id until the broadcast has
/// been indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Opaque local identifier, unique and immutable
    pub id: String,

    /// Trading pair this order belongs to
    pub pair_id: String,

    pub side: OrderSide,

    /// Order size in microcredits
    pub amount: u64,

    /// Limit price quoted in the pair's quote asset
    pub price: Decimal,

    /// Portion of `amount` already filled, in microcredits
    pub filled_amount: u64,

    /// Address of the order owner
    pub owner_address: String,

    pub created_at: DateTime<Utc>,

    pub order_status: OrderStatus,

    /// Set exactly when the order reaches `Filled`
    pub is_settled: bool,

    /// Identifier returned by the wallet at submission; absent until the
    /// order has been submitted
    pub transaction_id: Option<String>,
}

impl Order {
    pub fn new(
        pair_id: impl Into<String>,
        side: OrderSide,
        amount: u64,
        price: Decimal,
        owner_address: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pair_id: pair_id.into(),
            side,
            amount,
            price,
            filled_amount: 0,
            owner_address: owner_address.into(),
            created_at: Utc::now(),
            order_status: OrderStatus::Open,
            is_settled: false,
            transaction_id: None,
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Whether the order is awaiting a settlement verdict: it carries a
    /// submission identifier and has not reached a terminal state.
    pub fn is_pending(&self) -> bool {
        let has_tx = self
            .transaction_id
            .as_deref()
            .is_some_and(|t| !t.is_empty());
        has_tx && matches!(self.order_status, OrderStatus::Open | OrderStatus::Partial)
    }

    /// Transition to `Filled` and mark as settled
    pub fn mark_filled(&mut self) {
        self.order_status = OrderStatus::Filled;
        self.is_settled = true;
    }

    /// Transition to `Cancelled`
    pub fn mark_cancelled(&mut self) {
        self.order_status = OrderStatus::Cancelled;
    }

    /// How long the order has been waiting, for display alongside pending
    /// state
    pub fn pending_duration(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn test_order() -> Order {
        Order::new(
            "pair-1",
            OrderSide::Buy,
            1_000_000,
            Decimal::from_str("0.52").unwrap(),
            "aleo1owner",
        )
    }

    #[test]
    fn new_order_is_open_and_unsettled() {
        let order = test_order();
        assert_eq!(order.order_status, OrderStatus::Open);
        assert!(!order.is_settled);
        assert_eq!(order.filled_amount, 0);
        assert!(order.transaction_id.is_none());
    }

    #[test]
    fn pending_requires_transaction_id() {
        let order = test_order();
        assert!(!order.is_pending());

        let submitted = order.with_transaction_id("at1abcdef");
        assert!(submitted.is_pending());
    }

    #[test]
    fn empty_transaction_id_is_not_pending() {
        let order = test_order().with_transaction_id("");
        assert!(!order.is_pending());
    }

    #[test]
    fn terminal_orders_are_not_pending() {
        let mut order = test_order().with_transaction_id("at1abcdef");
        order.mark_filled();
        assert!(!order.is_pending());
        assert!(order.is_settled);
        assert_eq!(order.order_status, OrderStatus::Filled);

        let mut cancelled = test_order().with_transaction_id("at1abcdef");
        cancelled.mark_cancelled();
        assert!(!cancelled.is_pending());
        assert!(!cancelled.is_settled);
    }

    #[test]
    fn partial_orders_are_pending() {
        let mut order = test_order().with_transaction_id("at1abcdef");
        order.order_status = OrderStatus::Partial;
        assert!(order.is_pending());
    }

    #[test]
    fn side_outcome_ids() {
        assert_eq!(OrderSide::Buy.outcome_id(), 1);
        assert_eq!(OrderSide::Sell.outcome_id(), 2);
    }

    #[test]
    fn pending_duration_measures_from_creation() {
        let order = test_order();
        let later = order.created_at + Duration::seconds(45);
        assert_eq!(order.pending_duration(later), Duration::seconds(45));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"sell\"");
    }
}
