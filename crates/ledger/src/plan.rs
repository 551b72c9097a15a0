use privateclaw_types::OrderSide;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the deployed order program on the target network
pub const DEFAULT_PROGRAM_ID: &str = "privateclaw_orders_v1.aleo";

/// Default fee for order placement, in microcredits
pub const DEFAULT_PLACE_FEE: u64 = 500_000;

/// Default fee for order cancellation, in microcredits
pub const DEFAULT_CANCEL_FEE: u64 = 300_000;

/// Default fee for trade settlement, in microcredits
pub const DEFAULT_SETTLE_FEE: u64 = 500_000;

/// Default fee for listing a pair, in microcredits
pub const DEFAULT_LIST_FEE: u64 = 500_000;

/// Pairs are listed with a 90-day resolution horizon
const LISTING_HORIZON_SECS: u64 = 90 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid amount: {0}, must be a positive number of microcredits")]
    InvalidAmount(u64),

    #[error("invalid id {0:?}, no digits usable as a field literal")]
    InvalidFieldId(String),
}

/// A fully specified program call, ready to hand to the wallet signer.
///
/// Inputs are positional typed literals in the program's input language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPlan {
    pub program_id: String,
    pub function_name: String,
    pub inputs: Vec<String>,
    pub fee_microcredits: u64,
    pub fee_private: bool,
}

impl TransactionPlan {
    pub fn with_fee(mut self, fee_microcredits: u64) -> Self {
        self.fee_microcredits = fee_microcredits;
        self
    }
}

/// Builders for the transitions of the deployed order program
#[derive(Debug, Clone)]
pub struct ProgramCalls {
    program_id: String,
}

impl Default for ProgramCalls {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM_ID)
    }
}

impl ProgramCalls {
    pub fn new(program_id: impl Into<String>) -> Self {
        Self {
            program_id: program_id.into(),
        }
    }

    pub fn program_id(&self) -> &str {
        &self.program_id
    }

    /// place_order transition.
    ///
    /// The pair id and side are public field inputs; the amount stays
    /// private. The program does not track limit price on-chain, so price
    /// never leaves the local order record.
    pub fn place_order(
        &self,
        pair_id: &str,
        side: OrderSide,
        amount: u64,
    ) -> Result<TransactionPlan, PlanError> {
        if amount == 0 {
            return Err(PlanError::InvalidAmount(amount));
        }
        let market = field_digits(pair_id)?;

        Ok(TransactionPlan {
            program_id: self.program_id.clone(),
            function_name: "place_order".to_string(),
            inputs: vec![
                field_literal(&market),
                field_literal(&side.outcome_id().to_string()),
                format!("{amount}u64"),
            ],
            fee_microcredits: DEFAULT_PLACE_FEE,
            fee_private: false,
        })
    }

    /// cancel_order transition for an open order record
    pub fn cancel_order(&self, order_field_id: &str) -> Result<TransactionPlan, PlanError> {
        let order = field_digits(order_field_id)?;

        Ok(TransactionPlan {
            program_id: self.program_id.clone(),
            function_name: "cancel_order".to_string(),
            inputs: vec![field_literal(&order)],
            fee_microcredits: DEFAULT_CANCEL_FEE,
            fee_private: false,
        })
    }

    /// settle_trade transition matching a buy order against a sell order
    pub fn settle_trade(
        &self,
        buy_order_id: &str,
        sell_order_id: &str,
    ) -> Result<TransactionPlan, PlanError> {
        let buy = field_digits(buy_order_id)?;
        let sell = field_digits(sell_order_id)?;

        Ok(TransactionPlan {
            program_id: self.program_id.clone(),
            function_name: "settle_trade".to_string(),
            inputs: vec![field_literal(&buy), field_literal(&sell)],
            fee_microcredits: DEFAULT_SETTLE_FEE,
            fee_private: false,
        })
    }

    /// list_pair transition registering a new trading pair on-chain.
    ///
    /// `now_unix` is the caller's clock in unix seconds; the listing horizon
    /// is added to it to form the resolution timestamp input. A pair id with
    /// no digits falls back to market id 1.
    pub fn list_pair(
        &self,
        pair_id: &str,
        num_outcomes: u8,
        now_unix: u64,
    ) -> TransactionPlan {
        let market = field_digits(pair_id).unwrap_or_else(|_| "1".to_string());
        let resolution_ts = now_unix + LISTING_HORIZON_SECS;

        TransactionPlan {
            program_id: self.program_id.clone(),
            function_name: "list_pair".to_string(),
            inputs: vec![
                field_literal(&market),
                format!("{resolution_ts}u64"),
                format!("{num_outcomes}u8"),
            ],
            fee_microcredits: DEFAULT_LIST_FEE,
            fee_private: false,
        }
    }
}

fn field_literal(digits: &str) -> String {
    format!("{digits}field")
}

/// Strip an id down to its digits so "pair-42" becomes a valid field literal
fn field_digits(id: &str) -> Result<String, PlanError> {
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(PlanError::InvalidFieldId(id.to_string()));
    }
    Ok(digits)
}
