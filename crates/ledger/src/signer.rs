use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;

use crate::TransactionPlan;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("wallet rejected the transaction: {0}")]
    Rejected(String),

    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

/// Wallet-side signing and broadcast capability.
///
/// The returned identifier is whatever the wallet hands back first, often a
/// wallet-local receipt rather than a chain transaction id. Callers must
/// classify it before querying the ledger (see `is_chain_tx_id`).
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn submit(&self, plan: &TransactionPlan) -> Result<String, SignerError>;
}

/// Mock signer for testing, returns scripted identifiers in order
#[derive(Debug, Default)]
pub struct MockSigner {
    ids: Mutex<VecDeque<String>>,
}

impl MockSigner {
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            ids: Mutex::new(ids.into()),
        }
    }
}

#[async_trait]
impl TransactionSigner for MockSigner {
    async fn submit(&self, _plan: &TransactionPlan) -> Result<String, SignerError> {
        self.ids
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SignerError::Unavailable("no scripted identifiers left".to_string()))
    }
}
