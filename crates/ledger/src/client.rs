use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::LedgerError;

/// Outcome of a single status check against the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxVerdict {
    /// Valid id, not yet indexed on-chain
    Pending,
    /// Accepted on-chain
    Confirmed,
    /// Rejected or aborted on-chain
    Failed,
    /// Transport failure or ambiguous response
    Unknown,
}

/// Resolves the confirmation status of chain-native transaction ids
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Query the confirmed endpoint for one transaction id.
    ///
    /// Never fails: transport errors, non-2xx statuses other than 404, and
    /// malformed bodies all degrade to `TxVerdict::Unknown`.
    async fn transaction_status(&self, tx_id: &str) -> TxVerdict;
}

/// Body of the confirmed-transaction endpoint
#[derive(Debug, Deserialize)]
struct ConfirmedTransaction {
    /// Application-level status: "accepted" | "rejected" | "aborted"
    status: Option<String>,
}

/// Map a confirmed-endpoint response to a verdict.
///
/// 404 means the id is valid but not yet indexed. Any other non-success
/// status is ambiguous rather than fatal. A 200 with an unrecognized or
/// missing status field still counts as confirmed: presence on-chain is
/// itself the confirmation signal.
fn verdict_for(http_status: u16, tx_status: Option<&str>) -> TxVerdict {
    if http_status == 404 {
        return TxVerdict::Pending;
    }
    if !(200..300).contains(&http_status) {
        return TxVerdict::Unknown;
    }
    match tx_status {
        Some("rejected") | Some("aborted") => TxVerdict::Failed,
        _ => TxVerdict::Confirmed,
    }
}

/// HTTP client for the ledger's public REST API
pub struct HttpLedgerClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpLedgerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Client for the public testnet API
    pub fn testnet() -> Self {
        Self::new("https://api.provable.com/v2/testnet")
    }

    /// Client with a caller-configured reqwest instance (timeouts, proxies)
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Client with a per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read a public mapping value of a deployed program.
    ///
    /// 404 means the key is not present in the mapping.
    pub async fn mapping_value(
        &self,
        program_id: &str,
        mapping: &str,
        key: &str,
    ) -> Result<Option<String>, LedgerError> {
        let url = format!(
            "{}/program/{}/mapping/{}/{}",
            self.base_url, program_id, mapping, key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(LedgerError::Status(response.status().as_u16()));
        }

        let value = response
            .text()
            .await
            .map_err(|e| LedgerError::Malformed(e.to_string()))?;
        Ok(Some(value))
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn transaction_status(&self, tx_id: &str) -> TxVerdict {
        let url = format!("{}/transaction/confirmed/{}", self.base_url, tx_id);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(tx_id = %tx_id, error = %e, "transaction status request failed");
                return TxVerdict::Unknown;
            }
        };

        let http_status = response.status().as_u16();
        if http_status == 404 {
            debug!(tx_id = %tx_id, "transaction not yet confirmed");
            return TxVerdict::Pending;
        }
        if !response.status().is_success() {
            warn!(tx_id = %tx_id, status = http_status, "transaction status check error");
            return TxVerdict::Unknown;
        }

        let body: ConfirmedTransaction = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(tx_id = %tx_id, error = %e, "malformed confirmed-transaction body");
                return TxVerdict::Unknown;
            }
        };

        let verdict = verdict_for(http_status, body.status.as_deref());
        debug!(tx_id = %tx_id, ?verdict, status = ?body.status, "transaction status resolved");
        verdict
    }
}
