//! Core configuration structures for the PrivateClaw order interface

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Network configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Ledger API configuration
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Reconciliation polling policy
    #[serde(default)]
    pub reconciler: PollerSettings,
}

/// Network environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Environment type (mainnet, testnet, local)
    #[serde(default)]
    pub environment: Environment,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: default_log_level(),
        }
    }
}

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Mainnet,
    #[default]
    Testnet,
    Local,
}

/// Ledger REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Base URL of the ledger REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Identifier of the deployed order program
    #[serde(default = "default_program_id")]
    pub program_id: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            program_id: default_program_id(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Reconciliation polling policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerSettings {
    /// Seconds between polls; roughly the network block time
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds before the first poll fires
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,

    /// Polls after which an unresolved order is cancelled
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Polls after which an opaque wallet receipt is assumed confirmed
    #[serde(default = "default_receipt_grace_attempts")]
    pub receipt_grace_attempts: u32,

    /// Whether opaque receipts are ever optimistically confirmed
    #[serde(default = "default_true")]
    pub optimistic_receipts: bool,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            initial_delay_secs: default_initial_delay_secs(),
            max_attempts: default_max_attempts(),
            receipt_grace_attempts: default_receipt_grace_attempts(),
            optimistic_receipts: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_base_url() -> String {
    "https://api.provable.com/v2/testnet".to_string()
}

fn default_program_id() -> String {
    "privateclaw_orders_v1.aleo".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_secs() -> u64 {
    15
}

fn default_initial_delay_secs() -> u64 {
    3
}

fn default_max_attempts() -> u32 {
    40
}

fn default_receipt_grace_attempts() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_testnet_policy() {
        let config = AppConfig::default();

        assert_eq!(config.network.environment, Environment::Testnet);
        assert_eq!(config.network.log_level, "info");
        assert_eq!(config.reconciler.poll_interval_secs, 15);
        assert_eq!(config.reconciler.initial_delay_secs, 3);
        assert_eq!(config.reconciler.max_attempts, 40);
        assert_eq!(config.reconciler.receipt_grace_attempts, 20);
        assert!(config.reconciler.optimistic_receipts);
    }

    #[test]
    fn environment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Environment::Mainnet).unwrap(),
            "\"mainnet\""
        );
    }
}
