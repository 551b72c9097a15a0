use rand::Rng;
use serde::{Deserialize, Serialize};

/// A pair listed on the trading interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPair {
    /// Local pair identifier; its digits double as the on-chain market id
    pub id: String,

    /// Base asset symbol (e.g., "ALEO")
    pub base_asset: String,

    /// Quote asset symbol (e.g., "USDC")
    pub quote_asset: String,

    /// Identifier returned by the wallet when the pair was listed on-chain
    pub transaction_id: Option<String>,
}

impl TradingPair {
    pub fn new(
        id: impl Into<String>,
        base_asset: impl Into<String>,
        quote_asset: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            base_asset: base_asset.into(),
            quote_asset: quote_asset.into(),
            transaction_id: None,
        }
    }

    /// Display symbol, e.g. "ALEO/USDC"
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base_asset, self.quote_asset)
    }
}

/// Generate a numeric pair id usable directly as an on-chain field literal
pub fn generate_pair_id() -> String {
    rand::thread_rng().gen_range(0..1_000_000_000u64).to_string()
}
