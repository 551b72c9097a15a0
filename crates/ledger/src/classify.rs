/// Bech32 prefix of a transaction id on the target network
pub const CHAIN_TX_PREFIX: &str = "at1";

/// Exact length of a bech32 transaction id on the target network
pub const CHAIN_TX_LEN: usize = 63;

/// Whether an identifier is a chain-native transaction id, i.e. one the
/// confirmed endpoint can resolve.
///
/// Wallets sometimes hand back a local receipt id (UUID-style) before the
/// broadcast has been indexed on-chain. Those always 404 against the
/// confirmed endpoint, so they must be recognized and handled separately.
/// Unrecognized formats default to opaque.
pub fn is_chain_tx_id(id: &str) -> bool {
    id.starts_with(CHAIN_TX_PREFIX) || id.len() == CHAIN_TX_LEN
}
