use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response status: {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Malformed(String),
}
