pub mod classify;
pub mod client;
pub mod error;
pub mod plan;
pub mod signer;

pub use classify::*;
pub use client::*;
pub use error::*;
pub use plan::*;
pub use signer::*;
