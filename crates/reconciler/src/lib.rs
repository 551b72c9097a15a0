pub mod attempts;
pub mod notifier;
pub mod reconciler;
pub mod store;

pub use attempts::*;
pub use notifier::*;
pub use reconciler::*;
pub use store::*;
