use std::sync::Mutex;
use tracing::info;

/// Side-effect sink for user-visible confirmations.
///
/// Fire-and-forget: the reconciler never consumes a return value and never
/// retries a notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, description: &str);
}

/// Notifier that forwards to the structured log
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, title: &str, description: &str) {
        info!(title = %title, description = %description, "notification");
    }
}

/// Records notifications for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, description: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((title.to_string(), description.to_string()));
    }
}
