use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::{Notification, Notifier};

/// A notifier that writes to the `tracing` log, optionally capturing into a buffer.
pub struct LogNotifier {
    buffer: Option<Arc<Mutex<Vec<Notification>>>>,
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LogNotifier {
    pub fn new() -> Self {
        LogNotifier { buffer: None }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<Notification>>>) -> Self {
        LogNotifier {
            buffer: Some(buffer),
        }
    }

    fn capture(&self, notification: Notification) {
        if let Some(buffer) = &self.buffer {
            // a poisoned buffer only loses the captured copy
            if let Ok(mut buffer) = buffer.lock() {
                buffer.push(notification);
            }
        }
    }
}

impl Notifier for LogNotifier {
    fn notify_success(&self, message: &str) {
        info!(target: "dwas_store::notify", "{}", message);
        self.capture(Notification::Success(message.to_string()));
    }

    fn notify_failure(&self, message: &str) {
        warn!(target: "dwas_store::notify", "{}", message);
        self.capture(Notification::Failure(message.to_string()));
    }
}
