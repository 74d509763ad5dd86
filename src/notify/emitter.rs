use std::sync::Mutex;

use event_emitter_rs::EventEmitter;
use tracing::warn;

use super::Notifier;

/// Event name carrying success messages.
pub const SUCCESS_EVENT: &str = "notification:success";
/// Event name carrying failure messages.
pub const FAILURE_EVENT: &str = "notification:failure";

/// A notifier that emits messages via an EventEmitter for in-process listeners,
/// such as a toast layer.
///
/// Listeners run on the emitter's own threads, so delivery is asynchronous.
pub struct EmitterNotifier {
    emitter: Mutex<EventEmitter>,
}

impl Default for EmitterNotifier {
    fn default() -> Self {
        Self::new(EventEmitter::new())
    }
}

impl EmitterNotifier {
    pub fn new(emitter: EventEmitter) -> Self {
        EmitterNotifier {
            emitter: Mutex::new(emitter),
        }
    }

    /// Register a listener for success messages.
    pub fn on_success<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on(SUCCESS_EVENT, listener);
    }

    /// Register a listener for failure messages.
    pub fn on_failure<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on(FAILURE_EVENT, listener);
    }

    fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        match self.emitter.lock() {
            Ok(mut emitter) => {
                emitter.on(event, listener);
            }
            Err(_) => warn!(event, "emitter lock poisoned, listener dropped"),
        }
    }

    fn emit(&self, event: &str, message: &str) {
        match self.emitter.lock() {
            Ok(mut emitter) => {
                emitter.emit(event, message.to_string());
            }
            Err(_) => warn!(event, message, "emitter lock poisoned, notification dropped"),
        }
    }
}

impl Notifier for EmitterNotifier {
    fn notify_success(&self, message: &str) {
        self.emit(SUCCESS_EVENT, message);
    }

    fn notify_failure(&self, message: &str) {
        self.emit(FAILURE_EVENT, message);
    }
}
