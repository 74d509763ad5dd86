//! Notifications - user-facing success/failure messages emitted by the stores.

#[cfg(feature = "emitter")]
mod emitter;
mod log;

/// Receives one message per terminal outcome of a store operation.
///
/// Fire-and-forget: implementations must not fail the operation that
/// triggered them.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_failure(&self, message: &str);
}

/// A captured notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Notification {
    Success(String),
    Failure(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(message) | Notification::Failure(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failure(_))
    }
}

#[cfg(feature = "emitter")]
pub use emitter::{EmitterNotifier, FAILURE_EVENT, SUCCESS_EVENT};
pub use log::LogNotifier;
