//! InMemoryCollection - Vec-backed remote collection for testing and development.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{FromPayload, RemoteCollection};
use crate::error::TransportError;

/// In-memory stand-in for a REST collection.
///
/// Plays the server's role: assigns ids on create and answers unknown ids
/// with a 404. Failures can be queued with [`fail_next`](Self::fail_next).
/// Clone-friendly via Arc.
pub struct InMemoryCollection<R> {
    items: Arc<RwLock<Vec<R>>>,
    failures: Arc<Mutex<VecDeque<TransportError>>>,
    list_calls: Arc<AtomicUsize>,
}

impl<R> Clone for InMemoryCollection<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            failures: self.failures.clone(),
            list_calls: self.list_calls.clone(),
        }
    }
}

impl<R: FromPayload> Default for InMemoryCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FromPayload> InMemoryCollection<R> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Start with a server-side collection already populated.
    pub fn with_items(items: Vec<R>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make the next call fail with `err`. Queued failures are consumed in order.
    pub fn fail_next(&self, err: TransportError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back(err);
        }
    }

    /// Number of `list` calls received so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Server-side contents.
    pub fn items(&self) -> Vec<R> {
        self.items
            .read()
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    fn take_failure(&self) -> Result<(), TransportError> {
        let mut failures = self.failures.lock().map_err(|_| poisoned())?;
        match failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn poisoned() -> TransportError {
    TransportError::status(500, "in-memory collection lock poisoned")
}

#[async_trait]
impl<R: FromPayload> RemoteCollection<R> for InMemoryCollection<R> {
    async fn list(&self) -> Result<Vec<R>, TransportError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.clone())
    }

    async fn create(&self, payload: &R::Payload) -> Result<R, TransportError> {
        self.take_failure()?;
        let entity = R::from_payload(Uuid::new_v4().simple().to_string(), payload);
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, TransportError> {
        self.take_failure()?;
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let slot = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| TransportError::not_found(id))?;
        *slot = R::from_payload(id.to_string(), payload);
        Ok(slot.clone())
    }

    async fn remove(&self, id: &str) -> Result<(), TransportError> {
        self.take_failure()?;
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let pos = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| TransportError::not_found(id))?;
        items.remove(pos);
        Ok(())
    }
}
