//! Resources - client-side cached collections synchronized with a remote endpoint.
//!
//! A [`ResourceStore`] owns the in-memory view of one entity type and keeps it
//! in sync with a [`RemoteCollection`] through four operations: `fetch_all`,
//! `create`, `update` and `remove`. Each terminal outcome is reported to an
//! injected [`Notifier`](crate::Notifier).
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dwas_store::{InMemoryCollection, LogNotifier, ResourceStore, UpdatePolicy};
//!
//! let store = ResourceStore::new(
//!     Arc::new(InMemoryCollection::<Dzongkhag>::new()),
//!     Arc::new(LogNotifier::new()),
//!     UpdatePolicy::Splice,
//! );
//!
//! store.fetch_all().await;
//! let created = store.create(&payload).await?;
//! assert!(store.snapshot().contains(created.id()));
//! ```

mod in_memory;
mod remote;
mod store;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{ErrorKind, StoreError};

/// Trait for entity types managed by a [`ResourceStore`].
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Singular, lowercase label used in user-facing messages (e.g. "dzongkhag").
    const NAME: &'static str;

    /// Plural label, also the default REST path segment (e.g. "dzongkhags").
    const COLLECTION: &'static str;

    /// Fields sent on create and update: the entity minus server-assigned
    /// id and timestamps.
    type Payload: Serialize + Send + Sync;

    /// The server-assigned identity.
    fn id(&self) -> &str;
}

/// Builds an entity from a payload and an assigned id.
///
/// Only needed by collaborators that play the server's role, such as
/// [`InMemoryCollection`].
pub trait FromPayload: Resource {
    fn from_payload(id: String, payload: &Self::Payload) -> Self;
}

/// Lifecycle status of a [`CollectionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Constructed, nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// The classified error kept in a failed [`CollectionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&StoreError> for LastError {
    fn from(err: &StoreError) -> Self {
        LastError {
            kind: err.kind(),
            message: err.message().to_string(),
        }
    }
}

/// Snapshot of a store: the cached items plus loading/error flags.
///
/// `items` keeps server response order and never holds two entries with the
/// same id. `last_error` is `Some` only while `status` is [`Status::Failed`].
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub status: Status,
    pub last_error: Option<LastError>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: Status::Idle,
            last_error: None,
        }
    }
}

impl<T: Resource> CollectionState<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

/// What a store does after a successful remote update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Replace the entity in place with the update response.
    #[default]
    Splice,
    /// Re-list the whole collection. The update response may be partial or
    /// undecodable; the listed entity wins.
    Refetch,
}

pub use in_memory::InMemoryCollection;
pub use remote::RemoteCollection;
pub use store::ResourceStore;
