//! RemoteCollection - the backend collaborator behind a resource store.

use async_trait::async_trait;

use super::Resource;
use crate::error::TransportError;

/// Remote CRUD endpoint for one entity type.
///
/// Implementations own identity assignment and report unknown ids as a
/// 404 [`TransportError::Status`]. Timeouts, if any, are theirs to enforce.
#[async_trait]
pub trait RemoteCollection<R: Resource>: Send + Sync {
    /// List the whole collection, in server order.
    async fn list(&self) -> Result<Vec<R>, TransportError>;

    /// Create an entity; the returned value carries the assigned id.
    async fn create(&self, payload: &R::Payload) -> Result<R, TransportError>;

    /// Update the entity with the given id.
    async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, TransportError>;

    /// Delete the entity with the given id.
    async fn remove(&self, id: &str) -> Result<(), TransportError>;
}
