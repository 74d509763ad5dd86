//! ResourceStore - cached, observable view of one remote collection.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{CollectionState, LastError, RemoteCollection, Resource, Status, UpdatePolicy};
use crate::error::{StoreError, TransportError};
use crate::notify::Notifier;

/// Generic client-side store for one entity type.
///
/// Clones share the same state, so one store built at application start can
/// be handed to every component that needs it. State lives in a `watch`
/// channel: [`snapshot`](Self::snapshot) reads it, [`subscribe`](Self::subscribe)
/// observes it. Only the four operations mutate it.
///
/// Overlapping calls are not serialized; whichever remote response resolves
/// last is the one applied last.
pub struct ResourceStore<R: Resource> {
    remote: Arc<dyn RemoteCollection<R>>,
    notifier: Arc<dyn Notifier>,
    policy: UpdatePolicy,
    state: Arc<watch::Sender<CollectionState<R>>>,
}

impl<R: Resource> Clone for ResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            remote: self.remote.clone(),
            notifier: self.notifier.clone(),
            policy: self.policy,
            state: self.state.clone(),
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    /// Create an empty, idle store.
    pub fn new(
        remote: Arc<dyn RemoteCollection<R>>,
        notifier: Arc<dyn Notifier>,
        policy: UpdatePolicy,
    ) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            remote,
            notifier,
            policy,
            state: Arc::new(state),
        }
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> CollectionState<R> {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<R>> {
        self.state.subscribe()
    }

    pub fn items(&self) -> Vec<R> {
        self.state.borrow().items.clone()
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status
    }

    pub fn last_error(&self) -> Option<LastError> {
        self.state.borrow().last_error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    /// Cached entity by id.
    pub fn get(&self, id: &str) -> Option<R> {
        self.state.borrow().get(id).cloned()
    }

    /// Cached entities matching a predicate, in store order.
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.state
            .borrow()
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Replace the cache with the remote listing.
    ///
    /// Failures never reach the caller: they land in `status`/`last_error`
    /// and are reported through the notifier.
    pub async fn fetch_all(&self) {
        self.begin();
        debug!(collection = R::COLLECTION, "fetching collection");

        match self.remote.list().await {
            Ok(items) => {
                let count = self.replace_items(items);
                debug!(collection = R::COLLECTION, count, "collection loaded");
                self.notifier
                    .notify_success(&format!("{} loaded", capitalize(R::COLLECTION)));
            }
            Err(err) => {
                self.fail(&err, format!("Failed to fetch {}", R::COLLECTION));
            }
        }
    }

    /// Create an entity and append the server's copy to the cache.
    pub async fn create(&self, payload: &R::Payload) -> Result<R, StoreError> {
        self.begin();
        debug!(collection = R::COLLECTION, "creating entity");

        let created = self
            .remote
            .create(payload)
            .await
            .map_err(|err| self.fail(&err, format!("Failed to create {}", R::NAME)))?;

        self.succeed(|items| splice(items, created.id(), created.clone()));

        info!(collection = R::COLLECTION, id = created.id(), "entity created");
        self.notifier
            .notify_success(&format!("{} created successfully!", capitalize(R::NAME)));
        Ok(created)
    }

    /// Update an entity, then splice or re-list according to the store's
    /// [`UpdatePolicy`].
    ///
    /// Under [`UpdatePolicy::Refetch`] the re-list is authoritative: an
    /// undecodable update response is tolerated, the listed entity is
    /// returned, and a failing re-list fails the update.
    pub async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, StoreError> {
        self.begin();
        debug!(collection = R::COLLECTION, id, policy = ?self.policy, "updating entity");

        let fallback = || format!("Failed to update {}", R::NAME);
        let updated = match self.policy {
            UpdatePolicy::Splice => {
                let updated = self
                    .remote
                    .update(id, payload)
                    .await
                    .map_err(|err| self.fail(&err, fallback()))?;
                self.succeed(|items| splice(items, id, updated.clone()));
                updated
            }
            UpdatePolicy::Refetch => {
                let response = match self.remote.update(id, payload).await {
                    Ok(updated) => Some(updated),
                    Err(TransportError::Decode(cause)) => {
                        debug!(collection = R::COLLECTION, id, %cause, "update response ignored");
                        None
                    }
                    Err(err) => return Err(self.fail(&err, fallback())),
                };
                let items = self
                    .remote
                    .list()
                    .await
                    .map_err(|err| self.fail(&err, fallback()))?;
                let listed = items.iter().find(|item| item.id() == id).cloned();
                self.replace_items(items);

                match listed.or(response) {
                    Some(updated) => updated,
                    None => return Err(self.fail(&TransportError::not_found(id), fallback())),
                }
            }
        };

        info!(collection = R::COLLECTION, id, "entity updated");
        self.notifier
            .notify_success(&format!("{} updated successfully!", capitalize(R::NAME)));
        Ok(updated)
    }

    /// Delete an entity and drop it from the cache.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.begin();
        debug!(collection = R::COLLECTION, id, "deleting entity");

        self.remote
            .remove(id)
            .await
            .map_err(|err| self.fail(&err, format!("Failed to delete {}", R::NAME)))?;

        self.succeed(|items| items.retain(|item| item.id() != id));

        info!(collection = R::COLLECTION, id, "entity deleted");
        self.notifier
            .notify_success(&format!("{} deleted successfully!", capitalize(R::NAME)));
        Ok(())
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.status = Status::Loading;
            state.last_error = None;
        });
    }

    fn replace_items(&self, items: Vec<R>) -> usize {
        let received = items.len();
        let mut seen = HashSet::with_capacity(received);
        let items: Vec<R> = items
            .into_iter()
            .filter(|item| seen.insert(item.id().to_string()))
            .collect();

        if items.len() != received {
            warn!(
                collection = R::COLLECTION,
                dropped = received - items.len(),
                "listing contained duplicate ids"
            );
        }

        let count = items.len();
        self.succeed(|current| *current = items);
        count
    }

    /// Apply a successful outcome to the cached items.
    fn succeed(&self, apply: impl FnOnce(&mut Vec<R>)) {
        self.state.send_modify(|state| {
            apply(&mut state.items);
            state.status = Status::Ready;
            state.last_error = None;
        });
    }

    fn fail(&self, err: &TransportError, fallback: String) -> StoreError {
        let error = StoreError::classify(err, &fallback);
        warn!(
            collection = R::COLLECTION,
            kind = ?error.kind(),
            cause = %err,
            "{}",
            error.message()
        );

        self.state.send_modify(|state| {
            state.status = Status::Failed;
            state.last_error = Some(LastError::from(&error));
        });
        self.notifier.notify_failure(error.message());
        error
    }
}

/// Put `entity` where `id` sits, or append it. Any other entry sharing the
/// entity's id is dropped.
fn splice<R: Resource>(items: &mut Vec<R>, id: &str, entity: R) {
    let entity_id = entity.id().to_string();
    match items.iter().position(|item| item.id() == id) {
        Some(pos) => {
            items[pos] = entity;
            let mut index = 0;
            items.retain(|item| {
                let keep = index == pos || item.id() != entity_id;
                index += 1;
                keep
            });
        }
        None => {
            items.retain(|item| item.id() != entity_id);
            items.push(entity);
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
