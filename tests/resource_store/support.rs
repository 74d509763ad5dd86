//! Test domain: a named entity and a remote collection whose calls the test answers by hand.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dwas_store::{
    LogNotifier, Notification, RemoteCollection, Resource, ResourceStore, TransportError,
    UpdatePolicy,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedPayload {
    pub name: String,
}

impl Resource for Named {
    const NAME: &'static str = "district";
    const COLLECTION: &'static str = "districts";
    type Payload = NamedPayload;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn named(id: &str, name: &str) -> Named {
    Named {
        id: id.into(),
        name: name.into(),
    }
}

pub fn payload(name: &str) -> NamedPayload {
    NamedPayload { name: name.into() }
}

/// A remote call waiting for the test to answer it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(NamedPayload),
    Update(String, NamedPayload),
    Remove(String),
}

pub struct Pending {
    pub call: Call,
    reply: oneshot::Sender<Result<Value, TransportError>>,
}

impl Pending {
    pub fn respond<T: Serialize>(self, value: T) {
        let value = serde_json::to_value(value).expect("response must serialize");
        let _ = self.reply.send(Ok(value));
    }

    pub fn fail(self, err: TransportError) {
        let _ = self.reply.send(Err(err));
    }
}

/// Forwards every call to the test over a channel and waits for its answer.
pub struct GatedCollection {
    calls: mpsc::UnboundedSender<Pending>,
}

impl GatedCollection {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Pending>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (Self { calls }, rx)
    }

    async fn call<T: DeserializeOwned>(&self, call: Call) -> Result<T, TransportError> {
        let (reply, answer) = oneshot::channel();
        self.calls
            .send(Pending { call, reply })
            .map_err(|_| TransportError::Unreachable("test harness gone".into()))?;
        let value = answer
            .await
            .map_err(|_| TransportError::Unreachable("call dropped".into()))??;
        serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RemoteCollection<Named> for GatedCollection {
    async fn list(&self) -> Result<Vec<Named>, TransportError> {
        self.call(Call::List).await
    }

    async fn create(&self, payload: &NamedPayload) -> Result<Named, TransportError> {
        self.call(Call::Create(payload.clone())).await
    }

    async fn update(&self, id: &str, payload: &NamedPayload) -> Result<Named, TransportError> {
        self.call(Call::Update(id.to_string(), payload.clone())).await
    }

    async fn remove(&self, id: &str) -> Result<(), TransportError> {
        self.call(Call::Remove(id.to_string())).await
    }
}

pub struct Harness {
    pub store: ResourceStore<Named>,
    pub calls: mpsc::UnboundedReceiver<Pending>,
    pub notifications: Arc<Mutex<Vec<Notification>>>,
}

impl Harness {
    pub fn new(policy: UpdatePolicy) -> Self {
        let (remote, calls) = GatedCollection::new();
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let notifier = Arc::new(LogNotifier::with_buffer(notifications.clone()));
        let store = ResourceStore::new(Arc::new(remote), notifier, policy);
        Self {
            store,
            calls,
            notifications,
        }
    }

    /// Next call the store made to the remote.
    pub async fn next_call(&mut self) -> Pending {
        self.calls.recv().await.expect("store made no remote call")
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn clear_notifications(&self) {
        self.notifications.lock().unwrap().clear();
    }
}
