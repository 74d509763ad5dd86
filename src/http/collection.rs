use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;

use super::RestClient;
use crate::error::TransportError;
use crate::resource::{RemoteCollection, Resource};

/// [`RemoteCollection`] bound to one REST resource path.
///
/// `GET {path}`, `POST {path}`, `PUT {path}/{id}`, `DELETE {path}/{id}`.
pub struct RestCollection<R> {
    client: RestClient,
    path: String,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> RestCollection<R> {
    pub fn new(client: RestClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Collection at the resource's default path (`R::COLLECTION`).
    pub fn at_default_path(client: RestClient) -> Self {
        Self::new(client, R::COLLECTION)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<R: Resource> RemoteCollection<R> for RestCollection<R> {
    async fn list(&self) -> Result<Vec<R>, TransportError> {
        let url = self.client.endpoint(&self.path, None);
        self.client
            .send_json(self.client.request(Method::GET, url))
            .await
    }

    async fn create(&self, payload: &R::Payload) -> Result<R, TransportError> {
        let url = self.client.endpoint(&self.path, None);
        self.client
            .send_json(self.client.request(Method::POST, url).json(payload))
            .await
    }

    async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, TransportError> {
        let url = self.client.endpoint(&self.path, Some(id));
        self.client
            .send_json(self.client.request(Method::PUT, url).json(payload))
            .await
    }

    async fn remove(&self, id: &str) -> Result<(), TransportError> {
        let url = self.client.endpoint(&self.path, Some(id));
        self.client
            .send_empty(self.client.request(Method::DELETE, url))
            .await
    }
}
