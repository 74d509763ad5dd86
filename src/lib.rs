pub mod auth;
pub mod config;
pub mod domain;
mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod notify;
mod resource;

pub use auth::{AuthGateway, AuthSession, AuthState, Credentials, LoginResponse};
pub use crate::config::{DashboardConfig, ResourceConfig};
pub use domain::{
    Coordinates, DashboardStores, Dzongkhag, DzongkhagPayload, DzongkhagRef, Gewog,
    GewogPayload, Region, StorePolicies, User, UserPayload, UserRole,
};
pub use error::{ConfigError, ErrorKind, StoreError, TransportError};
pub use notify::{LogNotifier, Notification, Notifier};
pub use resource::{
    CollectionState, FromPayload, InMemoryCollection, LastError, RemoteCollection, Resource,
    ResourceStore, Status, UpdatePolicy,
};

#[cfg(feature = "http")]
pub use auth::RestAuthGateway;
#[cfg(feature = "http")]
pub use http::{RestClient, RestCollection};
#[cfg(feature = "emitter")]
pub use notify::EmitterNotifier;

// listener side of EmitterNotifier
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
