//! Domain - the dashboard's entity types and the bundle of their stores.
//!
//! [`DashboardStores`] is built once at application start and handed to the
//! components that need it:
//!
//! ```ignore
//! let config = DashboardConfig::load(Some(Path::new("dashboard.json")))?;
//! let client = RestClient::from_config(&config)?;
//! let stores = DashboardStores::from_config(&config, &client, Arc::new(LogNotifier::new()));
//!
//! stores.gewogs.fetch_all().await;
//! ```

mod dzongkhag;
mod gewog;
mod user;

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::notify::Notifier;
use crate::resource::{InMemoryCollection, RemoteCollection, ResourceStore, UpdatePolicy};

pub use dzongkhag::{Dzongkhag, DzongkhagPayload, Region};
pub use gewog::{Coordinates, DzongkhagRef, Gewog, GewogPayload};
pub use user::{User, UserPayload, UserRole};

/// Update policy of each dashboard store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePolicies {
    pub dzongkhags: UpdatePolicy,
    pub gewogs: UpdatePolicy,
    pub users: UpdatePolicy,
}

impl Default for StorePolicies {
    /// Gewog update responses are not authoritative, so that store re-lists.
    fn default() -> Self {
        Self {
            dzongkhags: UpdatePolicy::Splice,
            gewogs: UpdatePolicy::Refetch,
            users: UpdatePolicy::Splice,
        }
    }
}

impl From<&DashboardConfig> for StorePolicies {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            dzongkhags: config.dzongkhags.update_policy,
            gewogs: config.gewogs.update_policy,
            users: config.users.update_policy,
        }
    }
}

/// The three dashboard stores, sharing one notifier.
#[derive(Clone)]
pub struct DashboardStores {
    pub dzongkhags: ResourceStore<Dzongkhag>,
    pub gewogs: ResourceStore<Gewog>,
    pub users: ResourceStore<User>,
}

impl DashboardStores {
    pub fn new(
        dzongkhags: Arc<dyn RemoteCollection<Dzongkhag>>,
        gewogs: Arc<dyn RemoteCollection<Gewog>>,
        users: Arc<dyn RemoteCollection<User>>,
        notifier: Arc<dyn Notifier>,
        policies: StorePolicies,
    ) -> Self {
        Self {
            dzongkhags: ResourceStore::new(dzongkhags, notifier.clone(), policies.dzongkhags),
            gewogs: ResourceStore::new(gewogs, notifier.clone(), policies.gewogs),
            users: ResourceStore::new(users, notifier, policies.users),
        }
    }

    /// Stores backed by empty in-memory collections, for demos and tests.
    pub fn in_memory(notifier: Arc<dyn Notifier>) -> Self {
        Self::new(
            Arc::new(InMemoryCollection::<Dzongkhag>::new()),
            Arc::new(InMemoryCollection::<Gewog>::new()),
            Arc::new(InMemoryCollection::<User>::new()),
            notifier,
            StorePolicies::default(),
        )
    }

    /// Stores backed by the REST resources named in the configuration.
    #[cfg(feature = "http")]
    pub fn from_config(
        config: &DashboardConfig,
        client: &crate::http::RestClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        use crate::http::RestCollection;

        Self::new(
            Arc::new(RestCollection::<Dzongkhag>::new(client.clone(), &config.dzongkhags.path)),
            Arc::new(RestCollection::<Gewog>::new(client.clone(), &config.gewogs.path)),
            Arc::new(RestCollection::<User>::new(client.clone(), &config.users.path)),
            notifier,
            StorePolicies::from(config),
        )
    }
}
