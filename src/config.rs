//! Dashboard configuration: backend location, timeouts and per-resource settings.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! config file (format picked by extension), and `DWAS__`-prefixed
//! environment variables using `__` as the nesting separator
//! (`DWAS__GEWOGS__UPDATE_POLICY=splice`).

use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::resource::UpdatePolicy;

pub const ENV_PREFIX: &str = "DWAS";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings of one REST-backed resource.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Path of the collection below the base url.
    pub path: String,
    #[serde(default)]
    pub update_policy: UpdatePolicy,
}

impl ResourceConfig {
    pub fn new(path: impl Into<String>, update_policy: UpdatePolicy) -> Self {
        Self {
            path: path.into(),
            update_policy,
        }
    }
}

/// The dashboard configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub dzongkhags: ResourceConfig,
    pub gewogs: ResourceConfig,
    pub users: ResourceConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            dzongkhags: ResourceConfig::new("dzongkhags", UpdatePolicy::Splice),
            gewogs: ResourceConfig::new("gewogs", UpdatePolicy::Refetch),
            users: ResourceConfig::new("users", UpdatePolicy::Splice),
        }
    }
}

impl DashboardConfig {
    /// Load the configuration from defaults, `file` (when given) and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        // defaults as a source, so partial tables from files or env still merge
        let defaults = Config::try_from(&DashboardConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);
        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let cfg: DashboardConfig = builder.build()?.try_deserialize()?;
        cfg.validate()?;

        debug!("configuration: {:#?}", cfg);
        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        for (name, resource) in [
            ("dzongkhags", &self.dzongkhags),
            ("gewogs", &self.gewogs),
            ("users", &self.users),
        ] {
            if resource.path.trim_matches('/').is_empty() {
                return Err(ConfigError::Invalid(format!("{} path is empty", name)));
            }
        }
        Ok(())
    }
}
