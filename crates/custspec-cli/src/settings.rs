//! Run settings: defaults, optional TOML file, command-line overrides.
//!
//! ```toml
//! output = "customers.yaml"
//! request_timeout_secs = 30
//! auth_username = "envoy"
//!
//! [[environments]]
//! name = "production"
//! url = "https://envpan.envoymobile.net/etcd"
//!
//! [collector]
//! absence_policy = "strict"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use custspec_collector::serializer::DEFAULT_OUTPUT;
use custspec_core::{AbsencePolicy, CollectorConfig, Environment, Error, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

/// Everything a run needs apart from the store password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Artifact path.
    pub output: PathBuf,
    /// Per-request timeout against the store.
    pub request_timeout_secs: u64,
    /// Store basic-auth username.
    pub auth_username: String,
    /// Environments to collect, in order.
    pub environments: Vec<Environment>,
    /// Traversal and record settings.
    pub collector: CollectorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            request_timeout_secs: 30,
            auth_username: "envoy".to_string(),
            environments: Environment::defaults(),
            collector: CollectorConfig::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Applies command-line overrides.
    pub fn with_args(mut self, args: &Args) -> Result<Self> {
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        if args.strict {
            self.collector.absence_policy = AbsencePolicy::Strict;
        }
        if !args.environments.is_empty() {
            self.environments = args
                .environments
                .iter()
                .map(|name| self.environment(name).cloned())
                .collect::<Result<Vec<_>>>()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Looks an environment up by name.
    pub fn environment(&self, name: &str) -> Result<&Environment> {
        self.environments
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| {
                let known: Vec<&str> = self.environments.iter().map(|e| e.name.as_str()).collect();
                Error::config(format!(
                    "Unknown environment '{name}'. Known: {}",
                    known.join(", ")
                ))
            })
    }

    /// Returns the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.environments.is_empty() {
            return Err(Error::config("At least one environment is required"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be positive"));
        }
        self.collector.validate()
    }
}
