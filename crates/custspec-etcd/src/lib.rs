#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! etcd v2 keys API adapter.
//!
//! Implements [`custspec_core::KeyValueStore`] over
//! `GET {base}/v2/keys/{key}` with HTTP basic auth:
//! - `200` bodies are decoded into [`custspec_core::RemoteNode`]
//! - other statuses come back as [`Lookup::Missing`]
//! - connection failures, timeouts, and undecodable bodies are
//!   [`Error::Transport`]

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use custspec_core::types::KeysResponse;
use custspec_core::{Environment, Error, KeyValueStore, Lookup, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Basic-auth credentials for the store.
#[derive(Clone)]
pub struct EtcdAuth {
    username: String,
    password: String,
}

impl EtcdAuth {
    /// Creates credentials.
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for EtcdAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtcdAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An etcd v2 store for one environment.
#[derive(Debug, Clone)]
pub struct EtcdStore {
    environment: Environment,
    auth: EtcdAuth,
    client: reqwest::Client,
}

impl EtcdStore {
    /// Creates a store client with the given per-request timeout.
    pub fn new(environment: Environment, auth: EtcdAuth, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::transport_with_source(&environment.url, "failed to build HTTP client", e)
            })?;
        Ok(Self::with_client(environment, auth, client))
    }

    /// Creates a store around an existing HTTP client.
    pub fn with_client(environment: Environment, auth: EtcdAuth, client: reqwest::Client) -> Self {
        Self {
            environment,
            auth,
            client,
        }
    }

    /// Returns the environment this store serves.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Builds the keys API URL for `key`.
    pub fn key_url(&self, key: &str) -> String {
        format!(
            "{}/v2/keys/{}",
            self.environment.url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl KeyValueStore for EtcdStore {
    fn name(&self) -> &str {
        &self.environment.name
    }

    async fn get(&self, key: &str) -> Result<Lookup> {
        let url = self.key_url(key);
        tracing::trace!(environment = %self.environment.name, %url, "GET");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.auth.username, Some(&self.auth.password))
            .send()
            .await
            .map_err(|e| Error::transport_with_source(key, "request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                environment = %self.environment.name,
                key,
                status = status.as_u16(),
                "store returned non-success status"
            );
            return Ok(Lookup::Missing {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport_with_source(key, "failed to read response body", e))?;
        let decoded: KeysResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::transport_with_source(key, "undecodable response body", e))?;

        Ok(Lookup::Found(decoded.node))
    }
}
