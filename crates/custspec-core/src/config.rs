//! Collector configuration.
//!
//! [`CollectorConfig`] holds everything the traversal needs to know about the
//! store layout and the records it builds: the customer root key, the ecpr
//! variable marker and threshold, the credentials username, and the config
//! endpoint template. It is built once, validated, and handed to the
//! collector by value.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder substituted in [`CollectorConfig::endpoint_template`].
pub const ENDPOINT_PLACEHOLDER: &str = "{}";

/// Default config endpoint template.
pub const DEFAULT_ENDPOINT_TEMPLATE: &str = "https://envoy.envoymobile.net/config/{}/ecpr.json";

/// How non-success store responses are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsencePolicy {
    /// Every non-success status means "no data here".
    #[default]
    Lenient,
    /// Only `404 Not Found` means "no data here"; any other non-success
    /// status is a hard error.
    Strict,
}

impl AbsencePolicy {
    /// Returns `true` if a response with `status` should be skipped as absent.
    pub fn is_absent(&self, status: u16) -> bool {
        match self {
            AbsencePolicy::Lenient => true,
            AbsencePolicy::Strict => status == 404,
        }
    }
}

/// Immutable settings for one collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Key whose children name the customers.
    pub customer_root: String,
    /// Substring identifying ecpr variables.
    pub variable_marker: String,
    /// Number of ecpr variables an entry needs to count as configured.
    pub required_variables: usize,
    /// Variable holding the endpoint's basic-auth password.
    pub password_variable: String,
    /// Username paired with the extracted password.
    pub credentials_username: String,
    /// Endpoint URL with one `{}` placeholder for customer code + channel code.
    pub endpoint_template: String,
    /// Interpretation of non-success store responses.
    pub absence_policy: AbsencePolicy,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            customer_root: "customer".to_string(),
            variable_marker: "ecpr_".to_string(),
            required_variables: 6,
            password_variable: "ecpr_http_basic_auth_password".to_string(),
            credentials_username: "ecpr".to_string(),
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            absence_policy: AbsencePolicy::Lenient,
        }
    }
}

impl CollectorConfig {
    /// Sets the absence policy.
    pub fn with_absence_policy(mut self, policy: AbsencePolicy) -> Self {
        self.absence_policy = policy;
        self
    }

    /// Sets the endpoint template.
    pub fn with_endpoint_template<S: Into<String>>(mut self, template: S) -> Self {
        self.endpoint_template = template.into();
        self
    }

    /// Sets the customer root key.
    pub fn with_customer_root<S: Into<String>>(mut self, root: S) -> Self {
        self.customer_root = root.into();
        self
    }

    /// Checks that the configuration can drive a collection run.
    pub fn validate(&self) -> Result<()> {
        if self.customer_root.trim_matches('/').is_empty() {
            return Err(Error::config("customer_root must not be empty"));
        }
        if self.variable_marker.is_empty() {
            return Err(Error::config("variable_marker must not be empty"));
        }
        if self.required_variables == 0 {
            return Err(Error::config("required_variables must be at least 1"));
        }
        if self.password_variable.is_empty() {
            return Err(Error::config("password_variable must not be empty"));
        }
        if self.endpoint_template.matches(ENDPOINT_PLACEHOLDER).count() != 1 {
            return Err(Error::config(format!(
                "endpoint_template must contain exactly one '{ENDPOINT_PLACEHOLDER}' placeholder: {}",
                self.endpoint_template
            )));
        }
        Ok(())
    }

    /// Builds the config endpoint for a customer on a channel.
    ///
    /// ```
    /// use custspec_core::CollectorConfig;
    ///
    /// let config = CollectorConfig::default();
    /// assert_eq!(
    ///     config.endpoint_for("acme", 'p'),
    ///     "https://envoy.envoymobile.net/config/acmep/ecpr.json"
    /// );
    /// ```
    pub fn endpoint_for(&self, customer_code: &str, channel_code: char) -> String {
        self.endpoint_template.replacen(
            ENDPOINT_PLACEHOLDER,
            &format!("{customer_code}{channel_code}"),
            1,
        )
    }

    /// Returns `true` if `key` names an ecpr variable.
    pub fn is_variable(&self, key: &str) -> bool {
        key.contains(&self.variable_marker)
    }
}

/// A named store deployment to collect from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Name used in logs, e.g. `production`.
    pub name: String,
    /// Base URL of the store, without the `/v2/keys` suffix.
    pub url: String,
}

impl Environment {
    /// Creates an environment.
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The production store.
    pub fn production() -> Self {
        Self::new("production", "https://envpan.envoymobile.net/etcd")
    }

    /// The development store.
    pub fn development() -> Self {
        Self::new("development", "https://envdan.envoymobile.net/etcd")
    }

    /// Production then development, the order records are concatenated in.
    pub fn defaults() -> Vec<Self> {
        vec![Self::production(), Self::development()]
    }
}
