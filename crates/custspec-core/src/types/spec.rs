//! Customer deployment records.

use serde::{Deserialize, Serialize};

use crate::types::ReleaseChannel;

/// Basic-auth credentials for the customer's config endpoint.
// Fields are declared in key order so serialized maps come out sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    password: String,
    username: String,
}

impl Credentials {
    /// Creates credentials, stripping surrounding whitespace from the password.
    pub fn new<U: Into<String>>(username: U, password: &str) -> Self {
        Self {
            password: password.trim().to_string(),
            username: username.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// One customer configured for ecpr on one release channel.
///
/// Built once per qualifying store entry and never modified afterwards.
// Fields are declared in key order so serialized maps come out sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSpec {
    config_credentials: Credentials,
    config_endpoint: String,
    customer_code: String,
    release_channel: ReleaseChannel,
    release_channel_code: char,
}

impl CustomerSpec {
    /// Creates a record; the channel code is taken from `release_channel`.
    pub fn new<C, E>(
        customer_code: C,
        release_channel: ReleaseChannel,
        config_endpoint: E,
        config_credentials: Credentials,
    ) -> Self
    where
        C: Into<String>,
        E: Into<String>,
    {
        Self {
            config_credentials,
            config_endpoint: config_endpoint.into(),
            customer_code: customer_code.into(),
            release_channel,
            release_channel_code: release_channel.code(),
        }
    }

    /// Returns the customer code.
    pub fn customer_code(&self) -> &str {
        &self.customer_code
    }

    /// Returns the release channel.
    pub fn release_channel(&self) -> ReleaseChannel {
        self.release_channel
    }

    /// Returns the release channel code.
    pub fn release_channel_code(&self) -> char {
        self.release_channel_code
    }

    /// Returns the config endpoint URL.
    pub fn config_endpoint(&self) -> &str {
        &self.config_endpoint
    }

    /// Returns the endpoint credentials.
    pub fn config_credentials(&self) -> &Credentials {
        &self.config_credentials
    }
}
