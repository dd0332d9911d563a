//! Typed store key paths.

use std::fmt;

use crate::error::{Error, Result};
use crate::types::ReleaseChannel;

/// Returns the segment after the last `/` of a store key.
///
/// ```
/// use custspec_core::types::leaf;
///
/// assert_eq!(leaf("/acme/stable/ecpr_host"), "ecpr_host");
/// assert_eq!(leaf("acme"), "acme");
/// ```
pub fn leaf(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// A composite key naming one (customer, release channel) pair, e.g.
/// `/acme/stable`.
///
/// The hierarchy below the store root is fixed at two levels, so parsing
/// rejects anything that does not have exactly a customer and a channel
/// segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    customer: String,
    channel: String,
}

impl KeyPath {
    /// Parses a composite key.
    ///
    /// # Examples
    ///
    /// ```
    /// use custspec_core::KeyPath;
    ///
    /// let path = KeyPath::parse("/acme/stable").unwrap();
    /// assert_eq!(path.customer(), "acme");
    /// assert_eq!(path.channel_segment(), "stable");
    /// ```
    pub fn parse(key: &str) -> Result<Self> {
        let mut segments = key.trim_start_matches('/').split('/');
        let customer = segments.next().unwrap_or_default();
        let channel = segments.next().unwrap_or_default();

        if customer.is_empty() || channel.is_empty() {
            return Err(Error::invalid_key_path(
                key,
                "expected a customer and a channel segment",
            ));
        }
        if segments.next().is_some() {
            return Err(Error::invalid_key_path(
                key,
                "nested deeper than customer/channel",
            ));
        }

        Ok(Self {
            raw: key.to_string(),
            customer: customer.to_string(),
            channel: channel.to_string(),
        })
    }

    /// Returns the key exactly as listed by the store.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the customer segment.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Returns the raw channel segment.
    pub fn channel_segment(&self) -> &str {
        &self.channel
    }

    /// Decodes the channel segment.
    pub fn release_channel(&self) -> Result<ReleaseChannel> {
        self.channel.parse()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
