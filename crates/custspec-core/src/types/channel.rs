//! Release channels and their single-character codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A named deployment track a customer can be configured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    /// Production track.
    Stable,
    /// Demo track.
    Demo,
    /// Sandbox track.
    Sandbox,
    /// Beach track.
    Beach,
    /// Testing track.
    Testing,
    /// Development track.
    Unstable,
}

impl ReleaseChannel {
    /// Every channel, in table order.
    pub const ALL: [ReleaseChannel; 6] = [
        ReleaseChannel::Stable,
        ReleaseChannel::Demo,
        ReleaseChannel::Sandbox,
        ReleaseChannel::Beach,
        ReleaseChannel::Testing,
        ReleaseChannel::Unstable,
    ];

    /// Returns the channel name as it appears in store keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseChannel::Stable => "stable",
            ReleaseChannel::Demo => "demo",
            ReleaseChannel::Sandbox => "sandbox",
            ReleaseChannel::Beach => "beach",
            ReleaseChannel::Testing => "testing",
            ReleaseChannel::Unstable => "unstable",
        }
    }

    /// Returns the single-character code appended to the customer code in
    /// config endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use custspec_core::ReleaseChannel;
    ///
    /// assert_eq!(ReleaseChannel::Stable.code(), 'p');
    /// assert_eq!(ReleaseChannel::Unstable.code(), 'd');
    /// ```
    pub fn code(&self) -> char {
        match self {
            ReleaseChannel::Stable => 'p',
            ReleaseChannel::Demo => 'm',
            ReleaseChannel::Sandbox => 's',
            ReleaseChannel::Beach => 'b',
            ReleaseChannel::Testing => 't',
            ReleaseChannel::Unstable => 'd',
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownReleaseChannel {
                name: s.to_string(),
            })
    }
}
