//! Error types for customer spec discovery.

use std::path::PathBuf;

/// Errors that can occur while collecting or persisting customer specs.
///
/// Absence of data (a non-success lookup under the lenient policy, a leaf
/// node, an incompletely configured entry) is never an error; those cases
/// are skipped by the collector.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The store could not be reached or its response could not be read.
    #[error("Transport error for '{key}': {message}")]
    Transport {
        /// Key being fetched when the failure happened
        key: String,
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store answered with a non-success status that is not treated as absence.
    #[error("Store returned HTTP {status} for '{key}'")]
    Store {
        /// Key that was requested
        key: String,
        /// HTTP status code
        status: u16,
    },

    /// A release channel name outside the known set.
    #[error("Unknown release channel: {name}")]
    UnknownReleaseChannel {
        /// The name found in the key path
        name: String,
    },

    /// A composite key that does not have the customer/channel shape.
    #[error("Invalid key path '{key}': {reason}")]
    InvalidKeyPath {
        /// The offending key
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// A configured entry is missing a variable needed to build the record.
    #[error("Entry '{key}' is missing variable '{variable}'")]
    MissingVariable {
        /// Composite key of the entry
        key: String,
        /// Name of the missing variable
        variable: String,
    },

    /// No environment produced any record.
    #[error("Customer spec data is empty across {environments} environment(s)")]
    EmptyResult {
        /// Number of environments that were collected
        environments: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to atomically replace the artifact.
    #[error("Failed to persist {}: {source}", path.display())]
    Persist {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// YAML encoding error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience `Result` type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error came from talking to the store rather than
    /// from the data it returned.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Store { .. })
    }

    /// Creates a new transport error with a message.
    pub fn transport<K, M>(key: K, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Error::Transport {
            key: key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a message and source error.
    pub fn transport_with_source<K, M, E>(key: K, message: M, source: E) -> Self
    where
        K: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport {
            key: key.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new invalid key path error.
    pub fn invalid_key_path<K, R>(key: K, reason: R) -> Self
    where
        K: Into<String>,
        R: Into<String>,
    {
        Error::InvalidKeyPath {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
