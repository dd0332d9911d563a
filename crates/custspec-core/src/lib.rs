#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! custspec core library
//!
//! Domain types, configuration, errors, and the key-value store seam shared
//! by the etcd adapter, the collector, and the CLI.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::{AbsencePolicy, CollectorConfig, Environment};
pub use error::{Error, Result};
pub use store::{KeyValueStore, Lookup, MemoryStore};
pub use types::{Credentials, CustomerSpec, KeyPath, ReleaseChannel, RemoteNode};
