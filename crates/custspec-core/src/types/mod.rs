//! Core types for customer spec discovery.

mod channel;
mod key_path;
mod node;
mod proptests;
mod spec;

pub use channel::ReleaseChannel;
pub use key_path::{KeyPath, leaf};
pub use node::{KeysResponse, RemoteNode};
pub use spec::{Credentials, CustomerSpec};
