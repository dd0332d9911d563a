//! The key-value store seam.
//!
//! The collector only needs one operation from the store: fetch a key and
//! get back either the node (with one level of children for directories) or
//! the non-success status the store answered with. Transport failures are
//! reported as [`Error::Transport`](crate::Error::Transport).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RemoteNode;

/// Outcome of a single key lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The store returned the node.
    Found(RemoteNode),
    /// The store answered with a non-success HTTP status.
    Missing {
        /// HTTP status code
        status: u16,
    },
}

/// A hierarchical key-value store that lists one level per call.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Name of the environment this store serves, for logging.
    fn name(&self) -> &str;

    /// Fetches `key`. Directories come back with their direct children.
    async fn get(&self, key: &str) -> Result<Lookup>;
}

/// In-memory store keyed by normalized path.
///
/// Lookups return a stored node as-is, a configured status, or `404` for
/// unknown keys. Used to drive the collector from fixtures.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    name: String,
    nodes: HashMap<String, RemoteNode>,
    statuses: HashMap<String, u16>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            nodes: HashMap::new(),
            statuses: HashMap::new(),
        }
    }

    /// Stores `node` under its own key.
    pub fn insert(&mut self, node: RemoteNode) {
        self.nodes.insert(normalize(&node.key).to_string(), node);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_node(mut self, node: RemoteNode) -> Self {
        self.insert(node);
        self
    }

    /// Makes lookups of `key` answer with `status`.
    pub fn with_status(mut self, key: &str, status: u16) -> Self {
        self.statuses.insert(normalize(key).to_string(), status);
        self
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<Lookup> {
        let key = normalize(key);
        if let Some(status) = self.statuses.get(key) {
            return Ok(Lookup::Missing { status: *status });
        }
        Ok(match self.nodes.get(key) {
            Some(node) => Lookup::Found(node.clone()),
            None => Lookup::Missing { status: 404 },
        })
    }
}

fn normalize(key: &str) -> &str {
    key.trim_matches('/')
}
