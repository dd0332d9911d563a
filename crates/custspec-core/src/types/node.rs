//! Nodes returned by the key-value store.

use serde::{Deserialize, Serialize};

use crate::types::leaf;

/// One node of the store's key hierarchy.
///
/// Directories carry `dir = true` and, when listed, their children in
/// `nodes`. Leaves carry a scalar `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteNode {
    /// Full key path, e.g. `/acme/stable/ecpr_host`.
    #[serde(default)]
    pub key: String,
    /// Scalar value for leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether this node is a directory.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dir: bool,
    /// Direct children, present only on listed directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<RemoteNode>>,
}

impl RemoteNode {
    /// Creates a leaf node.
    pub fn leaf<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: Some(value.into()),
            dir: false,
            nodes: None,
        }
    }

    /// Creates a directory node with the given children.
    pub fn dir<K: Into<String>>(key: K, children: Vec<RemoteNode>) -> Self {
        Self {
            key: key.into(),
            value: None,
            dir: true,
            nodes: Some(children),
        }
    }

    /// Returns the segment after the last `/` of this node's key.
    pub fn name(&self) -> &str {
        leaf(&self.key)
    }

    /// Returns `true` if the store listed children for this node.
    pub fn has_children(&self) -> bool {
        self.nodes.is_some()
    }

    /// Returns the listed children, or an empty slice.
    pub fn children(&self) -> &[RemoteNode] {
        self.nodes.as_deref().unwrap_or_default()
    }
}

/// Body of an etcd v2 keys API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysResponse {
    /// Action performed (`get` for reads).
    #[serde(default)]
    pub action: String,
    /// The requested node.
    pub node: RemoteNode,
}
