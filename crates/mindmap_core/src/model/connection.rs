//! Undirected connection model.

use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

/// Identity of a connection: the unordered pair of its endpoints.
///
/// `ConnectionKey::new(a, b) == ConnectionKey::new(b, a)` always holds, so the
/// key can be used directly for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionKey {
    low: NodeId,
    high: NodeId,
}

impl ConnectionKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns normalized endpoints (`low <= high`).
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.low == id || self.high == id
    }

    /// Returns the opposite endpoint when `id` is one of the endpoints.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.low == id {
            Some(self.high)
        } else if self.high == id {
            Some(self.low)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }
}

/// Stored connection between two distinct nodes.
///
/// `source`/`target` keep the gesture order (first click, second click) so
/// exports stay stable; identity only depends on `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub key: ConnectionKey,
    pub source: NodeId,
    pub target: NodeId,
}

impl Connection {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            key: ConnectionKey::new(source, target),
            source,
            target,
        }
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.key.contains(id)
    }
}
