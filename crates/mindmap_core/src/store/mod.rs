//! Authoritative in-memory graph storage.
//!
//! # Responsibility
//! - Own nodes, connections and info panels, plus their derived indices.
//! - Journal every visible change for the external renderer.
//!
//! # Invariants
//! - No duplicate or self connections; no connection outlives an endpoint.
//! - No node is ever positioned outside the room interior margin.
//! - Every node has exactly one info panel, removed together with the node.

use crate::model::node::NodeId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod changes;
pub mod graph_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Graph store error for operations addressing a specific node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NodeNotFound(NodeId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
        }
    }
}

impl Error for StoreError {}
