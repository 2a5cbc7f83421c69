//! Per-node annotation panel state.

use crate::model::node::{Node, NodeId};

/// Screen-space annotation surface owned 1:1 by a node.
///
/// Mirrors are refreshed by the graph store whenever the node content
/// changes, so a UI can rebuild its widgets from the panel alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPanel {
    pub node: NodeId,
    pub visible: bool,
    pub title: String,
    pub notes: String,
    pub category: String,
    /// Unix epoch milliseconds; fixed at node creation.
    pub date_added: i64,
    /// `None` renders as "not yet edited".
    pub last_edited: Option<i64>,
}

impl InfoPanel {
    /// Creates a hidden panel mirroring `node`.
    pub fn for_node(node: &Node) -> Self {
        Self {
            node: node.id,
            visible: false,
            title: node.display_title().to_string(),
            notes: node.notes.clone(),
            category: node.category.clone(),
            date_added: node.date_added,
            last_edited: node.last_edited,
        }
    }

    pub(crate) fn refresh_from(&mut self, node: &Node) {
        self.title = node.display_title().to_string();
        self.notes.clone_from(&node.notes);
        self.category.clone_from(&node.category);
        self.last_edited = node.last_edited;
    }
}
