//! Scene change journal entries.

use crate::model::archetype::Archetype;
use crate::model::connection::ConnectionKey;
use crate::model::node::NodeId;
use glam::Vec3;

/// One renderer-visible mutation of the graph, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneChange {
    NodeAdded {
        id: NodeId,
        archetype: Archetype,
        position: Vec3,
        size: f32,
    },
    /// Category changed: dispose the old primitive and build a new one.
    NodeRestyled {
        id: NodeId,
        archetype: Archetype,
        size: f32,
    },
    NodeMoved {
        id: NodeId,
        position: Vec3,
    },
    NodeResized {
        id: NodeId,
        size: f32,
    },
    NodeHighlighted {
        id: NodeId,
        highlighted: bool,
    },
    NodeRemoved {
        id: NodeId,
    },
    ConnectionAdded {
        key: ConnectionKey,
    },
    ConnectionRemoved {
        key: ConnectionKey,
    },
}
