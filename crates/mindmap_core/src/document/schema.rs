//! Wire schema of the mind-map document.
//!
//! Field names follow the existing saved files (`nodeAIndex`, `nodeBIndex`),
//! so renaming anything here breaks compatibility.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Full persisted graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMapDocument {
    pub nodes: Vec<DocumentNode>,
    #[serde(default)]
    pub connections: Vec<DocumentConnection>,
}

/// One persisted node. Identity is its index in `MindMapDocument::nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub position: DocumentPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for DocumentPosition {
    fn from(value: Vec3) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }
}

impl From<DocumentPosition> for Vec3 {
    fn from(value: DocumentPosition) -> Self {
        Vec3::new(value.x, value.y, value.z)
    }
}

/// Index pair into `MindMapDocument::nodes`.
///
/// Signed so that negative indices in hand-edited files are dropped like any
/// other out-of-range pair instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConnection {
    pub node_a_index: i64,
    pub node_b_index: i64,
}

/// Node entry of the live preview pane (no position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewNode {
    pub category: String,
    pub title: String,
    pub notes: String,
}

/// Filtered, position-free rendering of the graph for the preview pane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewDocument {
    pub nodes: Vec<PreviewNode>,
    pub connections: Vec<DocumentConnection>,
}

/// Category filter selected in the preview dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

/// Dropdown value selecting every category.
pub const FILTER_ALL: &str = "all";

impl CategoryFilter {
    /// Maps a dropdown value (`"all"` or a category name) to a filter.
    pub fn from_selector(value: &str) -> Self {
        if value == FILTER_ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}
