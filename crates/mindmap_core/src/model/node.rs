//! Node domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another node.
//! - `date_added` is set once at creation and never changes.
//! - `archetype` is always the registry resolution of `category` (or the
//!   default archetype for unknown categories).

use crate::model::archetype::Archetype;
use glam::Vec3;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for one mind-map node.
pub type NodeId = Uuid;

/// Title shown and exported for nodes whose title is empty.
pub const UNTITLED_TITLE: &str = "Untitled";

/// One typed, positioned entity in the mind map.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Key into the category registry.
    pub category: String,
    /// May be empty; see `display_title`.
    pub title: String,
    pub notes: String,
    pub position: Vec3,
    /// Unix epoch milliseconds.
    pub date_added: i64,
    /// Unix epoch milliseconds of the last notes/title edit.
    pub last_edited: Option<i64>,
    /// Transient connect-source highlight. Never persisted.
    pub is_highlighted: bool,
    /// Reserved for a future "resolved" workflow.
    pub resolved: bool,
    pub archetype: Archetype,
}

impl Node {
    /// Title used for display and export.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_TITLE
        } else {
            self.title.as_str()
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock is set before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
