//! Graph store implementation.
//!
//! # Responsibility
//! - Create, update, move and delete nodes with category-derived appearance.
//! - Maintain the unordered-pair connection index and per-node adjacency.
//! - Own the `NodeId -> InfoPanel` side table.
//!
//! # Invariants
//! - `nodes` and `connections` keep insertion order; exports depend on it.
//! - `pair_index` and `adjacency` always describe exactly `connections`.
//! - Every stored position satisfies `room.contains(position)`.

use crate::config::{MindMapConfig, PlacementConfig, SizingConfig};
use crate::model::archetype::Archetype;
use crate::model::connection::{Connection, ConnectionKey};
use crate::model::geometry::RoomBounds;
use crate::model::info_panel::InfoPanel;
use crate::model::node::{now_epoch_ms, Node, NodeId};
use crate::registry::category_registry::CategoryRegistry;
use crate::store::changes::SceneChange;
use crate::store::{StoreError, StoreResult};
use crate::view::CameraPose;
use glam::Vec3;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Where a new node should appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Explicit world position (document load, scripted creation).
    At(Vec3),
    /// In front of the camera with a small random jitter.
    CameraRelative(CameraPose),
}

/// Node creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    pub category: String,
    pub placement: Placement,
    pub notes: String,
    pub title: String,
}

impl NewNode {
    pub fn new(category: impl Into<String>, placement: Placement) -> Self {
        Self {
            category: category.into(),
            placement,
            notes: String::new(),
            title: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Partial node update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeUpdate {
    pub category: Option<String>,
    pub notes: Option<String>,
    pub title: Option<String>,
}

impl NodeUpdate {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Authoritative node/connection/panel storage.
#[derive(Debug)]
pub struct GraphStore {
    registry: CategoryRegistry,
    room: RoomBounds,
    placement: PlacementConfig,
    sizing: SizingConfig,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    pair_index: HashSet<ConnectionKey>,
    adjacency: HashMap<NodeId, Vec<ConnectionKey>>,
    panels: HashMap<NodeId, InfoPanel>,
    changes: Vec<SceneChange>,
    rng: StdRng,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(CategoryRegistry::with_builtins(), &MindMapConfig::default())
    }
}

impl GraphStore {
    /// Creates an empty store using `config` for room, placement and sizing.
    pub fn new(registry: CategoryRegistry, config: &MindMapConfig) -> Self {
        Self {
            registry,
            room: config.room.bounds(),
            placement: config.placement,
            sizing: config.sizing,
            nodes: Vec::new(),
            connections: Vec::new(),
            pair_index: HashSet::new(),
            adjacency: HashMap::new(),
            panels: HashMap::new(),
            changes: Vec::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replaces the placement jitter source with a deterministic one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CategoryRegistry {
        &mut self.registry
    }

    pub fn room(&self) -> &RoomBounds {
        &self.room
    }

    /// Room clamp policy shared by every position write.
    pub fn clamp_position(&self, position: Vec3) -> Vec3 {
        self.room.clamp(position)
    }

    /// Creates one node. Never fails; unknown categories get the default
    /// archetype.
    pub fn create_node(&mut self, request: NewNode) -> NodeId {
        let raw_position = match request.placement {
            Placement::At(position) => position,
            Placement::CameraRelative(pose) => self.camera_relative_position(pose),
        };
        let position = self.room.clamp(raw_position);
        let archetype = *self.registry.resolve(&request.category);
        let known_category = self.registry.is_known(&request.category);

        let node = Node {
            id: Uuid::new_v4(),
            category: request.category,
            title: request.title,
            notes: request.notes,
            position,
            date_added: now_epoch_ms(),
            last_edited: None,
            is_highlighted: false,
            resolved: false,
            archetype,
        };
        let id = node.id;

        self.panels.insert(id, InfoPanel::for_node(&node));
        self.adjacency.insert(id, Vec::new());
        self.nodes.push(node);

        let size = self.size_for(id, &archetype);
        self.changes.push(SceneChange::NodeAdded {
            id,
            archetype,
            position,
            size,
        });
        debug!(
            "event=node_create module=store status=ok node_id={id} known_category={known_category}"
        );
        id
    }

    /// Applies a partial update.
    ///
    /// A category change re-derives the archetype and keeps id, content and
    /// timestamps. Only notes/title changes touch `last_edited`.
    pub fn update_node(&mut self, id: NodeId, update: NodeUpdate) -> StoreResult<()> {
        let index = self.index_of(id).ok_or(StoreError::NodeNotFound(id))?;

        let mut restyled = None;
        let mut content_changed = false;
        {
            let node = &mut self.nodes[index];
            if let Some(category) = update.category {
                if category != node.category {
                    node.archetype = *self.registry.resolve(&category);
                    node.category = category;
                    restyled = Some(node.archetype);
                }
            }
            if let Some(notes) = update.notes {
                if notes != node.notes {
                    node.notes = notes;
                    content_changed = true;
                }
            }
            if let Some(title) = update.title {
                if title != node.title {
                    node.title = title;
                    content_changed = true;
                }
            }
            if content_changed {
                node.last_edited = Some(now_epoch_ms());
            }
            if let Some(panel) = self.panels.get_mut(&id) {
                panel.refresh_from(node);
            }
        }

        if let Some(archetype) = restyled {
            let size = self.size_for(id, &archetype);
            self.changes.push(SceneChange::NodeRestyled {
                id,
                archetype,
                size,
            });
        }
        debug!(
            "event=node_update module=store status=ok node_id={} restyled={} content_changed={}",
            id,
            restyled.is_some(),
            content_changed
        );
        Ok(())
    }

    /// Deletes a node with its connections and panel.
    ///
    /// Returns `None` (no-op) for unknown ids.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.index_of(id)?;

        let attached = self.adjacency.remove(&id).unwrap_or_default();
        for key in &attached {
            self.pair_index.remove(key);
            self.changes.push(SceneChange::ConnectionRemoved { key: *key });
            if let Some(other) = key.other(id) {
                if let Some(list) = self.adjacency.get_mut(&other) {
                    list.retain(|candidate| candidate != key);
                }
            }
        }
        self.connections.retain(|connection| !connection.touches(id));

        self.panels.remove(&id);
        let node = self.nodes.remove(index);
        self.changes.push(SceneChange::NodeRemoved { id });

        for key in &attached {
            if let Some(other) = key.other(id) {
                self.push_resize(other);
            }
        }
        info!(
            "event=node_delete module=store status=ok node_id={} removed_connections={}",
            id,
            attached.len()
        );
        Some(node)
    }

    /// Moves a node, clamped into the room interior. Returns the applied
    /// position.
    pub fn move_node(&mut self, id: NodeId, position: Vec3) -> StoreResult<Vec3> {
        let clamped = self.room.clamp(position);
        let node = self
            .nodes
            .iter_mut()
            .find(|node| node.id == id)
            .ok_or(StoreError::NodeNotFound(id))?;
        if node.position != clamped {
            node.position = clamped;
            self.changes.push(SceneChange::NodeMoved {
                id,
                position: clamped,
            });
        }
        Ok(clamped)
    }

    /// Connects two distinct existing nodes.
    ///
    /// Returns `None` for self-connections, unknown endpoints and pairs that
    /// are already connected (in either order).
    pub fn create_connection(&mut self, a: NodeId, b: NodeId) -> Option<ConnectionKey> {
        let key = ConnectionKey::new(a, b);
        if key.is_self_loop() {
            debug!("event=connection_create module=store status=skipped reason=self_loop");
            return None;
        }
        if !self.contains_node(a) || !self.contains_node(b) {
            debug!("event=connection_create module=store status=skipped reason=unknown_endpoint");
            return None;
        }
        if !self.pair_index.insert(key) {
            debug!("event=connection_create module=store status=skipped reason=duplicate");
            return None;
        }

        self.connections.push(Connection::new(a, b));
        for endpoint in [a, b] {
            self.adjacency.entry(endpoint).or_default().push(key);
        }
        self.changes.push(SceneChange::ConnectionAdded { key });
        self.push_resize(a);
        self.push_resize(b);
        debug!(
            "event=connection_create module=store status=ok total={}",
            self.connections.len()
        );
        Some(key)
    }

    /// Sets the transient connect-source highlight. Returns `false` for
    /// unknown ids.
    pub fn set_highlight(&mut self, id: NodeId, highlighted: bool) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
            return false;
        };
        if node.is_highlighted != highlighted {
            node.is_highlighted = highlighted;
            self.changes
                .push(SceneChange::NodeHighlighted { id, highlighted });
        }
        true
    }

    /// Shows or hides one node's info panel. Returns `false` for unknown ids.
    pub fn set_panel_visible(&mut self, id: NodeId, visible: bool) -> bool {
        match self.panels.get_mut(&id) {
            Some(panel) => {
                panel.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Removes every node, connection and panel.
    pub fn clear(&mut self) {
        for connection in &self.connections {
            self.changes.push(SceneChange::ConnectionRemoved {
                key: connection.key,
            });
        }
        for node in &self.nodes {
            self.changes.push(SceneChange::NodeRemoved { id: node.id });
        }
        let removed = self.nodes.len();
        self.nodes.clear();
        self.connections.clear();
        self.pair_index.clear();
        self.adjacency.clear();
        self.panels.clear();
        info!("event=graph_clear module=store status=ok removed_nodes={removed}");
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Position of `id` in the current node listing.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    pub fn has_connection(&self, a: NodeId, b: NodeId) -> bool {
        self.pair_index.contains(&ConnectionKey::new(a, b))
    }

    /// Connection keys attached to `id`, in creation order.
    pub fn connections_of(&self, id: NodeId) -> &[ConnectionKey] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.connections_of(id).len()
    }

    pub fn panel(&self, id: NodeId) -> Option<&InfoPanel> {
        self.panels.get(&id)
    }

    /// Panels in node listing order.
    pub fn panels(&self) -> impl Iterator<Item = &InfoPanel> + '_ {
        self.nodes
            .iter()
            .filter_map(move |node| self.panels.get(&node.id))
    }

    /// Distinct categories in use, first-seen order.
    pub fn categories(&self) -> Vec<String> {
        CategoryRegistry::categories_in_use(&self.nodes)
    }

    /// Display size derived from archetype and (optionally) degree.
    pub fn display_size(&self, id: NodeId) -> Option<f32> {
        let node = self.node(id)?;
        Some(self.size_for(id, &node.archetype))
    }

    /// Takes all journaled changes, oldest first.
    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn pending_changes(&self) -> &[SceneChange] {
        &self.changes
    }

    fn size_for(&self, id: NodeId, archetype: &Archetype) -> f32 {
        let base = self.sizing.base_size * archetype.size_scale;
        if self.sizing.scale_with_degree {
            base + self.degree(id) as f32 * self.sizing.per_connection
        } else {
            base
        }
    }

    fn push_resize(&mut self, id: NodeId) {
        if !self.sizing.scale_with_degree {
            return;
        }
        if let Some(size) = self.display_size(id) {
            self.changes.push(SceneChange::NodeResized { id, size });
        }
    }

    fn camera_relative_position(&mut self, pose: CameraPose) -> Vec3 {
        let spread = self.placement.jitter;
        if !spread.is_finite() || spread <= 0.0 {
            return pose.eye + pose.forward.normalize_or_zero() * self.placement.standoff;
        }
        let jitter = Vec3::new(
            self.rng.random_range(-spread..=spread),
            self.rng.random_range(-spread..=spread),
            self.rng.random_range(-spread..=spread),
        );
        pose.eye + jitter + pose.forward.normalize_or_zero() * self.placement.standoff
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphStore, NewNode, NodeUpdate, Placement};
    use crate::config::MindMapConfig;
    use crate::registry::category_registry::CategoryRegistry;
    use crate::store::changes::SceneChange;
    use crate::view::CameraPose;
    use glam::Vec3;

    fn store_with_degree_sizing() -> GraphStore {
        let mut config = MindMapConfig::default();
        config.sizing.scale_with_degree = true;
        GraphStore::new(CategoryRegistry::with_builtins(), &config).with_seed(7)
    }

    #[test]
    fn camera_relative_placement_stays_within_jitter_of_standoff_point() {
        let mut store = GraphStore::default().with_seed(42);
        let pose = CameraPose::new(Vec3::new(0.0, 5.0, 14.0), Vec3::NEG_Z);
        for _ in 0..32 {
            let id = store.create_node(NewNode::new("Trigger", Placement::CameraRelative(pose)));
            let position = store.node(id).unwrap().position;
            let expected = Vec3::new(0.0, 5.0, 9.0);
            let delta = (position - expected).abs();
            assert!(delta.max_element() <= 0.25 + 1e-6, "delta {delta:?}");
        }
    }

    #[test]
    fn non_finite_jitter_places_without_spread() {
        let mut config = MindMapConfig::default();
        config.placement.jitter = f32::INFINITY;
        let mut store = GraphStore::new(CategoryRegistry::with_builtins(), &config).with_seed(3);
        let pose = CameraPose::new(Vec3::new(0.0, 5.0, 14.0), Vec3::NEG_Z);
        let id = store.create_node(NewNode::new("Theme", Placement::CameraRelative(pose)));
        assert_eq!(store.node(id).unwrap().position, Vec3::new(0.0, 5.0, 9.0));
    }

    #[test]
    fn degree_sizing_grows_and_shrinks_with_connections() {
        let mut store = store_with_degree_sizing();
        let a = store.create_node(NewNode::new("Trigger", Placement::At(Vec3::ZERO)));
        let b = store.create_node(NewNode::new("Theme", Placement::At(Vec3::ONE)));
        assert!((store.display_size(a).unwrap() - 0.2).abs() < 1e-6);
        assert!((store.display_size(b).unwrap() - 0.26).abs() < 1e-6);

        store.create_connection(a, b).unwrap();
        assert!((store.display_size(a).unwrap() - 0.25).abs() < 1e-6);

        store.drain_changes();
        store.delete_node(b);
        assert!((store.display_size(a).unwrap() - 0.2).abs() < 1e-6);
        let changes = store.drain_changes();
        assert!(matches!(changes.last(), Some(SceneChange::NodeResized { id, .. }) if *id == a));
    }

    #[test]
    fn category_change_emits_restyle_without_touching_last_edited() {
        let mut store = GraphStore::default();
        let id = store.create_node(NewNode::new("Trigger", Placement::At(Vec3::ZERO)));
        store.drain_changes();

        store.update_node(id, NodeUpdate::category("Feeling")).unwrap();
        let node = store.node(id).unwrap();
        assert_eq!(node.last_edited, None);
        assert_eq!(store.panel(id).unwrap().category, "Feeling");
        assert!(matches!(
            store.drain_changes().as_slice(),
            [SceneChange::NodeRestyled { id: changed, .. }] if *changed == id
        ));
    }

    #[test]
    fn unchanged_notes_do_not_bump_last_edited() {
        let mut store = GraphStore::default();
        let id = store.create_node(
            NewNode::new("Theme", Placement::At(Vec3::ZERO)).with_notes("same"),
        );
        store.update_node(id, NodeUpdate::notes("same")).unwrap();
        assert_eq!(store.node(id).unwrap().last_edited, None);
    }

    #[test]
    fn move_without_change_does_not_journal() {
        let mut store = GraphStore::default();
        let id = store.create_node(NewNode::new("Theme", Placement::At(Vec3::ZERO)));
        store.drain_changes();
        store.move_node(id, Vec3::ZERO).unwrap();
        assert!(store.pending_changes().is_empty());
    }
}
