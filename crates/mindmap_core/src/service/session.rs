//! Mind-map session use-case service.
//!
//! # Responsibility
//! - Consume the semantic UI event surface (toolbar, panel controls,
//!   connect toggle, save/load, category filter, pointer events).
//! - Keep graph store and interaction state consistent across deletions and
//!   document loads.
//!
//! # Invariants
//! - Every node deletion goes through `delete_node`, which also clears the
//!   interaction state machine's references.
//! - `load_json` parses before clearing; on error the graph is unchanged.
//! - The active category filter always names a category in use, or `All`.

use crate::config::MindMapConfig;
use crate::document::schema::{CategoryFilter, MindMapDocument, PreviewDocument};
use crate::document::serializer::{
    apply_document, parse_document, preview, to_document, to_json_pretty, LoadReport,
};
use crate::document::DocumentResult;
use crate::interaction::state_machine::{
    InteractionOutcome, InteractionStateMachine, PointerButton, PointerEvent,
};
use crate::model::node::NodeId;
use crate::panel::projector::{InfoPanelProjector, PanelPlacement};
use crate::registry::category_registry::CategoryRegistry;
use crate::store::changes::SceneChange;
use crate::store::graph_store::{GraphStore, NewNode, NodeUpdate, Placement};
use crate::store::StoreResult;
use crate::view::{CameraPose, NodePicker, SceneRenderer, Viewport};
use glam::{Vec2, Vec3};
use log::{info, warn};

/// One interactive mind-map editing session.
#[derive(Debug)]
pub struct MindMapSession {
    store: GraphStore,
    interaction: InteractionStateMachine,
    projector: InfoPanelProjector,
    selected_category: Option<String>,
    category_filter: CategoryFilter,
    show_all_panels: bool,
}

impl Default for MindMapSession {
    fn default() -> Self {
        Self::new(&MindMapConfig::default())
    }
}

impl MindMapSession {
    /// Creates an empty session with the built-in category palette.
    pub fn new(config: &MindMapConfig) -> Self {
        Self::with_store(
            GraphStore::new(CategoryRegistry::with_builtins(), config),
            config,
        )
    }

    /// Creates a session around a pre-configured store.
    pub fn with_store(store: GraphStore, config: &MindMapConfig) -> Self {
        Self {
            store,
            interaction: InteractionStateMachine::new(config.interaction),
            projector: InfoPanelProjector::new(config.panel),
            selected_category: None,
            category_filter: CategoryFilter::All,
            show_all_panels: false,
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn interaction(&self) -> &InteractionStateMachine {
        &self.interaction
    }

    /// Toolbar category selection; blank input clears the selection.
    pub fn select_category(&mut self, category: &str) {
        let trimmed = category.trim();
        self.selected_category = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// "Add node" with the selected category, placed in front of the camera.
    ///
    /// Returns `None` when no category is selected.
    pub fn add_node(&mut self, title: &str, pose: CameraPose) -> Option<NodeId> {
        let Some(category) = self.selected_category.clone() else {
            warn!("event=add_node module=session status=skipped reason=no_category");
            return None;
        };
        let id = self.store.create_node(
            NewNode::new(category, Placement::CameraRelative(pose)).with_title(title.trim()),
        );
        Some(id)
    }

    /// Scripted creation at an explicit position.
    pub fn add_node_at(&mut self, category: &str, position: Vec3, title: &str) -> NodeId {
        self.store
            .create_node(NewNode::new(category, Placement::At(position)).with_title(title))
    }

    pub fn change_node_category(&mut self, id: NodeId, category: &str) -> StoreResult<()> {
        self.store.update_node(id, NodeUpdate::category(category))?;
        self.refresh_filter();
        Ok(())
    }

    pub fn change_node_notes(&mut self, id: NodeId, text: &str) -> StoreResult<()> {
        self.store.update_node(id, NodeUpdate::notes(text))
    }

    pub fn change_node_title(&mut self, id: NodeId, title: &str) -> StoreResult<()> {
        self.store.update_node(id, NodeUpdate::title(title))
    }

    /// Deletes a node and drops any transient reference to it. Unknown ids
    /// are ignored.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let removed = self.store.delete_node(id).is_some();
        self.interaction.forget_node(id);
        if removed {
            self.refresh_filter();
        }
        removed
    }

    pub fn set_connect_mode(&mut self, enabled: bool) -> InteractionOutcome {
        self.interaction.set_connect_mode(&mut self.store, enabled)
    }

    pub fn connect_mode(&self) -> bool {
        self.interaction.connect_mode()
    }

    /// Flips the global "show all titles" mode and returns the new value.
    pub fn toggle_show_all_panels(&mut self) -> bool {
        self.show_all_panels = !self.show_all_panels;
        self.show_all_panels
    }

    pub fn show_all_panels(&self) -> bool {
        self.show_all_panels
    }

    pub fn close_panel(&mut self, id: NodeId) -> InteractionOutcome {
        self.interaction.close_panel(&mut self.store, id)
    }

    pub fn pointer_pressed(
        &mut self,
        viewport: &dyn Viewport,
        picker: &dyn NodePicker,
        event: PointerEvent,
    ) -> InteractionOutcome {
        self.interaction
            .pointer_pressed(&mut self.store, viewport, picker, event)
    }

    pub fn pointer_moved(&mut self, viewport: &dyn Viewport, position: Vec2) -> InteractionOutcome {
        self.interaction
            .pointer_moved(&mut self.store, viewport, position)
    }

    pub fn pointer_released(&mut self, button: PointerButton) -> InteractionOutcome {
        self.interaction.pointer_released(button)
    }

    pub fn save(&self) -> MindMapDocument {
        to_document(&self.store)
    }

    pub fn save_json(&self) -> DocumentResult<String> {
        to_json_pretty(&self.save())
    }

    /// Replaces the graph with `document`.
    pub fn load(&mut self, document: &MindMapDocument) -> LoadReport {
        self.interaction.reset();
        let report = apply_document(&mut self.store, document);
        self.refresh_filter();
        report
    }

    /// Parses and loads document JSON. A parse error leaves the session
    /// untouched.
    pub fn load_json(&mut self, text: &str) -> DocumentResult<LoadReport> {
        let document = parse_document(text)?;
        Ok(self.load(&document))
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
        self.refresh_filter();
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    /// Categories in use, for the filter/selector dropdowns.
    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    pub fn preview(&self) -> PreviewDocument {
        preview(&self.store, &self.category_filter)
    }

    pub fn preview_json(&self) -> DocumentResult<String> {
        to_json_pretty(&self.preview())
    }

    /// Current placement of every visible panel.
    pub fn panel_placements(&self, viewport: &dyn Viewport) -> Vec<PanelPlacement> {
        self.projector
            .project(&self.store, viewport, self.show_all_panels)
    }

    pub fn drain_scene_changes(&mut self) -> Vec<SceneChange> {
        self.store.drain_changes()
    }

    /// Drains pending changes into `renderer`. Returns how many were applied.
    pub fn flush_to(&mut self, renderer: &mut dyn SceneRenderer) -> usize {
        let changes = self.store.drain_changes();
        for change in &changes {
            renderer.apply_change(&self.store, change);
        }
        changes.len()
    }

    fn refresh_filter(&mut self) {
        if let CategoryFilter::Only(category) = &self.category_filter {
            if !self.store.categories().iter().any(|used| used == category) {
                info!("event=category_filter module=session status=reset reason=unused");
                self.category_filter = CategoryFilter::All;
            }
        }
    }
}
