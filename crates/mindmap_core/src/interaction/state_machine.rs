//! Interaction state machine.
//!
//! States: `Idle`, `Dragging`, with an orthogonal connect-mode toggle carrying
//! an optional pending source (`Connecting(source | none)`) and an
//! independent open-panel slot.

use crate::model::connection::ConnectionKey;
use crate::model::geometry::Plane;
use crate::model::node::NodeId;
use crate::store::graph_store::GraphStore;
use crate::view::{NodePicker, Viewport};
use glam::{Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

/// Pointer button reported by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Usually the middle button / wheel press.
    Auxiliary,
    /// Usually the right button.
    Secondary,
}

/// Button bindings for the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Button that starts dragging a node when connect mode is off.
    pub drag_button: PointerButton,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_button: PointerButton::Auxiliary,
        }
    }
}

/// Pointer press or release in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub button: PointerButton,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(button: PointerButton, position: Vec2) -> Self {
        Self { button, position }
    }
}

/// Drag sub-state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        node: NodeId,
        /// Plane through the node, perpendicular to the view direction at
        /// grab time.
        plane: Plane,
        /// Node position minus the grab point, preserved during the drag.
        offset: Vec3,
    },
}

/// Result of feeding one event to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    Ignored,
    DragStarted(NodeId),
    NodeDragged { node: NodeId, position: Vec3 },
    DragEnded(NodeId),
    ConnectModeChanged(bool),
    SourceSelected(NodeId),
    /// Second click of a connect gesture. `key` is `None` when the pair was
    /// already connected.
    ConnectionCommitted {
        source: NodeId,
        target: NodeId,
        key: Option<ConnectionKey>,
    },
    ConnectCancelled(NodeId),
    PanelOpened(NodeId),
    PanelClosed(NodeId),
}

/// Owned interaction state for one mind-map view.
#[derive(Debug, Clone)]
pub struct InteractionStateMachine {
    config: InteractionConfig,
    drag: DragState,
    connect_mode: bool,
    pending_source: Option<NodeId>,
    open_panel: Option<NodeId>,
}

impl Default for InteractionStateMachine {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl InteractionStateMachine {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            drag: DragState::Idle,
            connect_mode: false,
            pending_source: None,
            open_panel: None,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Whether the external orbit controller may consume pointer input.
    pub fn orbit_enabled(&self) -> bool {
        !self.is_dragging()
    }

    pub fn connect_mode(&self) -> bool {
        self.connect_mode
    }

    pub fn pending_source(&self) -> Option<NodeId> {
        self.pending_source
    }

    pub fn open_panel(&self) -> Option<NodeId> {
        self.open_panel
    }

    /// Toggles connect mode. Turning it off cancels a pending source and
    /// clears its highlight.
    pub fn set_connect_mode(
        &mut self,
        store: &mut GraphStore,
        enabled: bool,
    ) -> InteractionOutcome {
        self.connect_mode = enabled;
        if !enabled {
            if let Some(source) = self.pending_source.take() {
                store.set_highlight(source, false);
            }
        }
        debug!("event=connect_mode module=interaction status=ok enabled={enabled}");
        InteractionOutcome::ConnectModeChanged(enabled)
    }

    /// Handles a button press at `event.position`.
    pub fn pointer_pressed(
        &mut self,
        store: &mut GraphStore,
        viewport: &dyn Viewport,
        picker: &dyn NodePicker,
        event: PointerEvent,
    ) -> InteractionOutcome {
        self.revalidate(store);
        if self.is_dragging() {
            return InteractionOutcome::Ignored;
        }

        let hit = picker
            .pick_node(event.position)
            .filter(|id| store.contains_node(*id));

        match hit {
            Some(node) if event.button == self.config.drag_button && !self.connect_mode => {
                self.begin_drag(store, viewport, node, event.position)
            }
            Some(node) if event.button == PointerButton::Primary => {
                if self.connect_mode {
                    self.connect_click(store, node)
                } else {
                    self.toggle_panel(store, node)
                }
            }
            Some(_) => InteractionOutcome::Ignored,
            None if event.button == PointerButton::Primary => self.empty_click(store),
            None => InteractionOutcome::Ignored,
        }
    }

    /// Handles pointer motion; only meaningful while dragging.
    pub fn pointer_moved(
        &mut self,
        store: &mut GraphStore,
        viewport: &dyn Viewport,
        position: Vec2,
    ) -> InteractionOutcome {
        self.revalidate(store);
        let DragState::Dragging {
            node,
            plane,
            offset,
        } = self.drag
        else {
            return InteractionOutcome::Ignored;
        };

        let Some(hit) = viewport
            .pick_ray(position)
            .and_then(|ray| plane.intersect_ray(&ray))
        else {
            return InteractionOutcome::Ignored;
        };

        match store.move_node(node, hit + offset) {
            Ok(position) => InteractionOutcome::NodeDragged { node, position },
            Err(_) => {
                self.drag = DragState::Idle;
                InteractionOutcome::Ignored
            }
        }
    }

    /// Ends any active drag, whatever button was released.
    pub fn pointer_released(&mut self, _button: PointerButton) -> InteractionOutcome {
        match std::mem::replace(&mut self.drag, DragState::Idle) {
            DragState::Dragging { node, .. } => {
                debug!("event=drag_end module=interaction status=ok node_id={node}");
                InteractionOutcome::DragEnded(node)
            }
            DragState::Idle => InteractionOutcome::Ignored,
        }
    }

    /// Closes one panel from its own close control.
    pub fn close_panel(&mut self, store: &mut GraphStore, node: NodeId) -> InteractionOutcome {
        if self.open_panel == Some(node) {
            self.open_panel = None;
        }
        if !store.panel(node).is_some_and(|panel| panel.visible) {
            return InteractionOutcome::Ignored;
        }
        store.set_panel_visible(node, false);
        InteractionOutcome::PanelClosed(node)
    }

    /// Drops every transient reference to `node`. Call after deleting it.
    pub fn forget_node(&mut self, node: NodeId) {
        if matches!(self.drag, DragState::Dragging { node: target, .. } if target == node) {
            self.drag = DragState::Idle;
        }
        if self.pending_source == Some(node) {
            self.pending_source = None;
        }
        if self.open_panel == Some(node) {
            self.open_panel = None;
        }
    }

    /// Forgets all transient state, keeping connect mode as is.
    pub fn reset(&mut self) {
        self.drag = DragState::Idle;
        self.pending_source = None;
        self.open_panel = None;
    }

    fn revalidate(&mut self, store: &GraphStore) {
        let stale: Vec<NodeId> = [self.drag_target(), self.pending_source, self.open_panel]
            .into_iter()
            .flatten()
            .filter(|id| !store.contains_node(*id))
            .collect();
        for id in stale {
            debug!("event=stale_reference module=interaction status=reset node_id={id}");
            self.forget_node(id);
        }
    }

    fn drag_target(&self) -> Option<NodeId> {
        match self.drag {
            DragState::Dragging { node, .. } => Some(node),
            DragState::Idle => None,
        }
    }

    fn begin_drag(
        &mut self,
        store: &GraphStore,
        viewport: &dyn Viewport,
        node: NodeId,
        screen: Vec2,
    ) -> InteractionOutcome {
        let Some(position) = store.node(node).map(|node| node.position) else {
            return InteractionOutcome::Ignored;
        };
        let pose = viewport.pose();
        let Some(plane) = Plane::from_normal_and_point(pose.forward, position) else {
            return InteractionOutcome::Ignored;
        };
        let Some(grab) = viewport
            .pick_ray(screen)
            .and_then(|ray| plane.intersect_ray(&ray))
        else {
            return InteractionOutcome::Ignored;
        };

        self.drag = DragState::Dragging {
            node,
            plane,
            offset: position - grab,
        };
        debug!("event=drag_start module=interaction status=ok node_id={node}");
        InteractionOutcome::DragStarted(node)
    }

    fn connect_click(&mut self, store: &mut GraphStore, node: NodeId) -> InteractionOutcome {
        match self.pending_source {
            None => {
                self.pending_source = Some(node);
                store.set_highlight(node, true);
                InteractionOutcome::SourceSelected(node)
            }
            Some(source) if source == node => InteractionOutcome::Ignored,
            Some(source) => {
                let key = store.create_connection(source, node);
                store.set_highlight(source, false);
                self.pending_source = None;
                InteractionOutcome::ConnectionCommitted {
                    source,
                    target: node,
                    key,
                }
            }
        }
    }

    fn toggle_panel(&mut self, store: &mut GraphStore, node: NodeId) -> InteractionOutcome {
        if store.panel(node).is_some_and(|panel| panel.visible) {
            return self.close_panel(store, node);
        }
        if let Some(previous) = self.open_panel.take() {
            store.set_panel_visible(previous, false);
        }
        store.set_panel_visible(node, true);
        self.open_panel = Some(node);
        InteractionOutcome::PanelOpened(node)
    }

    fn empty_click(&mut self, store: &mut GraphStore) -> InteractionOutcome {
        if self.connect_mode {
            return match self.pending_source.take() {
                Some(source) => {
                    store.set_highlight(source, false);
                    InteractionOutcome::ConnectCancelled(source)
                }
                None => InteractionOutcome::Ignored,
            };
        }
        match self.open_panel {
            Some(open) => self.close_panel(store, open),
            None => InteractionOutcome::Ignored,
        }
    }
}
