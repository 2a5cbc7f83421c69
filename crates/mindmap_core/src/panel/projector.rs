//! Info panel placement from node world positions.

use crate::model::node::{Node, NodeId};
use crate::store::graph_store::GraphStore;
use crate::view::Viewport;
use serde::{Deserialize, Serialize};

/// Fixed panel layout constants (pixels unless noted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
    pub base_width: f32,
    pub base_height: f32,
    pub base_font_size: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Camera distance (world units) at which the scale is 1.
    pub reference_distance: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            base_width: 200.0,
            base_height: 150.0,
            base_font_size: 12.0,
            min_scale: 0.5,
            max_scale: 2.0,
            reference_distance: 10.0,
            offset_x: 20.0,
            offset_y: -20.0,
        }
    }
}

/// What a placed panel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelContent {
    /// Individually opened: title, category selector, notes, controls.
    Full,
    /// Shown only through "show all": title line only.
    TitleOnly,
}

/// Screen-space placement of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    pub node: NodeId,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub scale: f32,
    pub content: PanelContent,
}

/// Computes panel placement for visible panels.
#[derive(Debug, Clone, Default)]
pub struct InfoPanelProjector {
    layout: PanelLayout,
}

impl InfoPanelProjector {
    pub fn new(layout: PanelLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Distance-based scale, inversely proportional and clamped.
    pub fn scale_for_distance(&self, distance: f32) -> f32 {
        let layout = &self.layout;
        if distance.is_nan() || distance <= 0.0 {
            return layout.max_scale;
        }
        (layout.reference_distance / distance).clamp(layout.min_scale, layout.max_scale)
    }

    /// Placements for every panel that should be on screen, in node order.
    pub fn project(
        &self,
        store: &GraphStore,
        viewport: &dyn Viewport,
        show_all: bool,
    ) -> Vec<PanelPlacement> {
        store
            .nodes()
            .iter()
            .filter_map(|node| self.place_node(store, viewport, node, show_all))
            .collect()
    }

    /// Placement for one node, e.g. while it is being dragged.
    pub fn project_node(
        &self,
        store: &GraphStore,
        viewport: &dyn Viewport,
        id: NodeId,
        show_all: bool,
    ) -> Option<PanelPlacement> {
        let node = store.node(id)?;
        self.place_node(store, viewport, node, show_all)
    }

    fn place_node(
        &self,
        store: &GraphStore,
        viewport: &dyn Viewport,
        node: &Node,
        show_all: bool,
    ) -> Option<PanelPlacement> {
        let panel = store.panel(node.id)?;
        let content = if panel.visible {
            PanelContent::Full
        } else if show_all {
            PanelContent::TitleOnly
        } else {
            return None;
        };

        let screen = viewport.project_to_screen(node.position)?;
        let distance = viewport.pose().eye.distance(node.position);
        let scale = self.scale_for_distance(distance);
        let layout = &self.layout;

        Some(PanelPlacement {
            node: node.id,
            left: screen.x + layout.offset_x,
            top: screen.y + layout.offset_y,
            width: layout.base_width * scale,
            height: layout.base_height * scale,
            font_size: layout.base_font_size * scale,
            scale,
            content,
        })
    }
}
