//! Seams to the external renderer and camera controller.
//!
//! # Responsibility
//! - Describe what the core needs from the presentation layer: camera pose,
//!   pick rays, world-to-screen projection, node picking, and a sink for
//!   scene changes.
//!
//! # Invariants
//! - The core never mutates camera state; viewport changes only trigger
//!   recomputation of derived placement.

pub mod pinhole;

use crate::model::geometry::Ray;
use crate::model::node::NodeId;
use crate::store::changes::SceneChange;
use crate::store::graph_store::GraphStore;
use glam::{Vec2, Vec3};

/// Eye position and unit view direction of the active camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub forward: Vec3,
}

impl CameraPose {
    pub fn new(eye: Vec3, forward: Vec3) -> Self {
        Self {
            eye,
            forward: forward.normalize_or_zero(),
        }
    }
}

/// Camera/view controller queried by the core.
pub trait Viewport {
    fn pose(&self) -> CameraPose;

    /// World-space pick ray through a screen pixel, if the viewport is valid.
    fn pick_ray(&self, screen: Vec2) -> Option<Ray>;

    /// Screen pixel of a world point, or `None` when it is behind the camera.
    fn project_to_screen(&self, world: Vec3) -> Option<Vec2>;
}

/// Pointer hit testing against rendered nodes.
pub trait NodePicker {
    fn pick_node(&self, screen: Vec2) -> Option<NodeId>;
}

impl<F> NodePicker for F
where
    F: Fn(Vec2) -> Option<NodeId>,
{
    fn pick_node(&self, screen: Vec2) -> Option<NodeId> {
        self(screen)
    }
}

/// Renderer-side consumer of graph changes.
pub trait SceneRenderer {
    /// Applies one change; `store` reflects the state after all drained
    /// changes.
    fn apply_change(&mut self, store: &GraphStore, change: &SceneChange);
}
