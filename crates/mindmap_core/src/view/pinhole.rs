//! Reference perspective camera.
//!
//! Used by headless tools and tests. Conventions follow the usual WebGL
//! screen mapping: origin at the top-left corner, y growing downwards.

use crate::model::geometry::Ray;
use crate::view::{CameraPose, Viewport};
use glam::{Mat4, Vec2, Vec3};

/// Look-at perspective camera with a fixed viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Vec2,
}

impl PinholeCamera {
    pub fn new(eye: Vec3, target: Vec3, viewport: Vec2) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            viewport,
        }
    }

    /// Camera at the default start position of the room.
    pub fn start_position(viewport: Vec2) -> Self {
        Self::new(Vec3::new(0.0, 5.0, 14.0), Vec3::ZERO, viewport)
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    fn has_area(&self) -> bool {
        self.viewport.x > 0.0 && self.viewport.y > 0.0
    }

    fn view_projection(&self) -> Mat4 {
        let aspect = self.viewport.x / self.viewport.y;
        let projection =
            Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far);
        projection * Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

impl Viewport for PinholeCamera {
    fn pose(&self) -> CameraPose {
        CameraPose::new(self.eye, self.target - self.eye)
    }

    fn pick_ray(&self, screen: Vec2) -> Option<Ray> {
        if !self.has_area() {
            return None;
        }
        let ndc_x = screen.x / self.viewport.x * 2.0 - 1.0;
        let ndc_y = -(screen.y / self.viewport.y) * 2.0 + 1.0;
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.5));
        Ray::new(self.eye, through - self.eye)
    }

    fn project_to_screen(&self, world: Vec3) -> Option<Vec2> {
        if !self.has_area() {
            return None;
        }
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w.is_nan() || clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !ndc.is_finite() {
            return None;
        }
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.x,
            (-ndc.y * 0.5 + 0.5) * self.viewport.y,
        ))
    }
}
