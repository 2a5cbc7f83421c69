//! Room geometry and ray/plane helpers.
//!
//! # Invariants
//! - `RoomBounds::clamp` never returns a point outside the interior margin.
//! - `Plane::intersect_ray` only reports hits in front of the ray origin.

use glam::Vec3;

const PARALLEL_EPSILON: f32 = 1e-6;

/// World-space ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Infinite plane `normal · p = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Plane {
    /// Builds the plane with `normal` passing through `point`.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Option<Self> {
        let normal = normal.try_normalize()?;
        Some(Self {
            normal,
            offset: normal.dot(point),
        })
    }

    /// Returns the intersection point, or `None` when the ray is parallel to
    /// the plane or points away from it.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.offset - self.normal.dot(ray.origin)) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.at(t))
    }
}

/// Axis-aligned room centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    /// Full room extents (width, height, depth).
    pub size: Vec3,
    /// Distance kept between nodes and every wall.
    pub margin: f32,
}

impl RoomBounds {
    pub fn new(size: Vec3, margin: f32) -> Self {
        Self { size, margin }
    }

    /// Half extents of the region nodes may occupy.
    pub fn interior_half_extents(&self) -> Vec3 {
        (self.size * 0.5 - Vec3::splat(self.margin)).max(Vec3::ZERO)
    }

    pub fn clamp(&self, point: Vec3) -> Vec3 {
        let half = self.interior_half_extents();
        point.max(-half).min(half)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let half = self.interior_half_extents();
        point.abs().cmple(half).all()
    }
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self::new(Vec3::new(30.0, 20.0, 30.0), 1.0)
    }
}
