//! Info panel screen-space projection.
//!
//! # Invariants
//! - Panel scale is always within `[min_scale, max_scale]`.
//! - Only visible panels of nodes in front of the camera are placed.

pub mod projector;
