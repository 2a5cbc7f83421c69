//! Mind-map domain model.
//!
//! # Responsibility
//! - Define canonical node/connection/panel records owned by the graph store.
//! - Define category archetypes (derived appearance) and room geometry.
//!
//! # Invariants
//! - Every node is identified by a stable `NodeId`; titles and categories
//!   may change without affecting identity.
//! - A connection is identified by its unordered endpoint pair.
//! - Side tables (info panels, adjacency) are keyed by `NodeId`.

pub mod archetype;
pub mod connection;
pub mod geometry;
pub mod info_panel;
pub mod node;
