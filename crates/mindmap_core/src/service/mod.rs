//! Core use-case services.
//!
//! # Responsibility
//! - Turn semantic UI events into graph store, interaction and document calls.
//! - Keep UI/FFI layers decoupled from store internals.

pub mod session;
