//! Pointer/mode interaction handling.
//!
//! # Responsibility
//! - Interpret pointer presses, moves and releases against the current mode.
//! - Issue graph commands (move, connect, highlight, panel visibility).
//!
//! # Invariants
//! - All transient references (drag target, pending source, open panel)
//!   point at live nodes or at nothing.
//! - Invalid input is ignored, never reported as an error.

pub mod state_machine;
