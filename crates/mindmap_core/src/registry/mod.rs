//! Category registry: category name to visual archetype.
//!
//! # Invariants
//! - Resolution never fails; unknown categories map to the default archetype.
//! - Registration order is preserved for toolbar/selector building.

pub mod category_registry;
