//! Flutter-facing bindings for the mind-map core.

pub mod api;
