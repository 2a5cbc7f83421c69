//! Core domain logic for the 3D mind map.
//! This crate is the single source of truth for graph invariants.

pub mod config;
pub mod document;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod panel;
pub mod registry;
pub mod service;
pub mod store;
pub mod view;

pub use config::{load_config_file, ConfigError, MindMapConfig};
pub use document::io::{read_document_file, write_document_file};
pub use document::schema::{CategoryFilter, MindMapDocument, PreviewDocument};
pub use document::serializer::LoadReport;
pub use document::{DocumentError, DocumentResult};
pub use interaction::state_machine::{
    InteractionOutcome, InteractionStateMachine, PointerButton, PointerEvent,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::archetype::{Archetype, Rgb, ShapeKind};
pub use model::connection::{Connection, ConnectionKey};
pub use model::info_panel::InfoPanel;
pub use model::node::{Node, NodeId};
pub use panel::projector::{InfoPanelProjector, PanelContent, PanelLayout, PanelPlacement};
pub use registry::category_registry::CategoryRegistry;
pub use service::session::MindMapSession;
pub use store::changes::SceneChange;
pub use store::graph_store::{GraphStore, NewNode, NodeUpdate, Placement};
pub use store::{StoreError, StoreResult};
pub use view::pinhole::PinholeCamera;
pub use view::{CameraPose, NodePicker, SceneRenderer, Viewport};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
