//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide mind-map session behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Node ids cross the boundary as hyphenated UUID strings.
//! - A poisoned session lock is recovered, never propagated.

use glam::{Vec2, Vec3};
use log::warn;
use mindmap_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CameraPose, CategoryFilter, InteractionOutcome, MindMapSession, NodeId, PanelContent,
    PinholeCamera, PointerButton, PointerEvent,
};
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

static SESSION: OnceLock<Mutex<MindMapSession>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope for mind-map commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected node ID, when the action targets one.
    pub node_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl MapActionResponse {
    fn success(message: impl Into<String>, node_id: Option<NodeId>) -> Self {
        Self {
            ok: true,
            node_id: node_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            node_id: None,
            message: message.into(),
        }
    }
}

/// Camera state supplied by the Dart renderer with each view-dependent call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInput {
    pub eye_x: f32,
    pub eye_y: f32,
    pub eye_z: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub target_z: f32,
    /// Viewport width in logical pixels.
    pub width: f32,
    /// Viewport height in logical pixels.
    pub height: f32,
}

impl CameraInput {
    fn to_camera(self) -> PinholeCamera {
        PinholeCamera::new(
            Vec3::new(self.eye_x, self.eye_y, self.eye_z),
            Vec3::new(self.target_x, self.target_y, self.target_z),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Node listing entry for widget rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeItem {
    pub node_id: String,
    pub category: String,
    pub title: String,
    pub notes: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Display radius derived from category (and degree, if enabled).
    pub size: f32,
    /// `0xRRGGBB` base color.
    pub color: u32,
    /// Primitive name (`sphere|octahedron|dodecahedron|icosahedron|torus`).
    pub shape: String,
    pub highlighted: bool,
    /// Unix epoch milliseconds.
    pub date_added: i64,
    /// Unix epoch milliseconds of the last notes/title edit; `None` when the
    /// node has not been edited yet.
    pub last_edited: Option<i64>,
}

/// Connection listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionItem {
    pub source_id: String,
    pub target_id: String,
}

/// Screen placement of one visible info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelItem {
    pub node_id: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    /// `false` when shown only through "show all titles".
    pub full: bool,
}

/// Result of one pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerResponse {
    /// Outcome label, e.g. `drag_started`, `connection_committed`, `ignored`.
    pub outcome: String,
    pub node_id: Option<String>,
    /// Whether the orbit controller may consume pointer input now.
    pub orbit_enabled: bool,
}

/// Sets the toolbar category used by `add_node`.
#[flutter_rust_bridge::frb(sync)]
pub fn select_category(category: String) {
    with_session(|session| session.select_category(&category));
}

/// Adds a node of the selected category in front of the camera.
///
/// # FFI contract
/// - Fails without mutation when no category is selected.
#[flutter_rust_bridge::frb(sync)]
pub fn add_node(title: String, camera: CameraInput) -> MapActionResponse {
    let camera = camera.to_camera();
    let pose = CameraPose::new(camera.eye, camera.target - camera.eye);
    with_session(|session| match session.add_node(&title, pose) {
        Some(id) => MapActionResponse::success("node created", Some(id)),
        None => MapActionResponse::failure("select a category first"),
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_node_notes(node_id: String, notes: String) -> MapActionResponse {
    update_node(&node_id, |session, id| session.change_node_notes(id, &notes))
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_node_title(node_id: String, title: String) -> MapActionResponse {
    update_node(&node_id, |session, id| session.change_node_title(id, &title))
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_node_category(node_id: String, category: String) -> MapActionResponse {
    update_node(&node_id, |session, id| {
        session.change_node_category(id, &category)
    })
}

/// Deletes a node with its connections and panel.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_node(node_id: String) -> MapActionResponse {
    let id = match parse_node_id(&node_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    with_session(|session| {
        if session.delete_node(id) {
            MapActionResponse::success("node deleted", Some(id))
        } else {
            MapActionResponse::failure(format!("node not found: {id}"))
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_connect_mode(enabled: bool) -> bool {
    with_session(|session| {
        session.set_connect_mode(enabled);
        session.connect_mode()
    })
}

/// Flips "show all titles" and returns the new state.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_show_all_titles() -> bool {
    with_session(MindMapSession::toggle_show_all_panels)
}

#[flutter_rust_bridge::frb(sync)]
pub fn close_panel(node_id: String) -> MapActionResponse {
    let id = match parse_node_id(&node_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    with_session(|session| match session.close_panel(id) {
        InteractionOutcome::PanelClosed(_) => MapActionResponse::success("panel closed", Some(id)),
        _ => MapActionResponse::failure("panel not open"),
    })
}

/// Pointer press. `hit_node_id` is the node under the pointer, as picked by
/// the Dart renderer.
///
/// `button` is one of `primary|auxiliary|secondary`.
#[flutter_rust_bridge::frb(sync)]
pub fn pointer_down(
    camera: CameraInput,
    button: String,
    x: f32,
    y: f32,
    hit_node_id: Option<String>,
) -> PointerResponse {
    let Some(button) = parse_button(&button) else {
        return with_session(|session| pointer_response(session, InteractionOutcome::Ignored));
    };
    let hit = hit_node_id.and_then(|raw| Uuid::parse_str(raw.trim()).ok());
    let picker = move |_: Vec2| hit;
    let camera = camera.to_camera();
    with_session(|session| {
        let outcome = session.pointer_pressed(
            &camera,
            &picker,
            PointerEvent::new(button, Vec2::new(x, y)),
        );
        pointer_response(session, outcome)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn pointer_move(camera: CameraInput, x: f32, y: f32) -> PointerResponse {
    let camera = camera.to_camera();
    with_session(|session| {
        let outcome = session.pointer_moved(&camera, Vec2::new(x, y));
        pointer_response(session, outcome)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn pointer_up(button: String) -> PointerResponse {
    let button = parse_button(&button).unwrap_or(PointerButton::Primary);
    with_session(|session| {
        let outcome = session.pointer_released(button);
        pointer_response(session, outcome)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_nodes() -> Vec<NodeItem> {
    with_session(|session| {
        let store = session.store();
        store
            .nodes()
            .iter()
            .map(|node| NodeItem {
                node_id: node.id.to_string(),
                category: node.category.clone(),
                title: node.display_title().to_string(),
                notes: node.notes.clone(),
                x: node.position.x,
                y: node.position.y,
                z: node.position.z,
                size: store.display_size(node.id).unwrap_or_default(),
                color: node.archetype.color.0,
                shape: shape_label(node.archetype.shape).to_string(),
                highlighted: node.is_highlighted,
                date_added: node.date_added,
                last_edited: node.last_edited,
            })
            .collect()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_connections() -> Vec<ConnectionItem> {
    with_session(|session| {
        session
            .store()
            .connections()
            .iter()
            .map(|connection| ConnectionItem {
                source_id: connection.source.to_string(),
                target_id: connection.target.to_string(),
            })
            .collect()
    })
}

/// Panel placements for the current camera.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_placements(camera: CameraInput) -> Vec<PanelItem> {
    let camera = camera.to_camera();
    with_session(|session| {
        session
            .panel_placements(&camera)
            .into_iter()
            .map(|placement| PanelItem {
                node_id: placement.node.to_string(),
                left: placement.left,
                top: placement.top,
                width: placement.width,
                height: placement.height,
                font_size: placement.font_size,
                full: placement.content == PanelContent::Full,
            })
            .collect()
    })
}

/// Serializes the whole graph. Returns the error message prefixed with
/// `error:` on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn save_document_json() -> String {
    with_session(|session| match session.save_json() {
        Ok(json) => json,
        Err(err) => format!("error: {err}"),
    })
}

/// Replaces the graph with a document.
///
/// # FFI contract
/// - Malformed input fails without touching the current graph.
#[flutter_rust_bridge::frb(sync)]
pub fn load_document_json(json: String) -> MapActionResponse {
    with_session(|session| match session.load_json(&json) {
        Ok(report) => MapActionResponse::success(
            format!(
                "loaded {} nodes, {} connections ({} dropped)",
                report.nodes_created, report.connections_created, report.connections_dropped
            ),
            None,
        ),
        Err(err) => MapActionResponse::failure(err.to_string()),
    })
}

/// Sets the preview filter. `"all"` selects every category.
#[flutter_rust_bridge::frb(sync)]
pub fn set_category_filter(selector: String) -> String {
    with_session(|session| {
        session.set_category_filter(CategoryFilter::from_selector(selector.trim()));
        match session.category_filter() {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(category) => category.clone(),
        }
    })
}

/// Categories currently used by nodes, in first-seen order.
#[flutter_rust_bridge::frb(sync)]
pub fn list_categories() -> Vec<String> {
    with_session(|session| session.categories())
}

/// Filtered, position-free preview JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn preview_json() -> String {
    with_session(|session| match session.preview_json() {
        Ok(json) => json,
        Err(err) => format!("error: {err}"),
    })
}

fn lock_session() -> MutexGuard<'static, MindMapSession> {
    let mutex = SESSION.get_or_init(|| Mutex::new(MindMapSession::default()));
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered");
        poisoned.into_inner()
    })
}

fn with_session<T>(f: impl FnOnce(&mut MindMapSession) -> T) -> T {
    let mut guard = lock_session();
    f(&mut guard)
}

fn update_node(
    node_id: &str,
    f: impl FnOnce(&mut MindMapSession, NodeId) -> mindmap_core::StoreResult<()>,
) -> MapActionResponse {
    let id = match parse_node_id(node_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    with_session(|session| match f(session, id) {
        Ok(()) => MapActionResponse::success("node updated", Some(id)),
        Err(err) => MapActionResponse::failure(err.to_string()),
    })
}

fn parse_node_id(raw: &str) -> Result<NodeId, MapActionResponse> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| MapActionResponse::failure(format!("invalid node_id: {raw}")))
}

fn parse_button(raw: &str) -> Option<PointerButton> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "primary" | "left" => Some(PointerButton::Primary),
        "auxiliary" | "middle" => Some(PointerButton::Auxiliary),
        "secondary" | "right" => Some(PointerButton::Secondary),
        _ => None,
    }
}

fn pointer_response(session: &MindMapSession, outcome: InteractionOutcome) -> PointerResponse {
    let (label, node) = match outcome {
        InteractionOutcome::Ignored => ("ignored", None),
        InteractionOutcome::DragStarted(id) => ("drag_started", Some(id)),
        InteractionOutcome::NodeDragged { node, .. } => ("node_dragged", Some(node)),
        InteractionOutcome::DragEnded(id) => ("drag_ended", Some(id)),
        InteractionOutcome::ConnectModeChanged(_) => ("connect_mode_changed", None),
        InteractionOutcome::SourceSelected(id) => ("source_selected", Some(id)),
        InteractionOutcome::ConnectionCommitted { target, key, .. } => {
            if key.is_some() {
                ("connection_committed", Some(target))
            } else {
                ("connection_exists", Some(target))
            }
        }
        InteractionOutcome::ConnectCancelled(id) => ("connect_cancelled", Some(id)),
        InteractionOutcome::PanelOpened(id) => ("panel_opened", Some(id)),
        InteractionOutcome::PanelClosed(id) => ("panel_closed", Some(id)),
    };
    PointerResponse {
        outcome: label.to_string(),
        node_id: node.map(|id| id.to_string()),
        orbit_enabled: session.interaction().orbit_enabled(),
    }
}

fn shape_label(shape: mindmap_core::ShapeKind) -> &'static str {
    match shape {
        mindmap_core::ShapeKind::Sphere => "sphere",
        mindmap_core::ShapeKind::Octahedron => "octahedron",
        mindmap_core::ShapeKind::Dodecahedron => "dodecahedron",
        mindmap_core::ShapeKind::Icosahedron => "icosahedron",
        mindmap_core::ShapeKind::Torus => "torus",
    }
}
