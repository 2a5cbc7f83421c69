use glam::Vec3;
use mindmap_core::model::archetype::DEFAULT_ARCHETYPE;
use mindmap_core::registry::category_registry::{CATEGORY_THEME, CATEGORY_TRIGGER};
use mindmap_core::{
    GraphStore, MindMapConfig, NewNode, NodeUpdate, Placement, SceneChange, ShapeKind, StoreError,
};
use uuid::Uuid;

fn node_at(store: &mut GraphStore, category: &str, position: Vec3) -> Uuid {
    store.create_node(NewNode::new(category, Placement::At(position)))
}

#[test]
fn trigger_and_theme_connected_once() {
    let mut store = GraphStore::default();
    let trigger = node_at(&mut store, CATEGORY_TRIGGER, Vec3::new(-2.0, 0.0, 0.0));
    let theme = node_at(&mut store, CATEGORY_THEME, Vec3::new(2.0, 0.0, 0.0));

    assert!(store.create_connection(trigger, theme).is_some());

    assert_eq!(store.nodes().len(), 2);
    assert_eq!(store.connections().len(), 1);
    let theme_node = store.node(theme).unwrap();
    assert_eq!(theme_node.archetype.shape, ShapeKind::Dodecahedron);
    assert_eq!(theme_node.archetype.size_scale, 1.3);
    assert_eq!(
        store.node(trigger).unwrap().archetype.shape,
        ShapeKind::Octahedron
    );
}

#[test]
fn duplicate_connection_in_either_order_is_rejected() {
    let mut store = GraphStore::default();
    let a = node_at(&mut store, CATEGORY_TRIGGER, Vec3::ZERO);
    let b = node_at(&mut store, CATEGORY_THEME, Vec3::ONE);

    let first = store.create_connection(a, b).unwrap();
    assert!(store.create_connection(a, b).is_none());
    assert!(store.create_connection(b, a).is_none());

    assert_eq!(store.connections().len(), 1);
    assert_eq!(store.connections()[0].key, first);
    assert!(store.has_connection(b, a));
    assert_eq!(store.degree(a), 1);
}

#[test]
fn self_connection_and_unknown_endpoint_are_rejected() {
    let mut store = GraphStore::default();
    let a = node_at(&mut store, CATEGORY_TRIGGER, Vec3::ZERO);

    assert!(store.create_connection(a, a).is_none());
    assert!(store.create_connection(a, Uuid::new_v4()).is_none());
    assert!(store.connections().is_empty());
    assert_eq!(store.degree(a), 0);
}

#[test]
fn delete_cascades_connections_and_panel() {
    let mut store = GraphStore::default();
    let a = node_at(&mut store, "Trigger", Vec3::ZERO);
    let b = node_at(&mut store, "Feeling", Vec3::X);
    let c = node_at(&mut store, "Evidence", Vec3::Y);
    store.create_connection(a, b).unwrap();
    store.create_connection(a, c).unwrap();
    store.create_connection(b, c).unwrap();

    let removed = store.delete_node(a).unwrap();
    assert_eq!(removed.id, a);

    assert!(!store.contains_node(a));
    assert!(store.panel(a).is_none());
    assert_eq!(store.connections().len(), 1);
    assert!(store.connections().iter().all(|conn| !conn.touches(a)));
    assert_eq!(store.degree(b), 1);
    assert_eq!(store.degree(c), 1);
    assert_eq!(store.panels().count(), 2);

    assert!(store.delete_node(a).is_none());
    assert_eq!(store.nodes().len(), 2);
}

#[test]
fn positions_are_clamped_into_room_interior() {
    let mut store = GraphStore::default();
    let id = node_at(&mut store, "Theme", Vec3::new(100.0, -100.0, 3.0));
    assert_eq!(store.node(id).unwrap().position, Vec3::new(14.0, -9.0, 3.0));

    let applied = store.move_node(id, Vec3::new(50.0, 50.0, -50.0)).unwrap();
    assert_eq!(applied, Vec3::new(14.0, 9.0, -14.0));
    assert_eq!(store.node(id).unwrap().position, applied);
    assert!(store.room().contains(applied));
}

#[test]
fn custom_room_changes_clamp_limits() {
    let config = MindMapConfig::from_json_str(
        r#"{ "room": { "width": 10.0, "height": 10.0, "depth": 10.0, "margin": 0.0 } }"#,
    )
    .unwrap();
    let mut store = GraphStore::new(Default::default(), &config);
    let id = node_at(&mut store, "Theme", Vec3::splat(20.0));
    assert_eq!(store.node(id).unwrap().position, Vec3::splat(5.0));
}

#[test]
fn unknown_category_uses_default_archetype_and_is_kept() {
    let mut store = GraphStore::default();
    let id = node_at(&mut store, "NonexistentCategory", Vec3::ZERO);

    let node = store.node(id).unwrap();
    assert_eq!(node.archetype, DEFAULT_ARCHETYPE);
    assert_eq!(node.category, "NonexistentCategory");
    assert_eq!(store.categories(), vec!["NonexistentCategory".to_string()]);
}

#[test]
fn category_change_keeps_identity_and_content() {
    let mut store = GraphStore::default();
    let id = store.create_node(
        NewNode::new("Trigger", Placement::At(Vec3::ZERO))
            .with_title("Deadline")
            .with_notes("boss email"),
    );
    let before = store.node(id).unwrap().clone();
    let other = node_at(&mut store, "Theme", Vec3::X);
    store.create_connection(id, other).unwrap();

    store.update_node(id, NodeUpdate::category("Feeling")).unwrap();

    let after = store.node(id).unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.title, "Deadline");
    assert_eq!(after.notes, "boss email");
    assert_eq!(after.date_added, before.date_added);
    assert_eq!(after.position, before.position);
    assert_eq!(after.archetype.shape, ShapeKind::Icosahedron);
    assert_eq!(store.degree(id), 1);
}

#[test]
fn notes_edit_sets_last_edited_and_refreshes_panel() {
    let mut store = GraphStore::default();
    let id = node_at(&mut store, "Questions", Vec3::ZERO);
    assert_eq!(store.node(id).unwrap().last_edited, None);
    assert_eq!(store.panel(id).unwrap().last_edited, None);

    store.update_node(id, NodeUpdate::notes("why now?")).unwrap();

    let node = store.node(id).unwrap();
    assert!(node.last_edited.is_some());
    assert!(node.last_edited.unwrap() >= node.date_added);
    let panel = store.panel(id).unwrap();
    assert_eq!(panel.notes, "why now?");
    assert_eq!(panel.date_added, node.date_added);
    assert_eq!(panel.last_edited, node.last_edited);
}

#[test]
fn empty_title_displays_as_untitled() {
    let mut store = GraphStore::default();
    let id = node_at(&mut store, "Solutions", Vec3::ZERO);
    assert_eq!(store.node(id).unwrap().display_title(), "Untitled");
    assert_eq!(store.panel(id).unwrap().title, "Untitled");
}

#[test]
fn operations_on_unknown_ids_are_reported_or_ignored() {
    let mut store = GraphStore::default();
    let ghost = Uuid::new_v4();

    assert_eq!(
        store.update_node(ghost, NodeUpdate::notes("x")),
        Err(StoreError::NodeNotFound(ghost))
    );
    assert_eq!(
        store.move_node(ghost, Vec3::ZERO),
        Err(StoreError::NodeNotFound(ghost))
    );
    assert!(!store.set_highlight(ghost, true));
    assert!(!store.set_panel_visible(ghost, true));
    assert!(store.pending_changes().is_empty());
}

#[test]
fn journal_records_changes_in_order() {
    let mut store = GraphStore::default();
    let a = node_at(&mut store, "Trigger", Vec3::ZERO);
    let b = node_at(&mut store, "Theme", Vec3::X);
    let key = store.create_connection(a, b).unwrap();
    store.delete_node(b);

    let changes = store.drain_changes();
    assert!(matches!(changes[0], SceneChange::NodeAdded { id, .. } if id == a));
    assert!(matches!(changes[1], SceneChange::NodeAdded { id, .. } if id == b));
    assert_eq!(changes[2], SceneChange::ConnectionAdded { key });
    assert_eq!(changes[3], SceneChange::ConnectionRemoved { key });
    assert_eq!(changes[4], SceneChange::NodeRemoved { id: b });
    assert_eq!(changes.len(), 5);
    assert!(store.pending_changes().is_empty());
}

#[test]
fn clear_removes_everything() {
    let mut store = GraphStore::default();
    let a = node_at(&mut store, "Trigger", Vec3::ZERO);
    let b = node_at(&mut store, "Theme", Vec3::X);
    store.create_connection(a, b);

    store.clear();

    assert!(store.nodes().is_empty());
    assert!(store.connections().is_empty());
    assert_eq!(store.panels().count(), 0);
    assert!(!store.contains_node(a));
    assert!(!store.has_connection(a, b));
}
