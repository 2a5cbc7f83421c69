use glam::{Vec2, Vec3};
use mindmap_core::{
    CameraPose, CategoryFilter, GraphStore, InteractionOutcome, MindMapSession, NodeId,
    PanelContent, PinholeCamera, PointerButton, PointerEvent, SceneChange, SceneRenderer,
};

#[derive(Default)]
struct RecordingRenderer {
    added: Vec<NodeId>,
    removed: Vec<NodeId>,
    connections: usize,
    highlighted: Vec<(NodeId, bool)>,
}

impl SceneRenderer for RecordingRenderer {
    fn apply_change(&mut self, _store: &GraphStore, change: &SceneChange) {
        match change {
            SceneChange::NodeAdded { id, .. } => self.added.push(*id),
            SceneChange::NodeRemoved { id } => self.removed.push(*id),
            SceneChange::ConnectionAdded { .. } => self.connections += 1,
            SceneChange::ConnectionRemoved { .. } => self.connections -= 1,
            SceneChange::NodeHighlighted { id, highlighted } => {
                self.highlighted.push((*id, *highlighted))
            }
            _ => {}
        }
    }
}

fn start_pose() -> CameraPose {
    CameraPose::new(Vec3::new(0.0, 5.0, 14.0), -Vec3::new(0.0, 5.0, 14.0))
}

fn click(
    session: &mut MindMapSession,
    camera: &PinholeCamera,
    target: Option<NodeId>,
) -> InteractionOutcome {
    let picker = move |_: Vec2| target;
    session.pointer_pressed(
        camera,
        &picker,
        PointerEvent::new(PointerButton::Primary, Vec2::new(0.0, 0.0)),
    )
}

#[test]
fn add_node_requires_selected_category() {
    let mut session = MindMapSession::default();
    assert_eq!(session.add_node("ignored", start_pose()), None);
    assert!(session.store().nodes().is_empty());

    session.select_category("Trigger");
    let id = session.add_node("  Deadline  ", start_pose()).unwrap();

    let node = session.store().node(id).unwrap();
    assert_eq!(node.category, "Trigger");
    assert_eq!(node.title, "Deadline");
    assert!(session.store().room().contains(node.position));

    session.select_category("   ");
    assert_eq!(session.selected_category(), None);
}

#[test]
fn preview_filter_reindexes_connections() {
    let mut session = MindMapSession::default();
    let t1 = session.add_node_at("Trigger", Vec3::ZERO, "t1");
    let f1 = session.add_node_at("Feeling", Vec3::X, "f1");
    let t2 = session.add_node_at("Trigger", Vec3::Y, "t2");

    session.set_connect_mode(true);
    let camera = PinholeCamera::start_position(Vec2::new(800.0, 600.0));
    click(&mut session, &camera, Some(t1));
    click(&mut session, &camera, Some(f1));
    click(&mut session, &camera, Some(t1));
    click(&mut session, &camera, Some(t2));
    assert_eq!(session.store().connections().len(), 2);

    session.set_category_filter(CategoryFilter::from_selector("Trigger"));
    let preview = session.preview();
    let titles: Vec<_> = preview.nodes.iter().map(|node| node.title.as_str()).collect();
    assert_eq!(titles, vec!["t1", "t2"]);
    assert_eq!(preview.connections.len(), 1);
    assert_eq!(preview.connections[0].node_a_index, 0);
    assert_eq!(preview.connections[0].node_b_index, 1);

    let json: serde_json::Value = serde_json::from_str(&session.preview_json().unwrap()).unwrap();
    assert!(json["nodes"][0].get("position").is_none());

    session.set_category_filter(CategoryFilter::All);
    assert_eq!(session.preview().nodes.len(), 3);
    assert_eq!(session.preview().connections.len(), 2);
}

#[test]
fn filter_resets_when_category_leaves_the_graph() {
    let mut session = MindMapSession::default();
    let feeling = session.add_node_at("Feeling", Vec3::ZERO, "calm");
    session.add_node_at("Theme", Vec3::X, "work");

    session.set_category_filter(CategoryFilter::from_selector("Feeling"));
    assert_eq!(
        session.category_filter(),
        &CategoryFilter::Only("Feeling".to_string())
    );

    session.change_node_category(feeling, "Theme").unwrap();
    assert_eq!(session.category_filter(), &CategoryFilter::All);
    assert_eq!(session.categories(), vec!["Theme"]);

    session.set_category_filter(CategoryFilter::from_selector("Theme"));
    let theme = session.store().nodes()[0].id;
    let other = session.store().nodes()[1].id;
    assert!(session.delete_node(theme));
    assert_eq!(session.category_filter(), &CategoryFilter::Only("Theme".to_string()));
    assert!(session.delete_node(other));
    assert_eq!(session.category_filter(), &CategoryFilter::All);
    assert!(!session.delete_node(other));
}

#[test]
fn panel_placements_follow_visibility_and_show_all() {
    let mut session = MindMapSession::default();
    let camera = PinholeCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec2::new(800.0, 600.0));
    let a = session.add_node_at("Trigger", Vec3::ZERO, "a");
    session.add_node_at("Theme", Vec3::new(0.0, 0.0, 12.0), "behind camera");

    assert!(session.panel_placements(&camera).is_empty());

    assert!(session.toggle_show_all_panels());
    let placements = session.panel_placements(&camera);
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].node, a);
    assert_eq!(placements[0].content, PanelContent::TitleOnly);
    assert!((placements[0].left - 420.0).abs() < 1e-2);
    assert!((placements[0].top - 280.0).abs() < 1e-2);
    assert_eq!(placements[0].scale, 1.0);
    assert_eq!(placements[0].width, 200.0);
    assert_eq!(placements[0].font_size, 12.0);

    assert_eq!(click(&mut session, &camera, Some(a)), InteractionOutcome::PanelOpened(a));
    assert_eq!(session.panel_placements(&camera)[0].content, PanelContent::Full);

    assert!(!session.toggle_show_all_panels());
    assert_eq!(session.close_panel(a), InteractionOutcome::PanelClosed(a));
    assert!(session.panel_placements(&camera).is_empty());
}

#[test]
fn delete_during_connect_gesture_drops_pending_source() {
    let mut session = MindMapSession::default();
    let camera = PinholeCamera::start_position(Vec2::new(800.0, 600.0));
    let a = session.add_node_at("Trigger", Vec3::ZERO, "a");
    let b = session.add_node_at("Theme", Vec3::X, "b");

    session.set_connect_mode(true);
    click(&mut session, &camera, Some(a));
    assert!(session.delete_node(a));
    assert_eq!(session.interaction().pending_source(), None);

    assert_eq!(
        click(&mut session, &camera, Some(b)),
        InteractionOutcome::SourceSelected(b)
    );
}

#[test]
fn load_resets_transient_interaction_state() {
    let mut session = MindMapSession::default();
    let camera = PinholeCamera::start_position(Vec2::new(800.0, 600.0));
    let a = session.add_node_at("Trigger", Vec3::ZERO, "a");
    session.set_connect_mode(true);
    click(&mut session, &camera, Some(a));

    let saved = session.save_json().unwrap();
    session.load_json(&saved).unwrap();

    assert_eq!(session.interaction().pending_source(), None);
    assert!(session.connect_mode());
    assert!(session.store().nodes().iter().all(|node| !node.is_highlighted));
}

#[test]
fn flush_to_replays_journal_once() {
    let mut session = MindMapSession::default();
    let camera = PinholeCamera::start_position(Vec2::new(800.0, 600.0));
    let a = session.add_node_at("Trigger", Vec3::ZERO, "a");
    let b = session.add_node_at("Theme", Vec3::X, "b");
    session.set_connect_mode(true);
    click(&mut session, &camera, Some(a));
    click(&mut session, &camera, Some(b));
    session.delete_node(b);

    let mut renderer = RecordingRenderer::default();
    let applied = session.flush_to(&mut renderer);

    assert!(applied >= 6);
    assert_eq!(renderer.added, vec![a, b]);
    assert_eq!(renderer.removed, vec![b]);
    assert_eq!(renderer.connections, 0);
    assert_eq!(renderer.highlighted, vec![(a, true), (a, false)]);
    assert_eq!(session.flush_to(&mut renderer), 0);
}
