use glam::Vec3;
use node_navigator::core::MessageLog;
use node_navigator::headless::run_headless;
use node_navigator::loaders::NodeSeed;
use node_navigator::{Action, DistanceVisualAdapter, InputState, Session, SessionConfig};

fn seed(id: &str, position: Vec3) -> NodeSeed {
    NodeSeed {
        id: id.to_string(),
        position,
    }
}

fn line_of_nodes() -> Vec<NodeSeed> {
    // Along -Z in front of the default start (0, 0, 50)
    vec![
        seed("origin", Vec3::ZERO),
        seed("mid", Vec3::new(0.0, 0.0, 25.0)),
        seed("close", Vec3::new(0.0, 0.0, 45.0)),
        seed("behind", Vec3::new(0.0, 0.0, 120.0)),
    ]
}

#[test]
fn test_refuses_to_start_without_nodes() {
    let result = Session::new(Vec::new(), SessionConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_visuals_ready_before_first_step() {
    let session = Session::new(line_of_nodes(), SessionConfig::default()).unwrap();
    let close = session.node("close").unwrap();

    // 5 units away
    assert!((close.visual.lightness - 0.95).abs() < 1e-6);
    assert!((close.visual.scale - 2.9).abs() < 1e-6);
    assert_eq!(session.steps(), 0);
}

#[test]
fn test_visuals_follow_post_move_camera() {
    let mut session = Session::new(line_of_nodes(), SessionConfig::default()).unwrap();
    let adapter = DistanceVisualAdapter::default();

    session.step(&InputState::holding(&[Action::Forward]));

    let camera = session.camera().position;
    assert!(camera.z < 50.0);
    for node in session.nodes() {
        let expected = adapter.visual_at(camera.distance(node.position()));
        assert_eq!(node.visual, expected, "node {} is stale", node.id());
    }
}

#[test]
fn test_flying_forward_brightens_nodes_ahead() {
    let mut session = Session::new(line_of_nodes(), SessionConfig::default()).unwrap();
    let before = session.node("origin").unwrap().visual;
    let behind_before = session.node("behind").unwrap().visual;

    session.run(&InputState::holding(&[Action::Forward]), 60);

    let after = session.node("origin").unwrap().visual;
    let behind_after = session.node("behind").unwrap().visual;
    assert!(after.lightness > before.lightness);
    assert!(after.scale > before.scale);
    assert!(behind_after.scale <= behind_before.scale);
    assert_eq!(session.steps(), 60);
}

#[test]
fn test_node_lookup_by_id() {
    let session = Session::new(line_of_nodes(), SessionConfig::default()).unwrap();

    assert_eq!(session.node("mid").unwrap().position(), Vec3::new(0.0, 0.0, 25.0));
    assert!(session.node("missing").is_none());
    assert_eq!(session.nodes().len(), 4);
    // Document order is preserved
    assert_eq!(session.nodes()[0].id(), "origin");
}

#[test]
fn test_nearest_node() {
    let session = Session::new(line_of_nodes(), SessionConfig::default()).unwrap();
    let (node, distance) = session.nearest_node().unwrap();

    assert_eq!(node.id(), "close");
    assert!((distance - 5.0).abs() < 1e-6);
}

#[test]
fn test_custom_start_position() {
    let config = SessionConfig {
        start: Vec3::new(0.0, 0.0, 25.0),
        ..SessionConfig::default()
    };
    let session = Session::new(line_of_nodes(), config).unwrap();

    assert_eq!(session.camera().position, Vec3::new(0.0, 0.0, 25.0));
    assert_eq!(session.node("mid").unwrap().visual.lightness, 1.0);
}

#[test]
fn test_session_logs_startup() {
    let mut log = MessageLog::default();
    log.info("data parsed");
    let session = Session::with_log(line_of_nodes(), SessionConfig::default(), log).unwrap();

    let texts: Vec<_> = session.log().entries().map(|e| e.text.clone()).collect();
    assert_eq!(texts, vec!["data parsed", "4 nodes added to the scene"]);
}

#[test]
fn test_headless_report() {
    let mut session = Session::new(line_of_nodes(), SessionConfig::default()).unwrap();
    let report = run_headless(&mut session, &[Action::Forward], 30);

    assert_eq!(report.steps, 30);
    assert_eq!(report.held, vec![Action::Forward]);
    assert_eq!(report.camera, *session.camera());

    let nearest = report.nearest.as_ref().unwrap();
    assert_eq!(nearest.id, "close");
    assert!(nearest.distance < 5.0);

    let lightness = report.lightness.unwrap();
    assert!(lightness.min >= 0.3 && lightness.max <= 1.0);
    let scale = report.scale.unwrap();
    assert!(scale.min >= 0.5 && scale.max <= 3.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["held"][0], "forward");
    assert_eq!(json["steps"], 30);
}

#[test]
fn test_refuses_non_finite_position() {
    let seeds = vec![
        seed("ok", Vec3::ZERO),
        seed("bad", Vec3::new(f32::NAN, 0.0, 0.0)),
    ];
    let err = Session::new(seeds, SessionConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("non-finite position"));

    let infinite = vec![seed("inf", Vec3::new(0.0, f32::INFINITY, 0.0))];
    assert!(Session::new(infinite, SessionConfig::default()).is_err());
}

#[test]
fn test_refuses_duplicate_ids() {
    let seeds = vec![
        seed("a", Vec3::ZERO),
        seed("a", Vec3::new(1.0, 0.0, 0.0)),
    ];
    let err = Session::new(seeds, SessionConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Duplicate node id"));
}

#[test]
fn test_visuals_stay_in_range_for_accepted_nodes() {
    let mut session = Session::new(line_of_nodes(), SessionConfig::default()).unwrap();
    session.run(&InputState::holding(&[Action::Forward, Action::RotateUp]), 200);

    for node in session.nodes() {
        assert!((0.3..=1.0).contains(&node.visual.lightness), "node {}", node.id());
        assert!((0.5..=3.0).contains(&node.visual.scale), "node {}", node.id());
    }
}
