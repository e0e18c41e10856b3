use glam::Vec3;
use node_navigator::{DistanceVisualAdapter, Node, VisualSettings};

fn node_at(id: &str, position: Vec3) -> Node {
    let adapter = DistanceVisualAdapter::default();
    Node::new(id, position, adapter.visual_at(f32::MAX))
}

#[test]
fn test_matches_clamped_linear_falloff() {
    let adapter = DistanceVisualAdapter::default();

    for step in 0..=400 {
        let d = step as f32 * 0.5;
        let lightness = adapter.lightness_at(d);
        let scale = adapter.scale_at(d);

        assert!((lightness - (1.0 - d / 100.0).clamp(0.3, 1.0)).abs() < 1e-6, "d = {}", d);
        assert!((scale - (3.0 - d / 50.0).clamp(0.5, 3.0)).abs() < 1e-6, "d = {}", d);
        assert!((0.3..=1.0).contains(&lightness));
        assert!((0.5..=3.0).contains(&scale));
    }
}

#[test]
fn test_node_at_camera_is_brightest_and_largest() {
    let adapter = DistanceVisualAdapter::default();
    let mut nodes = vec![node_at("a", Vec3::ZERO)];

    adapter.update(Vec3::ZERO, &mut nodes);

    assert_eq!(nodes[0].visual.lightness, 1.0);
    assert_eq!(nodes[0].visual.scale, 3.0);
}

#[test]
fn test_distant_node_is_floored() {
    let adapter = DistanceVisualAdapter::default();
    let mut nodes = vec![node_at("far", Vec3::new(0.0, 200.0, 0.0))];

    adapter.update(Vec3::ZERO, &mut nodes);

    assert_eq!(nodes[0].visual.lightness, 0.3);
    assert_eq!(nodes[0].visual.scale, 0.5);
}

#[test]
fn test_uses_euclidean_distance() {
    let adapter = DistanceVisualAdapter::default();
    // 3-4-5 triangle scaled to distance 50
    let mut nodes = vec![node_at("n", Vec3::new(30.0, 40.0, 0.0))];

    adapter.update(Vec3::ZERO, &mut nodes);

    assert!((nodes[0].visual.lightness - 0.5).abs() < 1e-6);
    assert!((nodes[0].visual.scale - 2.0).abs() < 1e-6);
}

#[test]
fn test_hue_is_fixed() {
    let adapter = DistanceVisualAdapter::default();
    let mut nodes = vec![
        node_at("near", Vec3::new(1.0, 0.0, 0.0)),
        node_at("far", Vec3::new(500.0, 0.0, 0.0)),
    ];

    adapter.update(Vec3::ZERO, &mut nodes);

    assert_eq!(nodes[0].visual.hue, 0.6);
    assert_eq!(nodes[1].visual.hue, 0.6);
    assert!(nodes[0].visual.lightness > nodes[1].visual.lightness);
}

#[test]
fn test_nodes_are_independent() {
    let adapter = DistanceVisualAdapter::default();
    let camera = Vec3::new(5.0, -3.0, 20.0);
    let positions = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 10.0, 10.0),
        Vec3::new(-40.0, 2.0, 60.0),
    ];

    let mut together: Vec<Node> = positions
        .iter()
        .enumerate()
        .map(|(i, &p)| node_at(&i.to_string(), p))
        .collect();
    adapter.update(camera, &mut together);

    for (i, &p) in positions.iter().enumerate() {
        let mut alone = vec![node_at(&i.to_string(), p)];
        adapter.update(camera, &mut alone);
        assert_eq!(alone[0], together[i]);
    }
}

#[test]
fn test_update_keeps_position_and_id() {
    let adapter = DistanceVisualAdapter::default();
    let mut nodes = vec![node_at("keep", Vec3::new(1.0, 2.0, 3.0))];

    adapter.update(Vec3::new(9.0, 9.0, 9.0), &mut nodes);

    assert_eq!(nodes[0].id(), "keep");
    assert_eq!(nodes[0].position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_node_color_darkens_with_distance() {
    let adapter = DistanceVisualAdapter::default();
    let near = adapter.visual_at(0.0).color();
    let far = adapter.visual_at(100.0).color();

    // Full lightness is white, floored lightness is a dark blue
    assert!(near.iter().all(|c| (c - 1.0).abs() < 1e-5));
    assert!(far[2] > far[0] && far[2] > far[1]);
    assert!(far.iter().sum::<f32>() < near.iter().sum::<f32>());
}

#[test]
fn test_custom_falloff() {
    let adapter = DistanceVisualAdapter::new(VisualSettings {
        lightness_falloff: 10.0,
        scale_falloff: 10.0,
        ..VisualSettings::default()
    });
    assert!((adapter.lightness_at(5.0) - 0.5).abs() < 1e-6);
    assert!((adapter.scale_at(5.0) - 2.5).abs() < 1e-6);
    assert_eq!(adapter.settings().min_scale, 0.5);
}
