use anyhow::{bail, Result};
use glam::Vec3;
use std::collections::HashMap;

use crate::camera::CameraState;
use crate::core::{Controller, MessageLog};
use crate::loaders::{validate_seeds, NodeSeed};
use crate::navigation::{NavigationController, NavigationSettings};
use crate::node::Node;
use crate::visuals::{DistanceVisualAdapter, VisualSettings};

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub start: Vec3,
    pub navigation: NavigationSettings,
    pub visuals: VisualSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start: crate::camera::DEFAULT_START,
            navigation: NavigationSettings::default(),
            visuals: VisualSettings::default(),
        }
    }
}

/// One navigation session over a fixed node set.
///
/// Each [`step`](Session::step) moves the camera first, then restyles the
/// nodes from the new camera position.
#[derive(Debug)]
pub struct Session {
    navigation: NavigationController,
    adapter: DistanceVisualAdapter,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    steps: u64,
    log: MessageLog,
}

impl Session {
    /// Refuses to start without nodes, with duplicate ids or with
    /// non-finite positions
    pub fn new(seeds: Vec<NodeSeed>, config: SessionConfig) -> Result<Self> {
        Self::with_log(seeds, config, MessageLog::default())
    }

    /// Like [`Session::new`], keeping messages logged before the session existed
    pub fn with_log(seeds: Vec<NodeSeed>, config: SessionConfig, mut log: MessageLog) -> Result<Self> {
        if seeds.is_empty() {
            log.error("No node data supplied, not starting");
            bail!("Cannot start a session without nodes");
        }
        if let Err(e) = validate_seeds(&seeds) {
            log.error(format!("Invalid node data, not starting: {}", e));
            return Err(e.context("Cannot start a session with invalid nodes"));
        }

        let navigation = NavigationController::with_settings(config.start, config.navigation);
        let adapter = DistanceVisualAdapter::new(config.visuals);
        let camera_position = navigation.state().position;

        let mut nodes: Vec<Node> = seeds
            .into_iter()
            .map(|seed| Node::new(seed.id, seed.position, adapter.visual_at(0.0)))
            .collect();
        adapter.update(camera_position, &mut nodes);

        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id().to_string(), i))
            .collect();

        log.info(format!("{} nodes added to the scene", nodes.len()));

        Ok(Self {
            navigation,
            adapter,
            nodes,
            index,
            steps: 0,
            log,
        })
    }

    /// Advance one navigation step and refresh node visuals
    pub fn step(&mut self, input: &dyn Controller) {
        self.navigation.update(input);
        self.adapter.update(self.navigation.state().position, &mut self.nodes);
        self.steps += 1;
    }

    /// Run `count` steps with the same held flags
    pub fn run(&mut self, input: &dyn Controller, count: u32) {
        for _ in 0..count {
            self.step(input);
        }
    }

    pub fn camera(&self) -> &CameraState {
        self.navigation.state()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Node closest to the camera with its distance
    pub fn nearest_node(&self) -> Option<(&Node, f32)> {
        let camera = self.camera().position;
        self.nodes
            .iter()
            .map(|node| (node, camera.distance(node.position())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }
}
