use anyhow::{bail, Context, Result};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Half extent of the cube unplaced nodes are scattered in
pub const SCATTER_HALF_EXTENT: f32 = 50.0;

/// Node ids may be written as strings or numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(s) => f.write_str(s),
            RawId::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: RawId,
    #[serde(default)]
    position: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
struct RawScene {
    nodes: Vec<RawNode>,
}

/// One node as supplied by the data source, position resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSeed {
    pub id: String,
    pub position: Vec3,
}

/// Load and validate a scene document from disk
pub fn load_scene_file(path: impl AsRef<Path>, seed: u64) -> Result<Vec<NodeSeed>> {
    let path = path.as_ref();
    log::info!("Loading scene data: {:?}", path);

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene data {:?}", path))?;

    parse_scene(&text, seed).with_context(|| format!("Invalid scene data in {:?}", path))
}

/// Parse a `{ "nodes": [{ "id": .., "position": [x, y, z] }] }` document.
/// Nodes without a position are scattered in a cube around the origin
/// using a seeded RNG, in document order.
pub fn parse_scene(text: &str, seed: u64) -> Result<Vec<NodeSeed>> {
    let raw: RawScene = serde_json::from_str(text).context("Failed to parse scene JSON")?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut scattered = 0usize;

    let seeds: Vec<NodeSeed> = raw
        .nodes
        .into_iter()
        .map(|node| {
            let position = match node.position {
                Some(p) => Vec3::from_array(p),
                None => {
                    scattered += 1;
                    scatter(&mut rng)
                }
            };
            NodeSeed {
                id: node.id.to_string(),
                position,
            }
        })
        .collect();

    validate_seeds(&seeds)?;

    log::debug!(
        "Parsed {} nodes ({} scattered, seed {})",
        seeds.len(),
        scattered,
        seed
    );
    Ok(seeds)
}

/// A node set a session can start from: non-empty, unique ids,
/// finite positions
pub fn validate_seeds(seeds: &[NodeSeed]) -> Result<()> {
    if seeds.is_empty() {
        bail!("Scene contains no nodes");
    }

    let mut seen = HashSet::with_capacity(seeds.len());
    for seed in seeds {
        if !seen.insert(seed.id.as_str()) {
            bail!("Duplicate node id {:?}", seed.id);
        }
        if !seed.position.is_finite() {
            bail!("Node {:?} has a non-finite position", seed.id);
        }
    }
    Ok(())
}

fn scatter(rng: &mut StdRng) -> Vec3 {
    let h = SCATTER_HALF_EXTENT;
    Vec3::new(
        rng.gen_range(-h..h),
        rng.gen_range(-h..h),
        rng.gen_range(-h..h),
    )
}
