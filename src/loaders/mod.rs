pub mod scene_data;

pub use scene_data::{load_scene_file, parse_scene, validate_seeds, NodeSeed};
