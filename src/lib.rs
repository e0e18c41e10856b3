pub mod camera;
pub mod cli;
pub mod core;
pub mod headless;
pub mod loaders;
pub mod math;
pub mod navigation;
pub mod node;
pub mod renderer;
pub mod session;
pub mod types;
pub mod visuals;

pub use camera::CameraState;
pub use crate::core::{Action, Controller, InputState};
pub use navigation::{NavigationController, NavigationSettings};
pub use node::{Node, NodeVisual};
pub use session::{Session, SessionConfig};
pub use visuals::{DistanceVisualAdapter, VisualSettings};
