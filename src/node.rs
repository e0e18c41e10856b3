use glam::Vec3;

use crate::math::hsl_to_rgb;
use crate::types::NodeInstance;

/// Distance-derived appearance of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVisual {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub scale: f32,
}

impl NodeVisual {
    pub fn color(&self) -> [f32; 3] {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}

/// A point-cloud entity. Position is fixed at creation, only the visual
/// descriptor changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    position: Vec3,
    pub visual: NodeVisual,
}

impl Node {
    pub fn new(id: impl Into<String>, position: Vec3, visual: NodeVisual) -> Self {
        Self {
            id: id.into(),
            position,
            visual,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn to_instance(&self) -> NodeInstance {
        NodeInstance {
            center: self.position.to_array(),
            scale: self.visual.scale,
            color: self.visual.color(),
            _pad: 0.0,
        }
    }
}
