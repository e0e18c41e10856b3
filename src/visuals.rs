//! Distance-based node emphasis: nearby nodes are drawn brighter and larger.

use glam::Vec3;

use crate::node::{Node, NodeVisual};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualSettings {
    pub hue: f32,
    pub saturation: f32,
    pub min_lightness: f32,
    /// Distance over which lightness falls by 1.0
    pub lightness_falloff: f32,
    pub max_scale: f32,
    pub min_scale: f32,
    /// Distance over which scale falls by 1.0
    pub scale_falloff: f32,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            hue: 0.6,
            saturation: 1.0,
            min_lightness: 0.3,
            lightness_falloff: 100.0,
            max_scale: 3.0,
            min_scale: 0.5,
            scale_falloff: 50.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DistanceVisualAdapter {
    settings: VisualSettings,
}

impl DistanceVisualAdapter {
    pub fn new(settings: VisualSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &VisualSettings {
        &self.settings
    }

    /// max(min, 1 - d / falloff), never above 1.0
    pub fn lightness_at(&self, distance: f32) -> f32 {
        let s = &self.settings;
        (1.0 - distance / s.lightness_falloff).clamp(s.min_lightness, 1.0)
    }

    /// max(min, max_scale - d / falloff), never above max_scale
    pub fn scale_at(&self, distance: f32) -> f32 {
        let s = &self.settings;
        (s.max_scale - distance / s.scale_falloff).clamp(s.min_scale, s.max_scale)
    }

    pub fn visual_at(&self, distance: f32) -> NodeVisual {
        NodeVisual {
            hue: self.settings.hue,
            saturation: self.settings.saturation,
            lightness: self.lightness_at(distance),
            scale: self.scale_at(distance),
        }
    }

    /// Recompute every node's visual from its distance to `camera_position`
    pub fn update(&self, camera_position: Vec3, nodes: &mut [Node]) {
        for node in nodes.iter_mut() {
            let distance = camera_position.distance(node.position());
            node.visual = self.visual_at(distance);
        }
    }
}
