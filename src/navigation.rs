//! Damped yaw/pitch rotation and forward/backward flight.
//!
//! All constants are per navigation step. The host calls
//! [`NavigationController::update`] once per fixed step.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use crate::camera::CameraState;
use crate::core::{Action, Controller};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    /// Added to angular velocity per step while a rotate flag is held
    pub rotation_acceleration: f32,
    /// Angular velocity multiplier applied every step
    pub rotation_damping: f32,
    /// Linear velocity assigned while forward/backward is held
    pub linear_speed: f32,
    /// Linear velocity multiplier applied every step
    pub linear_damping: f32,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            rotation_acceleration: 0.001,
            rotation_damping: 0.95,
            linear_speed: 0.3,
            linear_damping: 0.98,
        }
    }
}

impl NavigationSettings {
    /// Yaw or pitch rate reached while a rotate flag stays held
    pub fn steady_angular_rate(&self) -> f32 {
        self.rotation_acceleration * self.rotation_damping / (1.0 - self.rotation_damping)
    }
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    state: CameraState,
    settings: NavigationSettings,
}

impl NavigationController {
    pub fn new(start: Vec3) -> Self {
        Self::with_settings(start, NavigationSettings::default())
    }

    pub fn with_settings(start: Vec3, settings: NavigationSettings) -> Self {
        Self {
            state: CameraState::at(start),
            settings,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Back to rest at `start`
    pub fn reset(&mut self, start: Vec3) {
        self.state = CameraState::at(start);
    }

    /// Advance one step with the currently held flags
    pub fn update(&mut self, input: &dyn Controller) {
        self.apply_rotation(input);
        self.apply_translation(input);
    }

    fn apply_rotation(&mut self, input: &dyn Controller) {
        let s = &self.settings;
        let state = &mut self.state;

        if input.is_down(Action::RotateLeft) {
            state.yaw_velocity += s.rotation_acceleration;
        }
        if input.is_down(Action::RotateRight) {
            state.yaw_velocity -= s.rotation_acceleration;
        }
        if input.is_down(Action::RotateUp) {
            state.pitch_velocity += s.rotation_acceleration;
        }
        if input.is_down(Action::RotateDown) {
            state.pitch_velocity -= s.rotation_acceleration;
        }

        state.yaw_velocity *= s.rotation_damping;
        state.pitch_velocity *= s.rotation_damping;

        state.yaw += state.yaw_velocity;
        // pitch_velocity is left untouched while pitch is pinned at a limit
        state.pitch = (state.pitch + state.pitch_velocity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    fn apply_translation(&mut self, input: &dyn Controller) {
        let s = &self.settings;

        // Assigned, not accumulated. Backward is applied last and wins.
        if input.is_down(Action::Forward) {
            self.state.linear_velocity = s.linear_speed;
        }
        if input.is_down(Action::Backward) {
            self.state.linear_velocity = -s.linear_speed;
        }
        self.state.linear_velocity *= s.linear_damping;

        let forward = self.state.forward();
        self.state.position += forward * self.state.linear_velocity;
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(crate::camera::DEFAULT_START)
    }
}
