use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Action, Controller, InputState};

/// Adapter that turns winit keyboard events into navigation flags
#[derive(Debug, Clone, Default)]
pub struct KeyboardController {
    state: InputState,
}

impl KeyboardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit WindowEvent, returns true if it changed a flag.
    ///
    /// `ui_consumed` marks events the overlay already handled: presses are
    /// dropped, releases still clear their flag so no key stays held.
    pub fn process_event(&mut self, event: &WindowEvent, ui_consumed: bool) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return false;
                }
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    return self.apply_key_event(keycode, event.state, ui_consumed);
                }
                false
            }
            // Releases are lost while unfocused, so drop everything
            WindowEvent::Focused(false) => {
                self.state.clear();
                true
            }
            _ => false,
        }
    }

    /// Apply a key transition directly
    pub fn apply_key(&mut self, keycode: KeyCode, state: ElementState) -> bool {
        match Self::keycode_to_action(keycode) {
            Some(action) => {
                self.state.set(action, state.is_pressed());
                true
            }
            None => false,
        }
    }

    /// Apply a key transition that the overlay may have consumed
    pub fn apply_key_event(&mut self, keycode: KeyCode, state: ElementState, ui_consumed: bool) -> bool {
        if ui_consumed && state.is_pressed() {
            return false;
        }
        self.apply_key(keycode, state)
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    fn keycode_to_action(keycode: KeyCode) -> Option<Action> {
        match keycode {
            KeyCode::ArrowUp => Some(Action::RotateUp),
            KeyCode::ArrowDown => Some(Action::RotateDown),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Action::RotateLeft),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Action::RotateRight),
            KeyCode::KeyW => Some(Action::Forward),
            KeyCode::KeyS => Some(Action::Backward),
            _ => None,
        }
    }
}

impl Controller for KeyboardController {
    fn is_down(&self, action: Action) -> bool {
        self.state.is_down(action)
    }
}
