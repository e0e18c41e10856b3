use serde::{Deserialize, Serialize};

/// Navigation action a flag can be held for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    RotateUp,
    RotateDown,
    RotateLeft,
    RotateRight,
    Forward,
    Backward,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::RotateUp,
        Action::RotateDown,
        Action::RotateLeft,
        Action::RotateRight,
        Action::Forward,
        Action::Backward,
    ];

    /// Short label used by the on-screen buttons
    pub fn label(self) -> &'static str {
        match self {
            Action::RotateUp => "Up",
            Action::RotateDown => "Down",
            Action::RotateLeft => "Left",
            Action::RotateRight => "Right",
            Action::Forward => "Forward",
            Action::Backward => "Backward",
        }
    }
}

/// Controller - answers whether an action is currently held
pub trait Controller {
    /// Check if action is currently held
    fn is_down(&self, action: Action) -> bool;
}

/// Six independent hold flags. Opposing flags may both be set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub rotate_up: bool,
    pub rotate_down: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl InputState {
    /// State with every listed action held
    pub fn holding(actions: &[Action]) -> Self {
        let mut state = Self::default();
        for &action in actions {
            state.set(action, true);
        }
        state
    }

    pub fn set(&mut self, action: Action, held: bool) {
        *self.flag_mut(action) = held;
    }

    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        Action::ALL.iter().any(|&a| self.is_down(a))
    }

    /// Flags held in either state
    pub fn merged(&self, other: &InputState) -> InputState {
        let mut out = *self;
        for action in Action::ALL {
            if other.is_down(action) {
                out.press(action);
            }
        }
        out
    }

    fn flag_mut(&mut self, action: Action) -> &mut bool {
        match action {
            Action::RotateUp => &mut self.rotate_up,
            Action::RotateDown => &mut self.rotate_down,
            Action::RotateLeft => &mut self.rotate_left,
            Action::RotateRight => &mut self.rotate_right,
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
        }
    }
}

impl Controller for InputState {
    fn is_down(&self, action: Action) -> bool {
        match action {
            Action::RotateUp => self.rotate_up,
            Action::RotateDown => self.rotate_down,
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::Forward => self.forward,
            Action::Backward => self.backward,
        }
    }
}
