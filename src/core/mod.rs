pub mod clock;
pub mod controller;
pub mod input_adapter;
pub mod message_log;

pub use clock::{FixedStep, FpsCounter, FrameClock, FrameTiming};
pub use controller::{Action, Controller, InputState};
pub use input_adapter::KeyboardController;
pub use message_log::{LogEntry, MessageLog, Severity};
