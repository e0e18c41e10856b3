mod color;

pub use color::{hsl_to_rgb, rgb_hex};
