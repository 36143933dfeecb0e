mod actions;
mod core;
mod mouse;
mod render;

pub use core::{ControllerSettings, InteractionController, InteractionMode};
