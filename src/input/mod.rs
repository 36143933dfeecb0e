//! Input handling and the interaction state machine.
//!
//! This module turns pointer and tool menu events into either freehand
//! drawing or a region selection. The controller decides which, tracks the
//! selection rectangle, and queues exports when a selection is confirmed.

pub mod events;
pub mod selection;
pub mod state;
pub mod tool;

pub use events::{InputEvent, ParseEventError};
pub use selection::{SelectionError, SelectionState, SelectionTracker};
pub use state::{ControllerSettings, InteractionController, InteractionMode};
pub use tool::ToolAction;
