//! Pointer event model and tool vocabulary.
//!
//! This module defines the host-facing input types: the closed set of drawing
//! tools and the pointer/wheel event structs hosts translate their native
//! events into. The gesture state machine that consumes them lives in
//! [`crate::canvas`].

pub mod events;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{PointerButton, PointerEvent, PointerKind, WheelEvent};
pub use tool::Tool;
