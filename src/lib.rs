//! Core library for docscriber, a layered ink annotation engine.
//!
//! Hosts embed [`canvas::Canvas`] over a decoded document page, feed it
//! pointer and wheel events, and composite its output surface to the screen.
//! The remaining modules supply the supporting pieces: stroke and page
//! models, viewport math, region capture, configuration, and session
//! persistence.

pub mod canvas;
pub mod capture;
pub mod config;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod session;

pub use canvas::{Canvas, CanvasEvent, Gesture};
pub use config::Config;
pub use geometry::{DocRect, Viewport};
