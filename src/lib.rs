//! Library exports for sketchboard.
//!
//! Exposes the drawing surface, the interaction controller and the export
//! pipeline so embedders can drive them with their own event source and
//! export sink, alongside the configuration types the binary uses.

pub mod app;
pub mod capture;
pub mod config;
pub mod draw;
pub mod input;
pub mod util;

pub use config::Config;
