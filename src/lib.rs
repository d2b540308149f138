//! curve-rs: real-time parametric curve plotting engine.
//!
//! A registry of named scalar functions is paired into `(x(t), y(t))`
//! curves, sampled over a configurable parameter window, mapped into a unit
//! viewport and handed to a renderer as backend-agnostic line primitives.
//! Recorded selections are replayed underneath the live curve.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{PlotEngine, PlotEngineConfig};
pub use error::{PlotError, PlotResult};
