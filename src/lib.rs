//! graph-rs: time-series graph widget engine.
//!
//! Resolves a named dataset from a registry, plans a calendar-aligned time
//! axis, scales points into a plot rectangle, and builds backend-agnostic
//! frames with hoverable point markers and annotation bands.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{GraphConfig, GraphEngine, Theme};
pub use error::{GraphError, GraphResult};
