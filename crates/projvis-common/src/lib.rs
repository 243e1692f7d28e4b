//! Common types and utilities shared across all proj-vis crates and services.

pub mod bbox;
pub mod catalog;
pub mod color;
pub mod coord;
pub mod domain;
pub mod error;
pub mod grid;
pub mod wire;

pub use bbox::BoundingBox;
pub use catalog::{find_example, projection_examples, ProjectionExample};
pub use color::{pixel_for_lonlat, ColorSource, Rgba, UniformColor, TRANSPARENT};
pub use coord::{Coordinate, ProjectedPoint};
pub use domain::{SamplingDomain, MIN_STEP, SCALE};
pub use error::{ProjVisError, ProjVisResult};
pub use grid::{generate_grid, Batch, GridBatches, DEFAULT_BATCH_LIMIT};
pub use wire::{BatchParams, PointParams};
