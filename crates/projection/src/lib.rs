//! Coordinate transformations for PROJ-style projection definitions.
//!
//! Geographic coordinates are in degrees; a transformer built from a single
//! definition starts from WGS84 longitude/latitude. The math is delegated to `proj4rs`, a pure Rust port of proj4js.

pub mod error;
pub mod proj;
pub mod transform;

pub use error::{ProjectionError, Result};
pub use proj::{is_geographic_definition, ProjTransformer, WGS84_LONGLAT};
pub use transform::Transformer;
