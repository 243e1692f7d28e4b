//! Batched, cancellable projection of longitude/latitude sampling grids.
//!
//! A run partitions a [`SamplingDomain`](projvis_common::SamplingDomain)
//! into fixed-size batches, pushes them one at a time through a
//! [`TransformProvider`] (in-process or the HTTP transform service), drops
//! samples without a finite image and returns the rest as parallel arrays
//! with a color per sample.
//!
//! # Architecture
//!
//! ```text
//! ProjectionDriver::run(request)
//!      │
//!      ├─► validate step + projection
//!      │
//!      ├─► Batch::generate(domain, offset, limit)     (projvis-common)
//!      │
//!      ├─► TransformProvider::project_batch
//!      │         ├─► LocalProvider   (proj4rs, yields per batch)
//!      │         └─► RemoteProvider  (one GET per batch)
//!      │
//!      └─► filter, color lookup, accumulate
//!               │
//!               ▼
//!          ProjectionResult
//! ```
//!
//! Starting a run supersedes every older run sharing the same
//! [`RunRegister`]; superseded runs end with [`RunOutcome::Cancelled`].
//!
//! # Example
//!
//! ```ignore
//! use projector::{ProjectionDriver, ProjectionRequest, ProjectorConfig};
//! use projvis_common::{SamplingDomain, UniformColor};
//!
//! let driver = ProjectionDriver::new(ProjectorConfig::default());
//! let request = ProjectionRequest::local("+proj=utm +zone=32", SamplingDomain::full_globe(1.0));
//! let outcome = driver.run(&request, &UniformColor::new([255; 4]), &mut ()).await?;
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod observer;
pub mod provider;
pub mod remote;
pub mod single;
pub mod token;
pub mod validator;

pub use config::ProjectorConfig;
pub use driver::{ProjectionDriver, ProjectionRequest, ProjectionResult, RunOutcome};
pub use error::{ProjectorError, Result};
pub use observer::RunObserver;
pub use provider::{LocalProvider, RemoteProvider, TransformProvider, Validation};
pub use remote::{extract_engine_message, RemoteClient};
pub use single::transform_one;
pub use token::{RunRegister, RunToken};
pub use validator::validate;
