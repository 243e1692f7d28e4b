//! Library side of the `proj-vis` command-line tool.

pub mod observer;
pub mod render;

pub use observer::LoggingObserver;
pub use render::{render, resolve_target, RenderOptions, RenderSummary, RenderTarget};
