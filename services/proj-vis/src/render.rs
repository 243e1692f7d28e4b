//! The `render` command: project a domain and write both canvases.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use projector::{ProjectionDriver, ProjectionRequest, ProjectorConfig, RunOutcome};
use projvis_common::{
    find_example, projection_examples, BoundingBox, ColorSource, Rgba, SamplingDomain,
    UniformColor,
};
use renderer::{ImageColorSource, ProjectedCanvas, ValidCoordinatesCanvas};
use serde::Serialize;
use tracing::{info, warn};

use crate::observer::LoggingObserver;

/// Sample color used when no reference image is given.
pub const DEFAULT_COLOR: Rgba = [70, 130, 180, 255];

pub const VALID_PNG: &str = "valid.png";
pub const PROJECTED_PNG: &str = "projected.png";

/// A projection and the domain to sample it over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTarget {
    pub label: String,
    pub definition: String,
    pub domain: SamplingDomain,
}

/// Pick the render target from a catalog example or an explicit definition.
///
/// `bbox` is `"min_lon,min_lat,max_lon,max_lat"` and defaults to the whole
/// globe. `step` overrides the example's step and defaults to 1.
pub fn resolve_target(
    example: Option<&str>,
    definition: Option<&str>,
    bbox: Option<&str>,
    step: Option<f64>,
) -> Result<RenderTarget> {
    let mut target = match (example, definition) {
        (Some(_), Some(_)) => bail!("--example and --proj are mutually exclusive"),
        (Some(name), None) => {
            let Some(found) = find_example(name) else {
                let labels: Vec<&str> = projection_examples().iter().map(|e| e.label).collect();
                bail!("Unknown example '{}'. Available: {}", name, labels.join(", "));
            };
            RenderTarget {
                label: found.label.to_string(),
                definition: found.definition.to_string(),
                domain: found.domain,
            }
        }
        (None, Some(definition)) => RenderTarget {
            label: definition.to_string(),
            definition: definition.to_string(),
            domain: SamplingDomain::full_globe(1.0),
        },
        (None, None) => bail!("either --example or --proj is required"),
    };

    if let Some(bbox) = bbox {
        let bbox = BoundingBox::parse(bbox).context("Invalid --bbox")?;
        target.domain = SamplingDomain::from_bbox(&bbox, target.domain.step);
    }
    if let Some(step) = step {
        target.domain.step = step;
    }

    Ok(target)
}

/// Everything a render needs.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub target: RenderTarget,
    /// Equirectangular reference image for sample colors.
    pub image: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub config: ProjectorConfig,
}

/// What a completed render produced.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub valid_samples: usize,
    pub total_samples: u64,
    pub valid_png: PathBuf,
    pub projected_png: PathBuf,
}

/// Run the projection and write `valid.png` and `projected.png`.
///
/// Returns `None` when the run was superseded.
pub async fn render(options: &RenderOptions) -> Result<Option<RenderSummary>> {
    let colors = load_colors(options.image.as_deref())?;

    let driver = ProjectionDriver::new(options.config.clone());
    let request = ProjectionRequest {
        definition: options.target.definition.clone(),
        domain: options.target.domain,
        endpoint: options.config.server_url.clone(),
    };

    info!(
        label = %options.target.label,
        remote = request.endpoint.is_some(),
        samples = request.domain.total_samples(),
        "Rendering projection"
    );

    let mut observer = LoggingObserver::default();
    let outcome = driver
        .run(&request, colors.as_ref(), &mut observer)
        .await
        .with_context(|| format!("Projection '{}' failed", options.target.label))?;

    let result = match outcome {
        RunOutcome::Completed(result) => result,
        RunOutcome::Cancelled => {
            warn!("Projection run was superseded");
            return Ok(None);
        }
    };

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!("Failed to create output directory {}", options.output_dir.display())
    })?;

    let valid_png = options.output_dir.join(VALID_PNG);
    ValidCoordinatesCanvas::render(&result.valid_lons, &result.valid_lats, &result.colors, result.step)?
        .save_png(&valid_png)
        .with_context(|| format!("Failed to write {}", valid_png.display()))?;

    let projected_png = options.output_dir.join(PROJECTED_PNG);
    ProjectedCanvas::render(&result.projected_x, &result.projected_y, &result.colors)?
        .save_png(&projected_png)
        .with_context(|| format!("Failed to write {}", projected_png.display()))?;

    info!(valid = %valid_png.display(), projected = %projected_png.display(), "Wrote canvases");

    Ok(Some(RenderSummary {
        valid_samples: result.len(),
        total_samples: request.domain.total_samples(),
        valid_png,
        projected_png,
    }))
}

fn load_colors(image: Option<&Path>) -> Result<Box<dyn ColorSource>> {
    match image {
        Some(path) => {
            let source = ImageColorSource::open(path)
                .with_context(|| format!("Failed to load reference image {}", path.display()))?;
            Ok(Box::new(source))
        }
        None => Ok(Box::new(UniformColor::new(DEFAULT_COLOR))),
    }
}
