//! proj-vis command-line tool
//!
//! Projects longitude/latitude grids through PROJ definitions, locally or
//! through a transform service, and renders the results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use projector::{transform_one, validate, ProjectorConfig, RemoteClient};
use projvis_common::{projection_examples, Coordinate};
use tracing_subscriber::{fmt, EnvFilter};

use proj_vis::{render, resolve_target, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "proj-vis")]
#[command(about = "Visualize where a map projection is defined", long_about = None)]
struct Cli {
    /// Transform service URL; local transforms when unset
    #[arg(long, global = true, env = "PROJ_VIS_SERVER_URL")]
    server: Option<String>,

    /// Log level
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project a domain and write valid.png and projected.png
    Render {
        /// Catalog example, matched by label prefix (see `examples`)
        #[arg(short, long, conflicts_with = "proj")]
        example: Option<String>,

        /// PROJ definition of the target projection
        #[arg(short, long)]
        proj: Option<String>,

        /// Domain as min_lon,min_lat,max_lon,max_lat (default: whole globe)
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<String>,

        /// Sampling step in degrees, must exceed 0.001
        #[arg(long)]
        step: Option<f64>,

        /// Equirectangular reference image for sample colors
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Directory to write the PNG files to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Grid samples per batch
        #[arg(long, env = "PROJ_VIS_BATCH_LIMIT")]
        batch_limit: Option<u64>,
    },

    /// Check that a projection definition can be used
    Validate {
        /// PROJ definition
        proj: String,
    },

    /// Transform a single coordinate
    Transform {
        /// PROJ definition of the projected system
        proj: String,

        #[arg(allow_hyphen_values = true)]
        x: f64,

        #[arg(allow_hyphen_values = true)]
        y: f64,

        /// Map projected coordinates back to lon/lat
        #[arg(short, long)]
        reverse: bool,
    },

    /// List the example projections
    Examples,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ProjectorConfig::from_env().with_server_url(cli.server.as_deref());

    match cli.command {
        Commands::Render {
            example,
            proj,
            bbox,
            step,
            image,
            output_dir,
            batch_limit,
        } => {
            if let Some(limit) = batch_limit {
                config.batch_limit = limit;
            }
            config.validate().map_err(anyhow::Error::msg)?;

            let target =
                resolve_target(example.as_deref(), proj.as_deref(), bbox.as_deref(), step)?;
            let options = RenderOptions {
                target,
                image,
                output_dir,
                config,
            };

            match render(&options).await? {
                Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
                None => println!("Run was superseded; nothing written"),
            }
        }

        Commands::Validate { proj } => {
            config.validate().map_err(anyhow::Error::msg)?;
            let validation = validate(&proj, config.server_url.as_deref(), &config).await;
            println!("{}", serde_json::to_string_pretty(&validation)?);
            if !validation.valid {
                std::process::exit(1);
            }
        }

        Commands::Transform {
            proj,
            x,
            y,
            reverse,
        } => {
            config.validate().map_err(anyhow::Error::msg)?;
            let client = match &config.server_url {
                Some(url) => Some(RemoteClient::new(url, &config)?),
                None => None,
            };

            let output = transform_one(Coordinate::new(x, y), &proj, client.as_ref(), reverse)
                .await
                .context("Transform failed")?;
            match output {
                Some(coordinate) => println!("{} {}", coordinate.x, coordinate.y),
                None => println!("invalid"),
            }
        }

        Commands::Examples => {
            for example in projection_examples() {
                println!("{}", example.label);
                println!("    {}", example.definition);
            }
        }
    }

    Ok(())
}
