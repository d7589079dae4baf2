//! faced - Face recognition HTTP service.
//!
//! Keeps a gallery of registered face encodings in memory and classifies
//! faces in uploaded images against it over a small JSON API.

mod server;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use faceid_extract::{FaceExtractor, GridExtractor, DEFAULT_GRID};
use faceid_gallery::{Gallery, DEFAULT_TOLERANCE};

use crate::server::AppState;

/// Face recognition HTTP service.
#[derive(Parser, Debug)]
#[command(name = "faced")]
#[command(about = "Face recognition HTTP service")]
#[command(version)]
struct Args {
    /// Listen address (e.g. :5000 or 127.0.0.1:5000)
    #[arg(long, default_value = ":5000")]
    addr: String,

    /// Maximum euclidean distance for an accepted match
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f32,

    /// Grid side length of the built-in extractor (encoding dimension is grid^2)
    #[arg(long, default_value_t = DEFAULT_GRID)]
    grid: u32,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    if args.grid == 0 {
        anyhow::bail!("--grid must be positive");
    }

    let extractor: Arc<dyn FaceExtractor> = Arc::new(GridExtractor::new(args.grid));
    let state = AppState {
        gallery: Arc::new(Gallery::new()),
        extractor,
        tolerance: args.tolerance,
    };

    server::serve(&args.addr, state).await
}
