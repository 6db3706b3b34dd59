use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arview::{ArPipeline, PatternChoice};
use server::{catalog::IdolCatalog, router::router, state::AppState};
use wallseg::{OnnxWallSegmenter, SegmenterConfig};

#[derive(Parser)]
#[command(author, version, about = "AR idol placement service", long_about = None)]
struct Cli {
    /// Path to the ONNX semantic-segmentation model
    #[arg(long, default_value = "models/segformer_b0_ade20k.onnx")]
    model: PathBuf,
    /// Directory holding idols.json and the idol images
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Bind address, also read from HOST
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    /// Bind port, also read from PORT
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=debug,arview=debug,wallseg=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Model load is fail-fast: there is no fallback segmentation, so the
    // process must not come up without it.
    let segmenter = OnnxWallSegmenter::load(SegmenterConfig::new(&cli.model))
        .wrap_err("segmentation model failed to load")?;
    let catalog =
        IdolCatalog::load(&cli.assets).wrap_err("idol catalog failed to load")?;

    let pipeline = ArPipeline::builder(segmenter)
        .pattern_choice(PatternChoice::Os)
        .build();

    let state = AppState {
        catalog: Arc::new(catalog),
        pipeline: Arc::new(pipeline),
    };
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .wrap_err("invalid host/port")?;
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
