use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_raycaster::config::Config;
use grid_raycaster::{FrameBuffer, app, render_frame, snapshot};

#[derive(Debug, Parser)]
#[command(name = "grid-raycaster", version, about = "First-person raycaster over a 2D grid")]
struct Cli {
    /// TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Open a window and walk around with the arrow keys (default)
    Run,
    /// Render one frame from the start position and write it as PNG
    Snapshot {
        #[arg(default_value = "frame.png")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("grid-raycaster v{}", env!("CARGO_PKG_VERSION"));
    match &cli.config {
        Some(path) => info!("using config {}", path.display()),
        None => info!("using default configuration"),
    }

    config.validate().context("invalid configuration")?;
    let map = config.build_map().context("building map")?;
    let viewer = config.build_viewer(&map).context("placing viewer")?;
    info!(
        map_width = map.width(),
        map_height = map.height(),
        x = viewer.x(),
        y = viewer.y(),
        heading = viewer.heading(),
        "scene ready"
    );

    match cli.command.unwrap_or(Mode::Run) {
        Mode::Run => app::run(&config, map, viewer).context("window loop")?,
        Mode::Snapshot { output } => {
            let mut frame = FrameBuffer::new(config.display.width, config.display.height);
            render_frame(&mut frame, &viewer, &map, &config.render_settings());
            snapshot::save_png(&frame, &output)
                .with_context(|| format!("writing {}", output.display()))?;
        }
    }

    Ok(())
}
