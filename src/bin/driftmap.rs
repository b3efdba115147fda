use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use driftmap::{
    AnimationOpts, Canvas, DEFAULT_ANIMATION_FILE, DriftMapper, MapperConfig, RenderOpts,
};
use tracing_subscriber::EnvFilter;

/// Generate a recursive attribution drift map: static image, looping GIF and HTML report.
#[derive(Parser, Debug)]
#[command(name = "driftmap", version)]
struct Cli {
    /// JSON mapper config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of graph levels.
    #[arg(long)]
    depth: Option<u32>,

    /// Node count of the outermost level.
    #[arg(long)]
    nodes_per_level: Option<u32>,

    /// Seed for the random stream.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory receiving every artifact.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Static image file name; the extension picks the format.
    #[arg(long, default_value = "qkov_recursive_map.png")]
    static_name: String,

    /// Animation file name.
    #[arg(long, default_value = DEFAULT_ANIMATION_FILE)]
    animation_name: String,

    /// HTML report file name.
    #[arg(long, default_value = "qkov_drift_map.html")]
    html_name: String,

    /// Static image width and height in pixels.
    #[arg(long, default_value_t = 1400)]
    static_size: u32,

    /// Animation width and height in pixels.
    #[arg(long, default_value_t = 800)]
    animation_size: u32,

    /// Frames per animation loop.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Delay between animation frames in milliseconds.
    #[arg(long, default_value_t = 100)]
    interval_ms: u32,

    /// Leave the symbol legend out of the static image.
    #[arg(long, default_value_t = false)]
    no_legend: bool,
}

impl Cli {
    fn mapper_config(&self) -> anyhow::Result<MapperConfig> {
        let mut cfg = match &self.config {
            Some(path) => MapperConfig::from_path(path)?,
            None => MapperConfig::new(5, 8),
        };
        if let Some(depth) = self.depth {
            cfg.depth = depth;
        }
        if let Some(nodes) = self.nodes_per_level {
            cfg.nodes_per_level = nodes;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = cli.mapper_config()?;
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    let render = RenderOpts::default()
        .with_canvas(cli.static_size, cli.static_size)
        .with_legend(!cli.no_legend);
    let animation = AnimationOpts {
        canvas: Canvas::new(cli.animation_size, cli.animation_size)?,
        frames: cli.frames,
        interval_ms: cli.interval_ms,
        ..AnimationOpts::default()
    };

    let mut mapper = DriftMapper::new(cfg)?;

    let static_path = cli.out_dir.join(&cli.static_name);
    mapper
        .visualize(&render, Some(&static_path))
        .with_context(|| format!("render static map '{}'", static_path.display()))?;
    tracing::info!(path = %static_path.display(), "static map written");

    let animation_path = cli.out_dir.join(&cli.animation_name);
    let html = mapper
        .generate_html(&render, &animation, &animation_path)
        .context("build html report")?;
    tracing::info!(path = %animation_path.display(), "animation written");

    let html_path = cli.out_dir.join(&cli.html_name);
    std::fs::write(&html_path, html)
        .with_context(|| format!("write html '{}'", html_path.display()))?;
    tracing::info!(path = %html_path.display(), "html report written");

    Ok(())
}
