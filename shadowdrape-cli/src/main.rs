use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "shadowdrape", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame with a cast shadow as a PNG.
    Render(RenderArgs),
    /// Write the default shadow config as JSON.
    Config(ConfigArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Composite,
    ShadowOnly,
    MaskOnly,
}

impl From<ModeArg> for shadowdrape::LayerMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Composite => Self::Composite,
            ModeArg::ShadowOnly => Self::ShadowOnly,
            ModeArg::MaskOnly => Self::MaskOnly,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Background image; defines the frame size.
    #[arg(long)]
    background: PathBuf,

    /// Subject cutout with alpha.
    #[arg(long)]
    cutout: PathBuf,

    /// Grayscale depth map (near = bright). Resized to the frame if needed.
    #[arg(long)]
    depth: Option<PathBuf>,

    /// Shadow config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subject anchor x as a fraction of frame width.
    #[arg(long)]
    x: Option<f64>,

    /// Subject anchor y (ground contact) as a fraction of frame height.
    #[arg(long)]
    y: Option<f64>,

    /// Subject scale relative to its native size.
    #[arg(long)]
    scale: Option<f64>,

    /// Light azimuth in degrees.
    #[arg(long)]
    angle: Option<f64>,

    /// Light elevation in degrees.
    #[arg(long)]
    elevation: Option<f64>,

    /// Shadow opacity in [0, 1].
    #[arg(long)]
    opacity: Option<f64>,

    /// Penumbra blur in pixels.
    #[arg(long)]
    light_size: Option<f64>,

    /// Height-field displacement strength.
    #[arg(long)]
    depth_strength: Option<f64>,

    /// Which layer to export.
    #[arg(long, value_enum, default_value_t = ModeArg::Composite)]
    mode: ModeArg,

    /// Draw the preview outline and pivot handle.
    #[arg(long, default_value_t = false)]
    overlay: bool,

    /// Print a SHA-256 digest of the output pixels.
    #[arg(long, default_value_t = false)]
    digest: bool,

    /// Print the render report as JSON on stdout.
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(args: &RenderArgs) -> anyhow::Result<shadowdrape::ShadowConfig> {
    let mut config = match &args.config {
        Some(path) => shadowdrape::ShadowConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => shadowdrape::ShadowConfig::default(),
    };
    config.tunables = config.tunables.with_env_overrides();

    let overrides = [
        (args.x, &mut config.transform.x),
        (args.y, &mut config.transform.y),
        (args.scale, &mut config.transform.scale),
        (args.angle, &mut config.light.angle),
        (args.elevation, &mut config.light.elevation),
        (args.opacity, &mut config.physics.opacity),
        (args.light_size, &mut config.physics.light_size),
        (args.depth_strength, &mut config.physics.depth_strength),
    ];
    for (flag, field) in overrides {
        if let Some(v) = flag {
            *field = v;
        }
    }
    Ok(config)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    let background = shadowdrape::load_image(&args.background)
        .with_context(|| format!("load background '{}'", args.background.display()))?;
    let cutout = shadowdrape::load_image(&args.cutout)
        .with_context(|| format!("load cutout '{}'", args.cutout.display()))?;
    let depth = match &args.depth {
        Some(path) => {
            let depth = shadowdrape::load_depth(path)
                .with_context(|| format!("load depth '{}'", path.display()))?;
            if depth.canvas() == background.canvas() {
                Some(depth)
            } else {
                tracing::info!(
                    from_w = depth.width(),
                    from_h = depth.height(),
                    to_w = background.width(),
                    to_h = background.height(),
                    "resizing depth map to frame"
                );
                Some(depth.resized_to(background.canvas())?)
            }
        }
        None => None,
    };

    let display = if args.overlay {
        shadowdrape::DisplayMode::Interactive
    } else {
        shadowdrape::DisplayMode::Export
    };
    let request = shadowdrape::RenderRequest::from_config(&config, args.mode.into(), display);
    let out = shadowdrape::render(
        &request,
        shadowdrape::SceneAssets {
            background: Some(&background),
            cutout: Some(&cutout),
            depth: depth.as_ref(),
        },
    );
    let frame = out
        .frame
        .context("nothing to draw: background or cutout is empty")?;
    tracing::info!(warp = ?out.report.warp, coverage = out.report.coverage, "rendered");

    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());

    if args.digest {
        println!("sha256 {}", sha256_hex(frame.data()));
    }
    if args.report {
        println!("{}", serde_json::to_string(&out.report)?);
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let json = shadowdrape::ShadowConfig::default().to_json_pretty()?;
    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write config '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &shadowdrape::FrameRGBA) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    sha2::Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
