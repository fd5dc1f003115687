use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "brandmark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a branded image as a PNG.
    Render(RenderArgs),
    /// Print the accent color derived from a project key.
    Color(ColorArgs),
    /// List the framework badges in the catalog.
    Frameworks,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Base image: a file path or a `data:` URI.
    #[arg(long)]
    image: String,

    /// Project key the accent color is derived from.
    #[arg(long)]
    project: String,

    /// Framework id (unknown ids render without a badge).
    #[arg(long)]
    framework: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Directory holding the overlay icons.
    #[arg(long, env = "BRANDMARK_ASSETS", default_value = "assets")]
    assets: PathBuf,

    /// Optional JSON config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Icon placement inside the cards (overrides the config).
    #[arg(long, value_enum)]
    fit: Option<FitChoice>,
}

#[derive(Parser, Debug)]
struct ColorArgs {
    /// Project key.
    key: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitChoice {
    Stretch,
    Contain,
}

impl From<FitChoice> for brandmark::IconFit {
    fn from(c: FitChoice) -> Self {
        match c {
            FitChoice::Stretch => Self::Stretch,
            FitChoice::Contain => Self::Contain,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
        Command::Color(args) => {
            println!("{}", brandmark::derive_color(&args.key));
            Ok(())
        }
        Command::Frameworks => {
            for entry in brandmark::FrameworkRegistry::builtin().entries() {
                println!("{}\t{}\t{}", entry.id, entry.label, entry.icon);
            }
            Ok(())
        }
    }
}

fn base_source(image: &str) -> anyhow::Result<brandmark::AssetSource> {
    Ok(match brandmark::AssetSource::parse(image) {
        brandmark::AssetSource::Path(p) => {
            let abs = std::path::absolute(&p)
                .with_context(|| format!("resolve image path '{}'", p.display()))?;
            brandmark::AssetSource::Path(abs)
        }
        other => other,
    })
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => brandmark::BrandConfig::from_path(path)?,
        None => brandmark::BrandConfig::default(),
    };
    if let Some(fit) = args.fit {
        cfg.icon_fit = fit.into();
    }

    let compositor = brandmark::Compositor::new(cfg.compositor_opts(&args.assets))?;
    let canvas = brandmark::CanvasHandle::new(args.width, args.height)?;
    let request = brandmark::RenderRequest::new(
        base_source(&args.image)?,
        args.project.as_str(),
        args.framework.as_str(),
    );

    let outcome = compositor.render(&canvas, request).await?;
    let Some(summary) = outcome.summary() else {
        anyhow::bail!("render was superseded (bug)");
    };

    canvas.snapshot().await.save_png(&args.out)?;
    eprintln!(
        "wrote {} (accent {}, {} layers)",
        args.out.display(),
        summary.accent,
        summary.layers.len()
    );
    Ok(())
}
