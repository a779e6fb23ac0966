use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pageflip::{
    DeviceKind, DocumentSource, ManualScheduler, NavOutcome, PageIndex, PngSequenceSink,
    RasterScale, SvgDocument, ViewerOpts, ViewerSession,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pageflip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print page count and page dimensions of a deck.
    Info(InfoArgs),
    /// Render the transition between two pages as a PNG sequence.
    Flip(FlipArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Zoom applied to the reported dimensions.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

#[derive(Parser, Debug)]
struct FlipArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Page shown before the transition (1-based).
    #[arg(long, default_value_t = 1)]
    from: u32,

    /// Destination page (1-based).
    #[arg(long)]
    to: u32,

    /// Effect name (fade, slide, zoom). Overrides the config file.
    #[arg(long)]
    effect: Option<String>,

    /// Transition duration in milliseconds. Overrides the config file.
    #[arg(long)]
    duration_ms: Option<i64>,

    /// Frames per second of the exported sequence.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Render scale. Overrides the config file.
    #[arg(long)]
    scale: Option<f32>,

    /// Viewer options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the frames and `final.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Flip(args) => cmd_flip(args).await,
    }
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let doc = SvgDocument::from_path(&args.in_path)?;
    let scale = RasterScale::new(args.scale, 1.0)?;
    let count = doc.info().page_count;
    println!("pages: {}", count.get());
    for page in count.pages() {
        let size = doc.page_dimensions(page, scale)?;
        println!("  {page}: {}x{}", size.width, size.height);
    }
    Ok(())
}

async fn cmd_flip(args: FlipArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => ViewerOpts::from_path(path)?,
        None => ViewerOpts::default(),
    };
    if let Some(effect) = args.effect {
        opts.transition.effect = effect;
    }
    if let Some(duration_ms) = args.duration_ms {
        opts.transition.duration_ms = duration_ms;
    }
    if let Some(scale) = args.scale {
        opts.render_scale = scale;
    }
    // Background prefetch is not needed for a single flip.
    opts.prefetch = false;

    let doc = SvgDocument::from_path(&args.in_path)?;
    let count = doc.info().page_count;
    let from = PageIndex::new(args.from)?.checked_in(count)?;
    let to = PageIndex::new(args.to)?.checked_in(count)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let scheduler = ManualScheduler::with_fps(args.fps)?;
    let session = ViewerSession::with_device(doc, DeviceKind::Cpu, scheduler, &opts)?;
    session.set_frame_sink(Some(Box::new(PngSequenceSink::new(&args.out_dir, "frame"))))?;

    session.show_page(from).await?;
    match session.navigate(to).await? {
        NavOutcome::Transitioned(report) => {
            eprintln!(
                "{} frames ({})",
                report.frames,
                report
                    .effect
                    .map_or_else(|| "none".to_string(), |e| e.to_string())
            );
        }
        NavOutcome::Direct { reason } => eprintln!("no transition: {reason}"),
        NavOutcome::Unchanged => eprintln!("page {to} already displayed"),
        NavOutcome::Ignored => anyhow::bail!("navigation request was dropped"),
        NavOutcome::Failed(err) => return Err(err).context(format!("display page {to}")),
    }

    write_final(&session, &args.out_dir)
}

fn write_final<R: pageflip::Rasterizer, S: pageflip::FrameScheduler>(
    session: &ViewerSession<R, S>,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let bitmap = session
        .displayed_bitmap()
        .context("no page was displayed")?;
    let out = out_dir.join("final.png");
    bitmap
        .to_rgba_image()?
        .save(&out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
