use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pixelscroll", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available scenes.
    List(ListArgs),
    /// Render one scene at a given progress and frame as a PNG.
    Frame(FrameArgs),
    /// Scroll through a page and print the lifecycle of every section as JSON lines.
    Scroll(ScrollArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Print scene descriptions as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene id (see `list`).
    #[arg(long)]
    scene: String,

    /// Scroll progress in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    progress: f64,

    /// Number of ticks to run before capturing.
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Nearest-neighbour display scale.
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Behave as if the reader asked for reduced motion.
    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Parser, Debug)]
struct ScrollArgs {
    /// Page layout JSON. Defaults to all five scenes stacked.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Scroll distance per step, in logical pixels.
    #[arg(long, default_value_t = 200.0)]
    step: f64,

    /// Animation frames to run after each scroll step.
    #[arg(long, default_value_t = 1)]
    frames_per_step: u32,

    /// Behave as if the reader asked for reduced motion.
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Scroll(args) => cmd_scroll(args),
    }
}

fn motion_preference(reduced_motion: bool) -> pixelscroll::MotionPreference {
    if reduced_motion {
        pixelscroll::MotionPreference::from_query(Some(true))
    } else {
        pixelscroll::MotionPreference::from_env()
    }
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    if args.json {
        let infos: Vec<&pixelscroll::SceneInfo> = pixelscroll::SceneKind::ALL
            .iter()
            .map(|k| k.info())
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }
    for kind in pixelscroll::SceneKind::ALL {
        let info = kind.info();
        println!("{:<20} {}", info.id, info.caption);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let kind: pixelscroll::SceneKind = args.scene.parse()?;
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be in [0, 1], got {}", args.progress);
    }

    let mut slot = kind.mount(
        pixelscroll::CpuSurfaceBackend::new(),
        pixelscroll::RenderLoop::new(),
        motion_preference(args.reduced_motion),
    );
    slot.sync(pixelscroll::ScrollProgress {
        progress: args.progress,
        is_in_view: true,
    });
    for _ in 0..args.frame {
        slot.on_frame();
    }

    let framed = pixelscroll::SceneFrame::for_scene(kind.info()).present(
        kind.info(),
        slot.view()?,
        pixelscroll::PresentOpts::default().with_scale(args.scale),
    )?;
    slot.unmount();

    let pixelscroll::SceneView::Live(frame) = &framed.body else {
        println!("{}", framed.to_text());
        return Ok(());
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let straight = frame.to_straight();
    image::save_buffer_with_format(
        &args.out,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scroll(args: ScrollArgs) -> anyhow::Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be > 0, got {}", args.step);
    }
    let layout = match &args.layout {
        Some(path) => pixelscroll::PageLayout::from_path(path)
            .with_context(|| format!("load layout '{}'", path.display()))?,
        None => pixelscroll::PageLayout::demo(),
    };

    let backend = pixelscroll::CpuSurfaceBackend::new();
    let mut page = pixelscroll::ScrollPage::new(
        &layout,
        backend.clone(),
        pixelscroll::RenderLoop::new(),
        motion_preference(args.reduced_motion),
        pixelscroll::TrackerOpts::from_env(),
    )?;

    let end = layout.scroll_extent() + args.step;
    let mut y = 0.0;
    while y <= end {
        page.scroll_to(y)?;
        for _ in 0..args.frames_per_step {
            page.animation_frame();
        }
        println!("{}", serde_json::to_string(&page.report())?);
        y += args.step;
    }

    page.unmount();
    let stats = pixelscroll::SurfaceBackend::stats(&backend);
    eprintln!(
        "surfaces: requested={} allocated={} released={} live={}; tickers live={}",
        stats.requested,
        stats.allocated,
        stats.released,
        stats.live(),
        page.render_loop().live()
    );
    Ok(())
}
