use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scrappers-gif", version, about = "Render Scrappers replays as animated GIFs")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a whole replay as a looping animated GIF.
    Render(RenderArgs),
    /// Render a single tick as a full-color PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input replay JSON.
    #[arg(long = "in", default_value = "scrappers.json")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long, default_value = "scrappers.gif")]
    out: PathBuf,

    /// Ticks shown per second (1-100).
    #[arg(long, default_value_t = 12)]
    speed: u32,

    /// Quantize worker threads.
    #[arg(long, default_value_t = 8)]
    threads: usize,

    /// Output edge length in pixels.
    #[arg(long, default_value_t = 600)]
    size: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input replay JSON.
    #[arg(long = "in", default_value = "scrappers.json")]
    in_path: PathBuf,

    /// Tick index (0-based position in the replay).
    #[arg(long)]
    tick: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output edge length in pixels.
    #[arg(long, default_value_t = 600)]
    size: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "scrappers=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_replay(path: &Path) -> anyhow::Result<scrappers::Replay> {
    let replay = scrappers::Replay::load(path)
        .with_context(|| format!("load replay '{}'", path.display()))?;
    replay.validate()?;
    Ok(replay)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = scrappers::RenderOpts {
        size: args.size,
        ticks_per_second: args.speed,
        workers: args.threads,
        ..scrappers::RenderOpts::default()
    };
    opts.validate()?;

    let replay = read_replay(&args.in_path)?;
    let mut backend = scrappers::create_backend(scrappers::BackendKind::Cpu);
    let anim = scrappers::render_animation(&replay, &opts, backend.as_mut())?;

    ensure_parent_dir(&args.out)?;
    let mut sink = scrappers::GifSink::new(&args.out);
    scrappers::write_animation(&anim, &mut sink)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let opts = scrappers::RenderOpts {
        size: args.size,
        ..scrappers::RenderOpts::default()
    };
    opts.validate()?;

    let replay = read_replay(&args.in_path)?;
    let mut backend = scrappers::create_backend(scrappers::BackendKind::Cpu);
    let frame = scrappers::render_tick_frame(&replay, args.tick, &opts, backend.as_mut())?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
