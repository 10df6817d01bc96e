use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use loopfx::{
    Background, CodecProfile, DeliveryMode, EffectContext, EffectKind, ExportJob, Renderer,
    Resolution,
};

#[derive(Parser, Debug)]
#[command(name = "loopfx", version)]
struct Cli {
    /// Log debug details (encoder command lines, effect setup).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one preview frame as a PNG.
    Frame(FrameArgs),
    /// Export seamless loops at one or more resolutions (requires `ffmpeg`).
    Export(ExportArgs),
    /// List the available effects.
    Effects,
}

#[derive(Args, Debug)]
struct ContextArgs {
    /// Effect name.
    #[arg(long)]
    effect: Option<String>,
    /// Clip length in seconds (10-20).
    #[arg(long)]
    duration: Option<u32>,
    /// Frames per second (1-120).
    #[arg(long)]
    fps: Option<u32>,
    /// Motion speed multiplier (0.1-5.0).
    #[arg(long)]
    speed: Option<f32>,
    /// Particle density (1-100).
    #[arg(long)]
    density: Option<u32>,
    /// Smallest particle size in pixels.
    #[arg(long)]
    size_min: Option<f32>,
    /// Largest particle size in pixels.
    #[arg(long)]
    size_max: Option<f32>,
}

impl ContextArgs {
    fn apply(&self, ctx: &mut EffectContext) {
        if let Some(v) = self.duration {
            ctx.set_duration(v);
        }
        if let Some(v) = self.fps {
            ctx.set_fps(v);
        }
        if let Some(v) = self.speed {
            ctx.set_speed(v);
        }
        if let Some(v) = self.density {
            ctx.set_density(v);
        }
        if let Some(v) = self.size_min {
            ctx.set_size_min(v);
        }
        if let Some(v) = self.size_max {
            ctx.set_size_max(v);
        }
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Frame index (0-based, wraps at the loop length).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame width.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Frame height.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Preview background the frame is flattened onto.
    #[arg(long, value_enum, default_value_t = BackgroundChoice::None)]
    background: BackgroundChoice,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Job file (JSON); flags below override its values.
    #[arg(long)]
    job: Option<PathBuf>,

    #[command(flatten)]
    context: ContextArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Target size as WxH; repeat for several.
    #[arg(long = "size")]
    sizes: Vec<Resolution>,

    /// Codec profile: dual-stream-alpha, single-stream-alpha or lossless-rgba.
    #[arg(long)]
    codec: Option<CodecProfile>,

    /// Delivery mode: streaming or batch.
    #[arg(long)]
    mode: Option<DeliveryMode>,

    /// Save encoder diagnostics next to each output.
    #[arg(long)]
    save_logs: bool,

    /// Export resolutions one after another.
    #[arg(long)]
    sequential: bool,

    /// Worker threads for parallel export.
    #[arg(long)]
    threads: Option<usize>,

    /// Encoder executable.
    #[arg(long)]
    encoder: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackgroundChoice {
    None,
    Black,
    Gray,
    White,
}

impl From<BackgroundChoice> for Background {
    fn from(value: BackgroundChoice) -> Self {
        match value {
            BackgroundChoice::None => Background::None,
            BackgroundChoice::Black => Background::Black,
            BackgroundChoice::Gray => Background::Gray,
            BackgroundChoice::White => Background::White,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Effects => cmd_effects(),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut ctx = EffectContext::new(args.width, args.height);
    args.context.apply(&mut ctx);
    let name = args
        .context
        .effect
        .clone()
        .unwrap_or_else(|| EffectKind::default().name().to_owned());

    let mut renderer = Renderer::new(ctx);
    renderer.set_effect(name);
    renderer.setup();
    let target = args.frame % renderer.context().total_frames().max(1);
    let seekable = renderer
        .effect_kind()
        .is_some_and(EffectKind::is_seekable);
    if seekable {
        renderer.seek(target)?;
        renderer.render_next_frame();
    } else {
        for _ in 0..=target {
            renderer.render_next_frame();
        }
    }

    loopfx::ensure_parent_dir(&args.out)?;
    let frame = renderer.frame();
    match Background::from(args.background).rgb() {
        Some(bg) => {
            let mut rgba = vec![0u8; frame.data.len()];
            loopfx::flatten_over_background(&mut rgba, &frame.data, bg)?;
            loopfx::write_rgba_png(&args.out, frame.width, frame.height, &rgba)?;
        }
        None => loopfx::write_bgra_png(&args.out, frame.width, frame.height, &frame.data)?,
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut job = match &args.job {
        Some(path) => ExportJob::from_path(path)?,
        None => ExportJob::default(),
    };
    if let Some(effect) = &args.context.effect {
        job.effect = effect.clone();
    }
    args.context.apply(&mut job.context);
    if let Some(dir) = args.out_dir {
        job.out_dir = dir;
    }
    if !args.sizes.is_empty() {
        job.resolutions = args.sizes;
    }
    if let Some(codec) = args.codec {
        job.codec = codec;
    }
    if let Some(mode) = args.mode {
        job.mode = mode;
    }
    if let Some(encoder) = args.encoder {
        job.encoder = encoder;
    }
    job.save_logs |= args.save_logs;
    if args.sequential {
        job.parallel = false;
    }
    if args.threads.is_some() {
        job.threads = args.threads;
    }

    let outcomes = loopfx::run_export(&job).context("export job failed")?;
    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(frames) => println!(
                "ok     {:>9}  {} ({frames} frames)",
                outcome.resolution.to_string(),
                outcome.out_path.display()
            ),
            Err(err) => {
                failed += 1;
                println!(
                    "failed {:>9}  {}: {err}",
                    outcome.resolution.to_string(),
                    outcome.out_path.display()
                );
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} exports failed", outcomes.len());
    }
    Ok(())
}

fn cmd_effects() -> anyhow::Result<()> {
    for kind in EffectKind::ALL {
        let policy = if kind.is_seekable() {
            "seekable"
        } else {
            "sequential-only"
        };
        println!("{:<14} {:<14} {policy}", kind.name(), kind.title());
    }
    Ok(())
}
