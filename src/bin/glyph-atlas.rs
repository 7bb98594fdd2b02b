use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glyph_atlas::{
    AtlasConfig, AtlasSession, AudioCueSink, Catalog, Evaluator, FrameChange, FrameIndex,
    FrameUpdate, PresentationAdapter, SessionOpts, SilentSink, TextGrid, ToneDirSink,
    render_text, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "glyph-atlas", version)]
struct Cli {
    /// Emit tracing diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print entropy/coherence for every frame of the reference catalog.
    Stats(StatsArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Play the looping sequence in the terminal.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Optional config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds after the frame change to sample transitions at.
    #[arg(long, default_value_t = 2.0)]
    at: f64,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Stop after this many ticks.
    #[arg(long, default_value_t = 6)]
    ticks: usize,

    /// Override the tick interval from the config.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Frame to start from.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Optional config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable tone cues.
    #[arg(long)]
    sound: bool,

    /// Directory holding `tone-<n>.mp3` files.
    #[arg(long)]
    tones: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.cmd {
        Command::Stats(args) => cmd_stats(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AtlasConfig> {
    match path {
        Some(p) => {
            AtlasConfig::from_path(p).with_context(|| format!("load config '{}'", p.display()))
        }
        None => Ok(AtlasConfig::default()),
    }
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let catalog = Catalog::reference();
    let table = Evaluator::stats_table(&catalog);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }
    println!("{:>5}  {:>6}  {:>7}  {:>9}", "frame", "glyphs", "entropy", "coherence");
    for m in &table {
        println!(
            "{:>5}  {:>6}  {:>7.3}  {:>9.3}",
            m.frame, m.visible_count, m.entropy, m.coherence
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let catalog = Catalog::reference();
    let eval = Evaluator::evaluate(&catalog, FrameIndex(args.frame))?;

    let mut adapter = PresentationAdapter::new(cfg.presentation, cfg.canvas, SilentSink)?;
    let pf = adapter.present(&FrameUpdate {
        cause: FrameChange::Initial,
        state: glyph_atlas::FrameState {
            frame: eval.frame,
            playing: false,
        },
        eval,
    });
    write_png(&pf, args.at, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(ms) = args.interval_ms {
        cfg.tick_interval_ms = ms;
    }
    if args.sound {
        cfg.presentation.sound_on = true;
    }
    cfg.validate()?;
    let budget = tick_budget(cfg.tick_interval(), args.ticks)?;

    let sink: Box<dyn AudioCueSink> = match args.tones {
        Some(dir) => Box::new(ToneDirSink::new(dir)),
        None => Box::new(SilentSink),
    };
    let adapter = PresentationAdapter::new(cfg.presentation, cfg.canvas, sink)?
        .with_view(|pf| println!("{}", render_text(pf, TextGrid::default())));

    let opts = SessionOpts {
        tick_interval: cfg.tick_interval(),
        autoplay: true,
    };
    let mut sess = AtlasSession::new(Arc::new(Catalog::reference()), opts)?;
    sess.set_frame(FrameIndex(args.start))?;
    sess.subscribe(adapter);

    let frames = sess.run_ticks(args.ticks, budget);
    sess.shutdown();

    eprintln!("played {} tick(s), stopped at frame {}", frames.len(), sess.frame());
    Ok(())
}

/// Wall-clock allowance for `ticks` ticks: one spare interval plus a second of slack.
fn tick_budget(interval: Duration, ticks: usize) -> anyhow::Result<Duration> {
    let ticks = u32::try_from(ticks).context("--ticks does not fit in u32")?;
    let intervals = ticks.checked_add(1).context("tick budget overflows")?;
    interval
        .checked_mul(intervals)
        .and_then(|d| d.checked_add(Duration::from_secs(1)))
        .context("tick budget overflows")
}
