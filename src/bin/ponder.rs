use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ponder::{
    Clock, CommandCatalog, ManualClock, PlaybackEvent, PlaybackOpts, PlaybackPhase, Scheduler,
    ScriptDocument, SimHost,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ponder", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a script and print per-fragment duration estimates.
    Check(CheckArgs),
    /// Play a script headlessly and print the event timeline as JSON lines.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Command catalog JSON (defaults to the built-in block-world catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Command catalog JSON (defaults to the built-in block-world catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Scene to start from (0-based).
    #[arg(long, default_value_t = 0)]
    scene: usize,

    /// Continue into the next scene when one completes.
    #[arg(long)]
    autoplay: bool,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Give up after this much simulated time.
    #[arg(long, default_value_t = 600.0)]
    max_secs: f64,

    /// Also print every command the host received.
    #[arg(long)]
    dump_calls: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_script(path: &Path) -> anyhow::Result<ScriptDocument> {
    ScriptDocument::from_path(path).with_context(|| format!("load script '{}'", path.display()))
}

fn read_catalog(path: Option<&Path>) -> anyhow::Result<CommandCatalog> {
    match path {
        Some(p) => CommandCatalog::from_path(p)
            .with_context(|| format!("load catalog '{}'", p.display())),
        None => Ok(CommandCatalog::builtin()),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let doc = read_script(&args.in_path)?;
    let catalog = read_catalog(args.catalog.as_deref())?;

    let mut out = std::io::stdout().lock();
    writeln!(
        out,
        "{}: {} scene(s), {} catalog command(s)",
        doc.title.as_deref().unwrap_or("untitled"),
        doc.scene_count(),
        catalog.len()
    )?;

    let mut grand_total = 0.0;
    for i in 0..doc.scene_count() {
        let scene = ponder::compile_scene(&doc, i, &catalog)
            .with_context(|| format!("compile scene {i}"))?;
        writeln!(
            out,
            "scene {i}: {} fragment(s), total {:.3}s",
            scene.fragment_count(),
            scene.total_secs()
        )?;
        for f in scene.fragments() {
            let unclassified = f
                .instructions()
                .iter()
                .filter(|ins| matches!(ins, ponder::Instruction::Unclassified { .. }))
                .count();
            writeln!(
                out,
                "  fragment {}: {:.3}s, {} instruction(s), {} suspension(s), {} unclassified",
                f.index(),
                f.estimated_secs(),
                f.len(),
                f.suspension_points(),
                unclassified
            )?;
        }
        grand_total += scene.total_secs();
    }
    writeln!(out, "script total {grand_total:.3}s")?;
    Ok(())
}

#[derive(Serialize)]
struct TimedEvent<'a> {
    t: f64,
    #[serde(flatten)]
    event: &'a PlaybackEvent,
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be a positive number"
    );
    anyhow::ensure!(
        args.max_secs.is_finite() && args.max_secs >= 0.0,
        "--max-secs must be a non-negative number"
    );

    let doc = read_script(&args.in_path)?;
    let catalog = read_catalog(args.catalog.as_deref())?;

    let clock = ManualClock::new();
    let mut host = SimHost::new(clock.clone(), catalog.clone());
    let opts = PlaybackOpts {
        auto_play: args.autoplay,
        ..PlaybackOpts::default()
    };
    let mut scheduler = Scheduler::new(doc, catalog, clock.clone(), opts)?;
    scheduler
        .initialize(args.scene, &mut host)
        .with_context(|| format!("start scene {}", args.scene))?;

    let frame = Duration::try_from_secs_f64(1.0 / args.fps).unwrap_or(Duration::MAX);
    let limit = Duration::try_from_secs_f64(args.max_secs).unwrap_or(Duration::MAX);
    let mut out = std::io::stdout().lock();

    loop {
        let t = clock.now().as_secs_f64();
        for event in scheduler.drain_events() {
            let line = serde_json::to_string(&TimedEvent { t, event: &event })?;
            writeln!(out, "{line}")?;
        }
        if scheduler.phase() == PlaybackPhase::Stopped && !scheduler.is_settling() {
            break;
        }
        if clock.now() >= limit {
            eprintln!("gave up after {:.3}s of simulated time", clock.now().as_secs_f64());
            break;
        }
        clock.advance(frame);
        host.pump();
        scheduler.tick(&mut host)?;
    }

    if args.dump_calls {
        for r in host.records() {
            writeln!(out, "{}", serde_json::to_string(r)?)?;
        }
    }
    eprintln!(
        "played {} call(s) in {:.3}s",
        host.records().len(),
        clock.now().as_secs_f64()
    );
    Ok(())
}
