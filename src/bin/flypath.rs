use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use flypath::capture::CaptureEvent;
use flypath::surface::{LayerKind, SurfaceEvent};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flypath", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a plan file and print the animatable groups as JSON.
    Plan(PlanArgs),
    /// Animate a plan headless on a recording surface and write the trace.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Plan JSON (groups plus gazetteer).
    #[arg(long)]
    plan: PathBuf,

    /// Override the plan's mode.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Plan JSON (groups plus gazetteer).
    #[arg(long)]
    plan: PathBuf,

    /// Run settings JSON; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the plan's mode.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Trace output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Wrap the run in a (logged) capture session.
    #[arg(long)]
    record: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Direct,
    Road,
    Border,
}

impl From<ModeChoice> for flypath::PlanMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Direct => Self::Direct,
            ModeChoice::Road => Self::Road,
            ModeChoice::Border => Self::Border,
        }
    }
}

#[derive(serde::Serialize)]
struct TraceSummary {
    report: flypath::RunReport,
    final_view: flypath::Viewport,
    layers: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capture: Option<Vec<CaptureEvent>>,
    events: Vec<SurfaceEvent>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flypath=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")?;
    match cli.cmd {
        Command::Plan(args) => rt.block_on(cmd_plan(args)),
        Command::Animate(args) => rt.block_on(cmd_animate(args)),
    }
}

fn read_plan(path: &Path) -> anyhow::Result<flypath::PlanFile> {
    Ok(flypath::PlanFile::from_path(path)?)
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).context("write JSON")?;
            w.flush().context("flush output")?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value).context("write JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

async fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let plan = read_plan(&args.plan)?;
    let mode = args.mode.map_or(plan.mode, Into::into);
    let resolved = plan
        .resolve(mode, flypath::Throttle::none())
        .await
        .map_err(|err| anyhow::anyhow!(err.user_message()))?;
    write_json(&resolved, None)
}

async fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let plan = read_plan(&args.plan)?;
    let mode = args.mode.map_or(plan.mode, Into::into);
    let mut settings = match &args.settings {
        Some(path) => flypath::RunSettings::from_path(path)?,
        None => flypath::RunSettings::default(),
    };
    settings.show_markers &= mode.shows_markers();

    let resolved = plan
        .resolve(mode, flypath::Throttle::none())
        .await
        .map_err(|err| anyhow::anyhow!(err.user_message()))?;
    tracing::info!(groups = resolved.groups.len(), ?mode, "plan resolved");

    let surface = Rc::new(flypath::RecordingSurface::new());
    let frames = Rc::new(flypath::Ticker::new(settings.fps));
    let mut animator = flypath::Animator::new(Rc::clone(&surface), frames, settings)?;
    let run = animator.start(resolved.groups)?;

    let (report, capture) = if args.record {
        let mut recorder = flypath::Recorder::new(flypath::CaptureLog::new());
        let report = recorder.start_then(|| run.execute()).await?;
        recorder.stop()?;
        (report, Some(recorder.sink().events()))
    } else {
        (run.execute().await, None)
    };

    let mut layers = BTreeMap::new();
    for kind in [
        LayerKind::Line,
        LayerKind::Traveler,
        LayerKind::WaypointMarker,
        LayerKind::Circle,
    ] {
        let name = serde_json::to_value(kind)?
            .as_str()
            .unwrap_or("unknown")
            .to_owned();
        layers.insert(name, surface.count(kind));
    }

    let summary = TraceSummary {
        report,
        final_view: flypath::MapSurface::view(&*surface),
        layers,
        capture,
        events: surface.events(),
    };
    write_json(&summary, args.out.as_deref())
}
