//! MedMap demo: drives the app shell from a scripted list of actions.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  StaticDirectory        LogEventSink + RecordingSink     │
//! │  (DirectoryPort)        (EventSink, via Tee)             │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │   MedMapApp (screens · navigation · simulator)     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  Simulated clock: `wait:<ms>` script steps               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Without `--script` the demo plays one full emergency request:
//! SOS, confirmation, dispatch, live tracking and arrival.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use medmap::adapters::log_sink::LogEventSink;
use medmap::adapters::recording_sink::{RecordingSink, Tee};
use medmap::adapters::static_directory::StaticDirectory;
use medmap::app::commands::CommandOutcome;
use medmap::config::SimulatorConfig;
use medmap::shell::{MedMapApp, UiAction};

const DEFAULT_SCRIPT: &str =
    "help,sos,wait:2000,wait:10000,track,wait:150000";

#[derive(Parser, Debug)]
#[command(name = "medmap")]
#[command(about = "MedMap emergency assistance demo on a simulated clock")]
struct Args {
    /// JSON file overriding simulator timings and counters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to open before running the script
    #[arg(short, long, default_value = "/")]
    route: String,

    /// Comma-separated actions, e.g. "sos,wait:2000,cancel"
    #[arg(short, long, default_value = DEFAULT_SCRIPT)]
    script: String,

    /// Print the final view as JSON
    #[arg(long)]
    json: bool,

    /// Print every recorded event as JSON
    #[arg(long)]
    events: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimulatorConfig> {
    let Some(path) = path else {
        return Ok(SimulatorConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = SimulatorConfig::from_json(&text)
        .with_context(|| format!("loading config {}", path.display()))?;
    info!("Config loaded from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("MedMap demo v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_ref())?;
    let directory = StaticDirectory::demo().context("loading demo fixtures")?;
    let sink = Tee {
        first: LogEventSink::new(),
        second: RecordingSink::new(),
    };

    let mut app = MedMapApp::new(config, directory, sink).context("starting app")?;
    app.navigate_path(&args.route)
        .with_context(|| format!("opening {}", args.route))?;

    let actions = args
        .script
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.parse::<UiAction>()
                .with_context(|| format!("script step '{}'", s.trim()))
        })
        .collect::<Result<Vec<_>>>()?;

    for action in actions {
        let label = format!("{action:?}");
        match app.perform(action) {
            CommandOutcome::Applied => info!("ACT   | {label} on {}", app.route()),
            CommandOutcome::Ignored => warn!("ACT   | {label} ignored on {}", app.route()),
        }
    }

    let view = app.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view.path);
    }

    let sink = app.close();
    if args.events {
        println!("{}", serde_json::to_string_pretty(sink.second.events())?);
    }
    Ok(())
}
