mod script;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand};
use stage::config::{ConfigError, ZoomConfig};
use stage::manager::ToolError;
use stage::scheduler::ManualScheduler;
use stage::surface::Surface;

use crate::script::{Script, ScriptError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid zoom config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build surface: {0}")]
    Tool(#[from] ToolError),
}

#[derive(Parser, Debug)]
#[command(name = "labelstage", about = "Replay annotation stage interactions headlessly")]
struct Cli {
    /// Pretty-print JSON output.
    #[arg(long, env = "LABELSTAGE_PRETTY")]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON interaction script and print the final viewport state.
    Replay {
        script: PathBuf,
        /// Override the zoom step factor.
        #[arg(long)]
        zoom_step: Option<f64>,
        /// Override the minimum zoom scale.
        #[arg(long)]
        zoom_min: Option<f64>,
        /// Override the maximum zoom scale.
        #[arg(long)]
        zoom_max: Option<f64>,
    },
    /// List the default tool shortcuts.
    Bindings,
    /// Print the zoom configuration resolved from the environment.
    Config,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay { script, zoom_step, zoom_min, zoom_max } => {
            run_replay(&script, Overrides { step: zoom_step, min: zoom_min, max: zoom_max }, cli.pretty)
        }
        Command::Bindings => run_bindings(),
        Command::Config => run_config(cli.pretty),
    }
}

struct Overrides {
    step: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl Overrides {
    fn apply(&self, mut config: ZoomConfig) -> ZoomConfig {
        config.step = self.step.unwrap_or(config.step);
        config.min_scale = self.min.unwrap_or(config.min_scale);
        config.max_scale = self.max.unwrap_or(config.max_scale);
        config
    }
}

fn run_replay(path: &Path, overrides: Overrides, pretty: bool) -> Result<(), CliError> {
    let script = Script::load(path)?;
    let config = overrides.apply(script.resolve_config()?);
    config.validate()?;
    tracing::info!(path = %path.display(), events = script.events.len(), "replaying script");

    let report = script.replay(config)?;
    print_json(&report, pretty)
}

fn run_bindings() -> Result<(), CliError> {
    let surface = Surface::new(Rc::new(ManualScheduler::new()))?;
    for binding in surface.bindings() {
        println!("{:<12} {}", binding.shortcut.to_string(), binding.label);
    }
    Ok(())
}

fn run_config(pretty: bool) -> Result<(), CliError> {
    let config = ZoomConfig::from_env()?;
    config.validate()?;
    let value = serde_json::json!({
        "step": config.step,
        "min_scale": config.min_scale,
        "max_scale": config.max_scale,
    });
    print_json(&value, pretty)
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{rendered}");
    Ok(())
}
