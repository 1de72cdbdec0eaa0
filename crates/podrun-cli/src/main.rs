//! PodRun CLI - offline tooling for CoPilot injection and phase mapping.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use k8s_openapi::api::core::v1::{Pod, PodSpec};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use podrun_core::{DataLoadingConfig, TaskPaths, TypedInterface};
use podrun_pilot::{add_copilot_to_pod, reconcile, CoPilotConfig, CustomState, TaskMetadata};

/// PodRun CLI - CoPilot injection and phase mapping tool
#[derive(Parser)]
#[command(name = "podrun")]
#[command(about = "Inspect CoPilot pod injection and pod phase mapping", long_about = None)]
struct Cli {
    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a task pod spec with CoPilot injected
    Inject {
        /// Task document (pod, interface, metadata, paths, data_loading)
        #[arg(short, long)]
        task: PathBuf,

        /// CoPilot config overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Derive the task phase of an observed pod and the next persisted state
    Phase {
        /// Observed pod (`null` when not found)
        #[arg(short, long)]
        pod: PathBuf,

        /// State persisted by the previous poll
        #[arg(short, long)]
        state: Option<PathBuf>,
    },
}

/// Everything needed to build one task pod.
#[derive(Deserialize)]
struct TaskDocument {
    pod: PodSpec,
    #[serde(default)]
    interface: Option<TypedInterface>,
    metadata: TaskMetadata,
    #[serde(default)]
    paths: TaskPaths,
    #[serde(default)]
    data_loading: Option<DataLoadingConfig>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for JSON output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Inject { task, config } => {
            inject(&task, config.as_deref())?;
        }
        Commands::Phase { pod, state } => {
            phase(&pod, state.as_deref())?;
        }
    }

    Ok(())
}

fn inject(task_path: &Path, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config: CoPilotConfig = match config_path {
        Some(path) => read_json(path)?,
        None => CoPilotConfig::default(),
    };
    let mut task: TaskDocument = read_json(task_path)?;

    info!(
        task = %task.metadata.id,
        enabled = task.data_loading.as_ref().is_some_and(|d| d.enabled),
        "Injecting CoPilot"
    );

    add_copilot_to_pod(
        &config,
        &mut task.pod,
        task.interface.as_ref(),
        &task.metadata,
        &task.paths,
        &task.paths,
        task.data_loading.as_ref(),
    )?;

    println!("{}", serde_json::to_string_pretty(&task.pod)?);
    Ok(())
}

fn phase(pod_path: &Path, state_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let pod: Option<Pod> = read_json(pod_path)?;
    let previous: Option<CustomState> = match state_path {
        Some(path) => Some(read_json(path)?),
        None => None,
    };

    let result = reconcile(previous.as_ref(), pod.as_ref())?;
    info!(phase = %result.phase.phase, "Derived task phase");

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    debug!(path = %path.display(), "Reading JSON document");
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
    Ok(value)
}
