use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Host for the STARS site view-state layer.
#[derive(Debug, Parser)]
#[command(name = "stars", version, about)]
pub struct Cli {
    /// JSON content file used instead of the built-in STARS dataset.
    #[arg(long, global = true, value_name = "PATH")]
    pub content: Option<PathBuf>,
    /// Emit Chrome trace JSON for post-mortem analysis.
    #[arg(long = "chrome-trace", global = true, value_name = "PATH")]
    pub chrome_trace: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the read-only content API and Prometheus metrics.
    Serve(ServeArgs),
    /// Drive a site session with a scripted list of UI events.
    Replay(ReplayArgs),
    /// Print the placed partner markers.
    Markers,
}

/// CLI arguments accepted by the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "STARS_HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, env = "STARS_PORT", default_value_t = 8080)]
    pub port: u16,
}

/// CLI arguments accepted by the `replay` subcommand.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON array of events, e.g. `[{"event": "navigate", "page": "faq"}]`.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
    /// Make every simulated submission fail.
    #[arg(long = "fail-submissions", action = clap::ArgAction::SetTrue)]
    pub fail_submissions: bool,
    /// Delay of the simulated submission call.
    #[arg(long = "submit-delay-ms", value_name = "MS", default_value_t = 1_500)]
    pub submit_delay_ms: u64,
}
