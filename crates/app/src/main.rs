mod cli;
mod config;
mod replay;
mod server;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use view_state::MarkerProjection;

use crate::{
    cli::{Cli, Command},
    config::{ServeConfig, TelemetryOptions, load_content},
};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init(&TelemetryOptions::from(&cli))?;
    telemetry::init_metrics_recorder()?;

    let content = Arc::new(load_content(cli.content.as_ref())?);

    match cli.command {
        Command::Serve(args) => server::run(ServeConfig::try_from(args)?, content),
        Command::Replay(args) => replay::run(args.into(), content),
        Command::Markers => {
            let markers =
                MarkerProjection::new(&content.coordinates).place(content.institutions());
            let json = serde_json::to_string_pretty(&markers).context("failed to encode markers")?;
            println!("{json}");
            Ok(())
        }
    }
}
