//! Translation of CLI arguments into the configuration each command runs with.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use view_state::{Content, SimulatedSubmitter};

use crate::cli::{Cli, ReplayArgs, ServeArgs};

#[derive(Clone, Debug, Default)]
/// Optional telemetry knobs for tracing.
pub struct TelemetryOptions {
    /// Write a Chrome trace JSON file capturing spans.
    pub chrome_trace_path: Option<PathBuf>,
}

impl From<&Cli> for TelemetryOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            chrome_trace_path: cli.chrome_trace.clone(),
        }
    }
}

/// Load the content file, or the built-in dataset when no path is given.
pub fn load_content(path: Option<&PathBuf>) -> Result<Content> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read content file {}", path.display()))?;
            Content::from_json(&json)
                .with_context(|| format!("invalid content file {}", path.display()))
        }
        None => Content::builtin().context("built-in content failed to load"),
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = anyhow::Error;

    fn try_from(args: ServeArgs) -> Result<Self> {
        let host = args.host.trim().to_string();
        if host.is_empty() {
            bail!("--host must not be empty");
        }
        if args.port == 0 {
            bail!("--port must be between 1 and 65535");
        }
        Ok(Self {
            host,
            port: args.port,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ReplayConfig {
    pub script: PathBuf,
    pub submitter: SimulatedSubmitter,
}

impl From<ReplayArgs> for ReplayConfig {
    fn from(args: ReplayArgs) -> Self {
        let delay = Duration::from_millis(args.submit_delay_ms);
        let submitter = if args.fail_submissions {
            SimulatedSubmitter::failing(delay)
        } else {
            SimulatedSubmitter::new(delay)
        };
        Self {
            script: args.script,
            submitter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_when_no_path() {
        let content = load_content(None).unwrap();
        assert_eq!(content.institutions().count(), 6);
    }

    #[test]
    fn missing_content_file_names_the_path() {
        let path = PathBuf::from("/nonexistent/stars-content.json");
        let err = load_content(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("stars-content.json"));
    }

    #[test]
    fn port_zero_rejected() {
        let args = ServeArgs {
            host: "127.0.0.1".into(),
            port: 0,
        };
        assert!(ServeConfig::try_from(args).is_err());
    }
}
