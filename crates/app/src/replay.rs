//! Scripted replay of UI events against a site session.
//!
//! Submissions are spawned on a current-thread Tokio runtime so later events
//! are applied while a submission is in flight. A `settle` step waits for
//! every outstanding submission before continuing.

use std::{
    fs,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, warn};
use view_state::{
    ChannelNotifier, Content, Notification, Site, SubmitOutcome, UiEvent, ViewSnapshot,
};

use crate::config::ReplayConfig;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Control {
    Settle,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Step {
    Control(Control),
    Ui(UiEvent),
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplayReport {
    pub(crate) steps: usize,
    pub(crate) scroll_resets: usize,
    pub(crate) outcomes: Vec<SubmitOutcome>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) snapshot: ViewSnapshot,
}

pub(crate) fn run(config: ReplayConfig, content: Arc<Content>) -> Result<()> {
    let script = fs::read_to_string(&config.script)
        .with_context(|| format!("failed to read script {}", config.script.display()))?;
    let steps = parse_script(&script)
        .with_context(|| format!("invalid script {}", config.script.display()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to build replay runtime")?;
    let span = info_span!("replay", steps = steps.len());
    let report = runtime.block_on(replay(steps, content, config).instrument(span))?;

    let json = serde_json::to_string_pretty(&report).context("failed to encode snapshot")?;
    println!("{json}");
    Ok(())
}

fn parse_script(script: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(script)
}

async fn replay(
    steps: Vec<Step>,
    content: Arc<Content>,
    config: ReplayConfig,
) -> Result<ReplayReport> {
    let (notifier, toasts) = ChannelNotifier::new();
    let resets = Arc::new(AtomicUsize::new(0));
    let counter = resets.clone();
    let mut site = Site::new(
        content,
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            debug!("scroll reset");
        },
        Arc::new(config.submitter),
        Arc::new(notifier),
    );

    let mut in_flight: Vec<JoinHandle<SubmitOutcome>> = Vec::new();
    let mut outcomes = Vec::new();
    let total = steps.len();

    for step in steps {
        match step {
            Step::Control(Control::Settle) => settle(&mut in_flight, &mut outcomes).await?,
            Step::Ui(event) => {
                if let Some(pending) = site.dispatch(event) {
                    in_flight.push(tokio::spawn(pending));
                }
            }
        }
    }

    if !in_flight.is_empty() {
        warn!(
            pending = in_flight.len(),
            "script ended with submissions in flight; settling"
        );
        settle(&mut in_flight, &mut outcomes).await?;
    }

    let report = ReplayReport {
        steps: total,
        scroll_resets: resets.load(Ordering::SeqCst),
        outcomes,
        notifications: toasts.try_iter().collect(),
        snapshot: site.snapshot(),
    };
    info!(
        page = %report.snapshot.page,
        submissions = report.outcomes.len(),
        "replay finished"
    );
    Ok(report)
}

async fn settle(
    in_flight: &mut Vec<JoinHandle<SubmitOutcome>>,
    outcomes: &mut Vec<SubmitOutcome>,
) -> Result<()> {
    for handle in in_flight.drain(..) {
        let outcome = handle.await.context("submission task panicked")?;
        debug!(?outcome, "submission settled");
        outcomes.push(outcome);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use view_state::{Page, Severity, SimulatedSubmitter, SubmissionState};

    use super::*;

    fn config(submitter: SimulatedSubmitter) -> ReplayConfig {
        ReplayConfig {
            script: PathBuf::from("inline.json"),
            submitter,
        }
    }

    const CONTACT_SCRIPT: &str = r#"[
        {"event": "toggle_menu"},
        {"event": "navigate", "page": "contact", "from_menu": true},
        {"event": "input", "field": "name", "value": "Jane Doe"},
        {"event": "input", "field": "email", "value": "jane@uni.edu"},
        {"event": "input", "field": "organization", "value": "UTN"},
        {"event": "input", "field": "message", "value": "Hello"},
        {"event": "submit"},
        {"event": "input", "field": "name", "value": "ignored"},
        {"event": "settle"}
    ]"#;

    #[test]
    fn settle_is_a_control_step() {
        let steps = parse_script(CONTACT_SCRIPT).unwrap();
        assert_eq!(steps.len(), 9);
        assert_eq!(steps[8], Step::Control(Control::Settle));
        assert!(matches!(steps[0], Step::Ui(UiEvent::ToggleMenu)));
    }

    #[tokio::test(start_paused = true)]
    async fn contact_script_succeeds() {
        let steps = parse_script(CONTACT_SCRIPT).unwrap();
        let report = replay(
            steps,
            Arc::new(Content::builtin().unwrap()),
            config(SimulatedSubmitter::default()),
        )
        .await
        .unwrap();

        assert_eq!(report.outcomes, vec![SubmitOutcome::Succeeded]);
        assert_eq!(report.scroll_resets, 1);
        assert!(!report.snapshot.menu_open);
        assert_eq!(report.snapshot.page, Page::Contact);
        let contact = report.snapshot.contact.unwrap();
        assert_eq!(contact.state, SubmissionState::Idle);
        assert!(contact.values.name.is_empty());
        assert_eq!(report.notifications[0].severity, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_script_keeps_values() {
        let steps = parse_script(CONTACT_SCRIPT).unwrap();
        let report = replay(
            steps,
            Arc::new(Content::builtin().unwrap()),
            config(SimulatedSubmitter::failing(Duration::from_millis(50))),
        )
        .await
        .unwrap();

        assert_eq!(report.outcomes, vec![SubmitOutcome::Failed]);
        assert_eq!(report.snapshot.contact.unwrap().values.name, "Jane Doe");
        assert_eq!(report.notifications[0].severity, Severity::Failure);
    }
}
