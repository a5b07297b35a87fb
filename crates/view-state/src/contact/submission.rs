//! Submission state machine and the external submission collaborator.
//!
//! Transitions are strictly idle → submitting → succeeded | failed, and a
//! settled machine must be reset before the next `begin`.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{Error, Result};

/// Delay of the simulated submission call.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1_500);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn label(self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, PartialEq, Eq)]
/// Proof that a submission was started; consumed when it settles.
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct SubmissionMachine {
    state: SubmissionState,
    generation: u64,
}

impl SubmissionMachine {
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// idle → submitting.
    pub fn begin(&mut self) -> Result<SubmissionTicket> {
        if self.state != SubmissionState::Idle {
            return Err(Error::NotIdle(self.state));
        }
        self.generation = self.generation.wrapping_add(1);
        self.state = SubmissionState::Submitting;
        debug!(generation = self.generation, "submission started");
        Ok(SubmissionTicket(self.generation))
    }

    /// submitting → succeeded | failed, depending on the external call's result.
    pub fn settle(
        &mut self,
        ticket: SubmissionTicket,
        result: &std::result::Result<(), SubmissionError>,
    ) -> Result<SubmissionState> {
        if self.state != SubmissionState::Submitting || ticket.0 != self.generation {
            return Err(Error::StaleTicket(ticket.0));
        }
        self.state = match result {
            Ok(()) => SubmissionState::Succeeded,
            Err(_) => SubmissionState::Failed,
        };
        debug!(generation = ticket.0, state = %self.state, "submission settled");
        Ok(self.state)
    }

    /// submitting → idle without a result, for a call that will never settle.
    pub fn abandon(&mut self, ticket: SubmissionTicket) -> Result<()> {
        if self.state != SubmissionState::Submitting || ticket.0 != self.generation {
            return Err(Error::StaleTicket(ticket.0));
        }
        self.state = SubmissionState::Idle;
        debug!(generation = ticket.0, "submission abandoned");
        Ok(())
    }

    /// succeeded | failed → idle. Has no effect while idle or submitting.
    pub fn reset(&mut self) -> bool {
        match self.state {
            SubmissionState::Succeeded | SubmissionState::Failed => {
                self.state = SubmissionState::Idle;
                true
            }
            SubmissionState::Idle | SubmissionState::Submitting => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// The external submission call. Only success or failure is observed.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self) -> std::result::Result<(), SubmissionError>;
}

#[derive(Clone, Debug)]
/// Stand-in for a backend: waits, then resolves to a fixed outcome.
pub struct SimulatedSubmitter {
    delay: Duration,
    fail: bool,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    pub fn failing(delay: Duration) -> Self {
        Self { delay, fail: true }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self) -> std::result::Result<(), SubmissionError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            Err(SubmissionError::Rejected("simulated failure".into()))
        } else {
            Ok(())
        }
    }
}
