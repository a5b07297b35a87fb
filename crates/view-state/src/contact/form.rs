//! Contact form handle.
//!
//! The handle is the sole strong owner of the form state. An in-flight
//! submission only keeps a weak reference, so when the contact page is
//! unmounted mid-flight the late result finds nothing to write into and is
//! dropped.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    fields::{Field, FieldErrors, FormValues},
    notify::{Notification, Notifier},
    submission::{
        SubmissionError, SubmissionMachine, SubmissionState, SubmissionTicket, Submitter,
    },
};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Completion of a [`ContactForm::submit`] call.
pub type PendingSubmission = Pin<Box<dyn Future<Output = SubmitOutcome> + Send + 'static>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "errors")]
pub enum SubmitOutcome {
    /// Field rules failed; the submission was never started.
    Invalid(FieldErrors),
    /// A submission was already in flight.
    Ignored,
    Succeeded,
    Failed,
    /// The form was unmounted before the call settled.
    Discarded,
}

impl SubmitOutcome {
    fn label(&self) -> &'static str {
        match self {
            SubmitOutcome::Invalid(_) => "invalid",
            SubmitOutcome::Ignored => "ignored",
            SubmitOutcome::Succeeded => "succeeded",
            SubmitOutcome::Failed => "failed",
            SubmitOutcome::Discarded => "discarded",
        }
    }
}

#[derive(Debug, Default)]
struct FormState {
    values: FormValues,
    errors: FieldErrors,
    machine: SubmissionMachine,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// What the contact page renders.
pub struct ContactView {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub state: SubmissionState,
    /// Inputs and the submit button are disabled while a submission is in flight.
    pub inputs_enabled: bool,
}

pub struct ContactForm {
    state: Arc<Mutex<FormState>>,
    submitter: Arc<dyn Submitter>,
    notifier: Arc<dyn Notifier>,
}

impl ContactForm {
    pub fn new(submitter: Arc<dyn Submitter>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            submitter,
            notifier,
        }
    }

    pub fn view(&self) -> ContactView {
        let state = lock(&self.state);
        ContactView {
            values: state.values.clone(),
            errors: state.errors.clone(),
            state: state.machine.state(),
            inputs_enabled: !state.machine.is_submitting(),
        }
    }

    pub fn values(&self) -> FormValues {
        lock(&self.state).values.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        lock(&self.state).errors.clone()
    }

    pub fn state(&self) -> SubmissionState {
        lock(&self.state).machine.state()
    }

    /// Update a field. Ignored while submitting. A field already showing an
    /// error is re-validated on every change.
    pub fn input(&self, field: Field, value: impl Into<String>) -> bool {
        let mut state = lock(&self.state);
        if state.machine.is_submitting() {
            debug!(field = field.as_str(), "input ignored while submitting");
            return false;
        }
        state.values.set(field, value);
        if state.errors.contains(field) {
            let message = state.values.check(field);
            state.errors.set(field, message);
        }
        true
    }

    /// Validate a single field when it loses focus.
    pub fn blur(&self, field: Field) -> Option<&'static str> {
        let mut state = lock(&self.state);
        let message = state.values.check(field);
        state.errors.set(field, message);
        message
    }

    /// Validate and start a submission.
    ///
    /// Validation and the idle → submitting transition happen before this
    /// returns; the returned future drives the external call and applies its
    /// result. Calling `submit` while another submission is in flight yields
    /// [`SubmitOutcome::Ignored`] without touching any state. Dropping the
    /// returned future before it completes returns the form to idle with the
    /// entered values kept.
    pub fn submit(&self) -> PendingSubmission {
        let started = self
            .begin()
            .map(|ticket| InFlight::new(Arc::downgrade(&self.state), ticket));
        let submitter = self.submitter.clone();
        let notifier = self.notifier.clone();

        Box::pin(async move {
            let mut in_flight = match started {
                Ok(in_flight) => in_flight,
                Err(outcome) => return outcome,
            };

            let result = submitter.submit().await;

            let (Some(state), Some(ticket)) = (in_flight.state.upgrade(), in_flight.disarm())
            else {
                debug!("contact form unmounted during submission; result discarded");
                record(&SubmitOutcome::Discarded);
                return SubmitOutcome::Discarded;
            };

            let (outcome, notification) = settle(&state, ticket, result);
            if let Some(notification) = notification {
                notifier.notify(notification);
            }
            record(&outcome);
            outcome
        })
    }

    fn begin(&self) -> Result<SubmissionTicket, SubmitOutcome> {
        let mut state = lock(&self.state);
        if state.machine.is_submitting() {
            debug!("submit ignored: a submission is already in flight");
            return Err(SubmitOutcome::Ignored);
        }
        if let Err(errors) = state.values.validate() {
            debug!(invalid = errors.len(), "submit blocked by field errors");
            state.errors = errors.clone();
            let outcome = SubmitOutcome::Invalid(errors);
            record(&outcome);
            return Err(outcome);
        }
        state.errors = FieldErrors::default();
        state.machine.begin().map_err(|err| {
            warn!("submission not started: {err}");
            SubmitOutcome::Ignored
        })
    }
}

impl fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactForm")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        if lock(&self.state).machine.is_submitting() {
            debug!("contact form torn down with a submission in flight");
        }
    }
}

/// Ticket of a started submission. Dropped before the call settles, it puts
/// the machine back to idle and keeps the entered values.
struct InFlight {
    state: Weak<Mutex<FormState>>,
    ticket: Option<SubmissionTicket>,
}

impl InFlight {
    fn new(state: Weak<Mutex<FormState>>, ticket: SubmissionTicket) -> Self {
        Self {
            state,
            ticket: Some(ticket),
        }
    }

    fn disarm(&mut self) -> Option<SubmissionTicket> {
        self.ticket.take()
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        let Some(state) = self.state.upgrade() else {
            return;
        };
        if lock(&state).machine.abandon(ticket).is_ok() {
            debug!("submission dropped before completion; form back to idle");
            record(&SubmitOutcome::Discarded);
        }
    }
}

/// Apply the call's result: success clears the form, failure keeps the
/// entered values. Either way the machine returns to idle.
fn settle(
    state: &Mutex<FormState>,
    ticket: SubmissionTicket,
    result: Result<(), SubmissionError>,
) -> (SubmitOutcome, Option<Notification>) {
    let mut state = lock(state);
    match state.machine.settle(ticket, &result) {
        Ok(SubmissionState::Succeeded) => {
            state.values = FormValues::default();
            state.errors = FieldErrors::default();
            state.machine.reset();
            (
                SubmitOutcome::Succeeded,
                Some(Notification::success(SUCCESS_MESSAGE)),
            )
        }
        Ok(_) => {
            if let Err(err) = &result {
                debug!("submission failed: {err}");
            }
            state.machine.reset();
            (
                SubmitOutcome::Failed,
                Some(Notification::failure(FAILURE_MESSAGE)),
            )
        }
        Err(err) => {
            warn!("submission result dropped: {err}");
            (SubmitOutcome::Discarded, None)
        }
    }
}

fn record(outcome: &SubmitOutcome) {
    metrics::counter!("site_submissions_total", "outcome" => outcome.label()).increment(1);
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::Receiver;

    use super::*;
    use crate::contact::{ChannelNotifier, Severity, SimulatedSubmitter};

    fn form_with(submitter: SimulatedSubmitter) -> (ContactForm, Receiver<Notification>) {
        let (notifier, rx) = ChannelNotifier::new();
        (
            ContactForm::new(Arc::new(submitter), Arc::new(notifier)),
            rx,
        )
    }

    fn fill(form: &ContactForm) {
        form.input(Field::Name, "Jane Doe");
        form.input(Field::Email, "jane@uni.edu");
        form.input(Field::Organization, "ESPOL");
        form.input(Field::Message, "Hello");
    }

    #[tokio::test(start_paused = true)]
    async fn success_clears_fields() {
        let (form, rx) = form_with(SimulatedSubmitter::default());
        fill(&form);

        let pending = form.submit();
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert!(!form.view().inputs_enabled);

        assert_eq!(pending.await, SubmitOutcome::Succeeded);
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.values(), FormValues::default());
        assert_eq!(
            rx.try_recv().unwrap(),
            Notification::success(SUCCESS_MESSAGE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_values() {
        let (form, rx) = form_with(SimulatedSubmitter::failing(Duration::from_millis(10)));
        fill(&form);

        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.values().name, "Jane Doe");
        assert_eq!(rx.try_recv().unwrap().severity, Severity::Failure);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_form_never_starts() {
        let (form, rx) = form_with(SimulatedSubmitter::default());
        form.input(Field::Name, "Jane Doe");
        form.input(Field::Email, "jane@uni.edu");
        form.input(Field::Organization, "UIS");

        let outcome = form.submit().await;
        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected field errors, got {outcome:?}");
        };
        assert_eq!(errors.get(Field::Message), Some("Message is required"));
        assert_eq!(form.errors().get(Field::Message), Some("Message is required"));
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_in_flight_is_ignored() {
        let (form, rx) = form_with(SimulatedSubmitter::default());
        fill(&form);

        let first = form.submit();
        assert_eq!(form.submit().await, SubmitOutcome::Ignored);
        assert!(rx.try_recv().is_err());
        assert_eq!(form.state(), SubmissionState::Submitting);

        assert_eq!(first.await, SubmitOutcome::Succeeded);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_discards_late_result() {
        let (form, rx) = form_with(SimulatedSubmitter::default());
        fill(&form);

        let pending = form.submit();
        drop(form);
        assert_eq!(pending.await, SubmitOutcome::Discarded);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_submission_returns_to_idle() {
        let (form, rx) = form_with(SimulatedSubmitter::default());
        fill(&form);

        drop(form.submit());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(form.input(Field::Name, "Jane Q. Doe"));
        assert_eq!(form.values().message, "Hello");

        let timed_out = tokio::time::timeout(Duration::from_millis(100), form.submit()).await;
        assert!(timed_out.is_err());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(rx.try_recv().is_err());

        assert_eq!(form.submit().await, SubmitOutcome::Succeeded);
        assert_eq!(rx.try_recv().unwrap().severity, Severity::Success);
    }

    #[test]
    fn input_disabled_while_submitting() {
        let (form, _rx) = form_with(SimulatedSubmitter::default());
        fill(&form);
        let _pending = form.submit();
        assert!(!form.input(Field::Name, "Someone Else"));
        assert_eq!(form.values().name, "Jane Doe");
    }

    #[test]
    fn blur_validates_and_input_revalidates() {
        let (form, _rx) = form_with(SimulatedSubmitter::default());
        form.input(Field::Email, "jane@");
        assert_eq!(form.blur(Field::Email), Some("Enter a valid email address"));
        form.input(Field::Email, "jane@uni.edu");
        assert!(form.errors().is_empty());
    }
}
