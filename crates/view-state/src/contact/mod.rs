//! Contact form: field rules, the submission state machine, notifications and
//! the form handle that ties them together.

mod fields;
mod form;
mod notify;
mod submission;

pub use fields::{Field, FieldErrors, FormValues, is_valid_email};
pub use form::{
    ContactForm, ContactView, FAILURE_MESSAGE, PendingSubmission, SUCCESS_MESSAGE, SubmitOutcome,
};
pub use notify::{ChannelNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use submission::{
    DEFAULT_SUBMIT_DELAY, SimulatedSubmitter, SubmissionError, SubmissionMachine,
    SubmissionState, SubmissionTicket, Submitter,
};
