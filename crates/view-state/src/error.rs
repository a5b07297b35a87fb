use thiserror::Error;

use crate::contact::SubmissionState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown page identifier: {0:?}")]
    InvalidPage(String),

    #[error("coordinate out of range: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("submission cannot start while {0}")]
    NotIdle(SubmissionState),

    #[error("stale submission ticket #{0}")]
    StaleTicket(u64),

    #[error("content error: {0}")]
    Content(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Content(err.to_string())
    }
}
