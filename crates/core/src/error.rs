//! Error types for calls to the evaluation service.

use std::fmt;

/// A failed request to the evaluation service.
///
/// `Network` is the transport kind. `Status` and `MalformedBody` are the
/// service kind. Callers that do not care about the distinction can treat
/// every variant the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Could not reach the evaluation service: {0}")]
    Network(String),
    #[error("Evaluation service responded with status {status}")]
    Status { status: u16 },
    #[error("Evaluation service returned a malformed body: {0}")]
    MalformedBody(String),
}

impl RequestError {
    pub fn is_network(&self) -> bool {
        matches!(self, RequestError::Network(_))
    }

    pub fn is_service(&self) -> bool {
        !self.is_network()
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RequestError::Status {
                status: status.as_u16(),
            },
            None if err.is_decode() => RequestError::MalformedBody(err.to_string()),
            None => RequestError::Network(err.to_string()),
        }
    }
}

/// The session action whose request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GenerateQuestion,
    EvaluateAnswer,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::GenerateQuestion => write!(f, "generate question"),
            Action::EvaluateAnswer => write!(f, "evaluate answer"),
        }
    }
}

/// The user-visible error recorded in the session state after a failed call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to {action}: {error}")]
pub struct SessionError {
    pub action: Action,
    #[source]
    pub error: RequestError,
}

impl SessionError {
    pub fn new(action: Action, error: RequestError) -> Self {
        Self { action, error }
    }
}
