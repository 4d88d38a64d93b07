use std::fmt;

use crate::data::service::{FetchError, FetchResult};

pub type SessionId = u64;

/// Sent by the fetch task back to the controller's thread.
#[derive(Debug)]
pub struct FetchCompletion {
    pub session_id: SessionId,
    pub result: FetchResult,
}

/// Everything that can end a search other than success.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The user (or a timeout) cancelled the search. Expected, not a failure.
    CancellationRequested,
    /// The data source failed; a new click retries.
    FetchFailure(String),
    /// A completion arrived for a session that is no longer active.
    InvariantViolation {
        session_id: SessionId,
        active: Option<SessionId>,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::CancellationRequested => write!(f, "Cancellation requested"),
            SearchError::FetchFailure(msg) => write!(f, "{}", msg),
            SearchError::InvariantViolation { session_id, active } => write!(
                f,
                "Result for session {} arrived while active session is {:?}",
                session_id, active
            ),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<FetchError> for SearchError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Cancelled => SearchError::CancellationRequested,
            FetchError::Failed(msg) => SearchError::FetchFailure(msg),
        }
    }
}
