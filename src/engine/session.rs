use crate::domain::StockIdentifier;
use crate::utils::app_time::{AppInstant, now};

use super::cancellation::CancellationSource;
use super::messages::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    InFlight,
    Completed,
    Cancelled,
    Failed,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::Failed
        )
    }
}

/// One click-to-outcome search. Owned by the controller's single session slot;
/// consumed by [`SearchSession::release`], which also disposes of its trigger.
pub struct SearchSession {
    id: SessionId,
    identifier: StockIdentifier,
    source: CancellationSource,
    started_at: AppInstant,
    status: SessionStatus,
}

/// What is left of a session after release.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub id: SessionId,
    pub identifier: StockIdentifier,
    pub status: SessionStatus,
    pub elapsed_ms: u128,
}

impl SearchSession {
    /// Starts the stopwatch.
    pub fn new(id: SessionId, identifier: StockIdentifier, source: CancellationSource) -> Self {
        Self {
            id,
            identifier,
            source,
            started_at: now(),
            status: SessionStatus::Idle,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn identifier(&self) -> &StockIdentifier {
        &self.identifier
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }

    pub fn mark_in_flight(&mut self) {
        self.status = SessionStatus::InFlight;
    }

    /// A second trigger for the same token (used by the timeout timer).
    pub fn trigger(&self) -> CancellationSource {
        self.source.clone()
    }

    pub fn cancel(&self) -> bool {
        self.source.cancel()
    }

    /// Moves the session to its terminal `status` and disposes of the trigger.
    pub fn release(mut self, status: SessionStatus) -> SessionSummary {
        debug_assert!(status.is_terminal(), "released with non-terminal {:?}", status);
        debug_assert_eq!(self.status, SessionStatus::InFlight, "session {} never started", self.id);
        self.status = status;
        let elapsed_ms = self.elapsed_ms();
        self.source.release();

        SessionSummary {
            id: self.id,
            identifier: self.identifier,
            status: self.status,
            elapsed_ms,
        }
    }
}
