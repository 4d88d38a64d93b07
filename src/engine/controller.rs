use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::SEARCH_TEXT;
use crate::data::service::{FetchError, StockFetchService};
use crate::domain::{PriceRecord, StockIdentifier};

use super::cancellation;
use super::messages::{FetchCompletion, SearchError, SessionId};
use super::session::{SearchSession, SessionStatus};
use super::sink::PresentationSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    InFlight,
}

/// Drives one Search/Cancel button.
///
/// All methods run on the caller's (UI) thread. Fetches run on `runtime` and report
/// back through a channel; nothing touches the session or the sink until
/// [`update`](Self::update) or [`wait_for_completion`](Self::wait_for_completion)
/// applies the result here.
pub struct SearchController {
    service: Arc<dyn StockFetchService>,
    runtime: Handle,

    /// The single session slot. `Some` exactly while a search is in flight.
    session: Option<SearchSession>,
    next_session_id: SessionId,

    completion_tx: UnboundedSender<FetchCompletion>,
    completion_rx: UnboundedReceiver<FetchCompletion>,

    /// Cancels the running search after this long. `None` = wait for the user.
    timeout: Option<Duration>,
}

impl SearchController {
    pub fn new(service: Arc<dyn StockFetchService>, runtime: Handle) -> Self {
        let (completion_tx, completion_rx) = unbounded_channel();
        Self {
            service,
            runtime,
            session: None,
            next_session_id: 1,
            completion_tx,
            completion_rx,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> ControllerState {
        if self.session.is_some() {
            ControllerState::InFlight
        } else {
            ControllerState::Idle
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_identifier(&self) -> Option<&StockIdentifier> {
        self.session.as_ref().map(|s| s.identifier())
    }

    pub fn service_signature(&self) -> &'static str {
        self.service.signature()
    }

    /// The button handler. Starts a search when idle, cancels the running one otherwise.
    /// Never fails: every problem ends up on the sink.
    pub fn on_search_button_pressed(&mut self, raw_identifier: &str, sink: &mut dyn PresentationSink) {
        if let Some(session) = self.session.take() {
            if !session.cancel() {
                log::warn!("Session {} was already cancelled", session.id());
            }
            Self::finish(session, Err(SearchError::CancellationRequested), sink);
            return;
        }

        match StockIdentifier::parse(raw_identifier) {
            Some(identifier) => self.start_session(identifier, sink),
            None => sink.show_error(SEARCH_TEXT.empty_identifier),
        }
    }

    /// Applies every completion that has arrived so far.
    /// Returns true while a search is still running (keep repainting).
    pub fn update(&mut self, sink: &mut dyn PresentationSink) -> bool {
        while let Ok(completion) = self.completion_rx.try_recv() {
            // Stale completions are already logged.
            let _ = self.apply_completion(completion, sink);
        }
        self.is_in_flight()
    }

    /// Waits for the next completion and applies it. Waits forever when nothing
    /// was ever started, so callers should only use it after a press.
    pub async fn wait_for_completion(
        &mut self,
        sink: &mut dyn PresentationSink,
    ) -> Result<SessionStatus, SearchError> {
        // We hold a sender ourselves, so the channel cannot close.
        let Some(completion) = self.completion_rx.recv().await else {
            return Err(SearchError::FetchFailure(
                "Search result channel closed".to_string(),
            ));
        };
        self.apply_completion(completion, sink)
    }

    /// Application exit: cancel and release whatever is running, no sink traffic.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel();
            let summary = session.release(SessionStatus::Cancelled);
            log::debug!(
                "Cancelled session {} ({}) on shutdown",
                summary.id,
                summary.identifier
            );
        }
    }

    // --- INTERNAL LOGIC ---

    fn start_session(&mut self, identifier: StockIdentifier, sink: &mut dyn PresentationSink) {
        let (source, token) = cancellation::create();
        let session_id = self.next_session_id;
        self.next_session_id += 1;

        let mut session = SearchSession::new(session_id, identifier.clone(), source);

        sink.before_loading();
        sink.set_progress_visible(true);
        sink.set_button_label(SEARCH_TEXT.cancel_label);

        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        self.runtime.spawn(async move {
            // Run the fetch in its own task so a panic comes back as a JoinError
            // instead of silently leaving the session in flight.
            let fetch = tokio::spawn(async move { service.fetch(&identifier, token).await });
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => Err(FetchError::Failed(format!("Search failed unexpectedly: {}", e))),
            };
            // Receiver gone means the controller was dropped; nobody to tell.
            let _ = tx.send(FetchCompletion { session_id, result });
        });

        if let Some(timeout) = self.timeout {
            let trigger = session.trigger();
            let watched = trigger.token();
            self.runtime.spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep(timeout) => {
                        if trigger.cancel() {
                            log::info!("Session {} timed out after {:?}", session_id, timeout);
                        }
                    }
                    // Cancelled by the user, or released after finishing.
                    _ = watched.cancelled() => {}
                }
            });
        }

        session.mark_in_flight();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_session_lifecycle {
            log::info!(
                "Session {} started for '{}' via {}",
                session_id,
                session.identifier(),
                self.service.signature()
            );
        }

        self.session = Some(session);
    }

    fn apply_completion(
        &mut self,
        completion: FetchCompletion,
        sink: &mut dyn PresentationSink,
    ) -> Result<SessionStatus, SearchError> {
        let FetchCompletion { session_id, result } = completion;

        match self.session.take_if(|s| s.id() == session_id) {
            Some(session) => Ok(Self::finish(session, result.map_err(SearchError::from), sink)),
            None => {
                let err = SearchError::InvariantViolation {
                    session_id,
                    active: self.session.as_ref().map(|s| s.id()),
                };
                log::warn!("Discarding stale search result: {}", err);
                Err(err)
            }
        }
    }

    /// The single exit path for a session. Surfaces the outcome, then runs the
    /// after-loading steps and releases the token.
    fn finish(
        session: SearchSession,
        outcome: Result<Vec<PriceRecord>, SearchError>,
        sink: &mut dyn PresentationSink,
    ) -> SessionStatus {
        let status = match outcome {
            Ok(records) => {
                sink.show_results(records);
                SessionStatus::Completed
            }
            Err(SearchError::CancellationRequested) => {
                sink.show_notice(SEARCH_TEXT.cancellation_notice);
                SessionStatus::Cancelled
            }
            Err(e) => {
                log::error!("Search for '{}' failed: {}", session.identifier(), e);
                sink.show_error(&e.to_string());
                SessionStatus::Failed
            }
        };

        let summary = session.release(status);

        sink.after_loading(summary.identifier.as_str(), summary.elapsed_ms);
        sink.set_progress_visible(false);
        sink.set_button_label(SEARCH_TEXT.search_label);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_session_lifecycle {
            log::info!(
                "Session {} for '{}' ended {:?} after {}ms",
                summary.id,
                summary.identifier,
                summary.status,
                summary.elapsed_ms
            );
        }

        status
    }
}
