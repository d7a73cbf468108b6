//! Lifecycle of the current analysis.
//!
//! [`AnalysisSession`] exclusively owns the [`SessionState`]; every state change goes through
//! `transition`. A search is split into `begin_search` (synchronous, stamps a generation) and
//! `settle_search` (applies the outcome only if that generation is still current), so a late
//! completion can never overwrite a newer or disposed session.

use crate::backend::AnalysisBackend;
use crate::domain::analysis::AnalysisResult;
use crate::domain::request::SearchRequest;
use crate::notice::{Notice, ANALYZE_FAILED_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Success(AnalysisResult),
    Failed(String),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Success(_) => "success",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// Proof that a search was dispatched. Consumed by [`AnalysisSession::settle_search`].
#[derive(Debug)]
pub struct SearchTicket {
    generation: u64,
    request: SearchRequest,
}

impl SearchTicket {
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Succeeded,
    Failed,
    /// The session moved on (or was disposed) before the call settled; nothing was applied.
    Stale,
}

#[derive(Debug)]
pub struct AnalysisSession<B> {
    backend: B,
    state: SessionState,
    generation: u64,
    disposed: bool,
}

impl<B> AnalysisSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SessionState::Idle,
            generation: 0,
            disposed: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.state.result()
    }

    /// Also the "input disabled" flag of the search form.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn can_forward(&self) -> bool {
        !self.disposed && self.state.result().is_some()
    }

    /// Moves to Loading and returns a ticket for the analyze call, or `None` if a search is
    /// already in flight or the session was disposed.
    pub fn begin_search(&mut self, request: SearchRequest) -> Option<SearchTicket> {
        if self.disposed {
            tracing::debug!("search ignored: session disposed");
            return None;
        }
        if self.state.is_loading() {
            tracing::debug!(generation = self.generation, "search ignored: already loading");
            return None;
        }

        self.generation += 1;
        self.transition(SessionState::Loading);
        tracing::info!(
            generation = self.generation,
            keywords = ?request.keywords(),
            markets = ?request.markets(),
            "analysis dispatched"
        );

        Some(SearchTicket {
            generation: self.generation,
            request,
        })
    }

    pub fn settle_search(
        &mut self,
        ticket: SearchTicket,
        outcome: anyhow::Result<AnalysisResult>,
    ) -> Settlement {
        if self.disposed || ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                disposed = self.disposed,
                "discarding stale analysis outcome"
            );
            return Settlement::Stale;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(
                    generation = ticket.generation,
                    themes = result.themes.len(),
                    stocks = result.recommended_stocks.len(),
                    "analysis succeeded"
                );
                self.transition(SessionState::Success(result));
                Settlement::Succeeded
            }
            Err(err) => {
                tracing::error!(generation = ticket.generation, error = %err, "analysis failed");
                self.transition(SessionState::Failed(ANALYZE_FAILED_MESSAGE.to_string()));
                Settlement::Failed
            }
        }
    }

    /// Tears the session down. Outcomes of calls still in flight are discarded.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "session disposed");
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "session transition");
        self.state = next;
    }
}

impl<B: AnalysisBackend> AnalysisSession<B> {
    /// Runs one analysis. Returns `None` when the dispatch was ignored.
    pub async fn start_search(&mut self, request: SearchRequest) -> Option<Settlement> {
        let ticket = self.begin_search(request)?;
        let outcome = self.backend.analyze(ticket.request()).await;
        Some(self.settle_search(ticket, outcome))
    }

    /// Sends the held result to the notification channel as-is.
    ///
    /// Returns `None` without any network call unless the session holds a successful result.
    /// The outcome is reported only through the returned notice; the state is left untouched.
    pub async fn forward(&self) -> Option<Notice> {
        if self.disposed {
            return None;
        }
        let Some(result) = self.state.result() else {
            tracing::debug!(state = self.state.name(), "forward ignored: no result held");
            return None;
        };

        match self.backend.forward(result).await {
            Ok(()) => {
                tracing::info!("analysis forwarded");
                Some(Notice::forward_sent())
            }
            Err(err) => {
                tracing::warn!(error = %err, "forwarding analysis failed");
                Some(Notice::forward_failed())
            }
        }
    }
}
