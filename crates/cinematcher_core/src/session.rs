//! crates/cinematcher_core/src/session.rs
//!
//! The session controller. It owns the `SessionState`, feeds actions through
//! `reduce`, and runs the resulting effects against the injected recommendation
//! service and store. Presentation concerns come back to the caller as `UiSignal`s.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use crate::catalog;
use crate::domain::TimeBucket;
use crate::ports::{KeyValueStore, PortError, RecommendationService};
use crate::state::{reduce, Action, Effect, SessionState};
use crate::store::StateStore;

/// Things the presentation layer should do after an action settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    ScrollToResults,
}

pub struct Session {
    state: SessionState,
    recommender: Arc<dyn RecommendationService>,
    store: StateStore,
}

impl Session {
    /// Starts a session, loading the saved watchlist and history once.
    pub fn start(
        recommender: Arc<dyn RecommendationService>,
        backend: Arc<dyn KeyValueStore>,
    ) -> Self {
        let store = StateStore::new(backend);
        let state = SessionState::with_saved(store.load_watchlist(), store.load_history());
        info!(
            watchlist = state.watchlist.len(),
            history = state.history.len(),
            "Session started"
        );
        Self {
            state,
            recommender,
            store,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies `action` and every action its effects produce, until the state settles.
    pub async fn dispatch(&mut self, action: Action) -> Vec<UiSignal> {
        let mut signals = Vec::new();
        let mut pending = VecDeque::from([action]);

        while let Some(action) = pending.pop_front() {
            for effect in reduce(&mut self.state, action) {
                match effect {
                    Effect::FetchMatch { time, clues } => {
                        pending.push_back(self.fetch(time, &clues).await);
                    }
                    Effect::PersistWatchlist => {
                        if let Err(e) = self.store.save_watchlist(&self.state.watchlist) {
                            warn!(error = %e, "Failed to persist the watchlist");
                        }
                    }
                    Effect::PersistHistory => {
                        if let Err(e) = self.store.save_history(&self.state.history) {
                            warn!(error = %e, "Failed to persist the history");
                        }
                    }
                    Effect::RemoveHistory => {
                        if let Err(e) = self.store.remove_history() {
                            warn!(error = %e, "Failed to remove the saved history");
                        }
                    }
                    Effect::ScrollToResults => signals.push(UiSignal::ScrollToResults),
                }
            }
        }

        signals
    }

    pub async fn submit(&mut self) -> Vec<UiSignal> {
        self.dispatch(Action::Submit).await
    }

    pub async fn select_time(&mut self, time: TimeBucket) {
        self.dispatch(Action::SelectTime(time)).await;
    }

    pub async fn set_clue(&mut self, index: usize, text: impl Into<String>) {
        self.dispatch(Action::SetClue {
            index,
            text: text.into(),
        })
        .await;
    }

    /// Fills the form from the surprise catalog using the given random source.
    pub async fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let catalog::Surprise { clues, time } = catalog::surprise(rng);
        self.dispatch(Action::ApplySurprise { clues, time }).await;
    }

    async fn fetch(&self, time: TimeBucket, clues: &[String]) -> Action {
        info!(time = %time, clues = clues.len(), "Requesting recommendations");
        match self.recommender.fetch_match(time, clues).await {
            Ok(result) => Action::MatchSucceeded(result),
            Err(PortError::Service(message)) => {
                warn!(%message, "Recommendation request failed");
                Action::MatchFailed(message)
            }
            Err(other) => {
                warn!(error = %other, "Recommendation request failed");
                Action::MatchFailed(other.to_string())
            }
        }
    }
}
