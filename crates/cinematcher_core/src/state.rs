//! crates/cinematcher_core/src/state.rs
//!
//! The session state and its pure transition function. `reduce` never performs
//! I/O; it returns the effects the caller must run (persisting, fetching,
//! scrolling) after the state has been updated.

use tracing::{debug, warn};

use crate::domain::{ClueSet, MatchResult, Recommendation, TimeBucket, HISTORY_LIMIT};

/// Shown when a failed request carries no message of its own.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Un villain ha interrotto la connessione. Riprova!";

/// Pre-flight checks on the form. Raised locally, no request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Hero, abbiamo bisogno del tuo tempo disponibile!")]
    MissingTime,
    #[error("Dimmi almeno una cosa che cerchi per iniziare la missione!")]
    NoClues,
}

/// Lifecycle of the last request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Submitting,
    Resolved(MatchResult),
    Failed(String),
}

/// Everything a single session holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub selected_time: Option<TimeBucket>,
    pub clues: ClueSet,
    pub status: RequestStatus,
    /// The result on display. Kept through failures until the next success.
    pub result: Option<MatchResult>,
    pub watchlist: Vec<Recommendation>,
    /// Most recent first, at most `HISTORY_LIMIT` entries.
    pub history: Vec<MatchResult>,
    pub history_open: bool,
}

impl SessionState {
    /// A fresh session over previously persisted collections.
    pub fn with_saved(watchlist: Vec<Recommendation>, mut history: Vec<MatchResult>) -> Self {
        history.truncate(HISTORY_LIMIT);
        Self {
            watchlist,
            history,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == RequestStatus::Submitting
    }

    pub fn is_in_watchlist(&self, title: &str) -> bool {
        self.watchlist.iter().any(|entry| entry.title == title)
    }

    pub fn watchlist_len(&self) -> usize {
        self.watchlist.len()
    }

    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }

    /// The message of the last failure, if the last request failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            RequestStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(TimeBucket, Vec<String>), ValidationError> {
        let time = self.selected_time.ok_or(ValidationError::MissingTime)?;
        let clues = self.clues.active();
        if clues.is_empty() {
            return Err(ValidationError::NoClues);
        }
        Ok((time, clues))
    }
}

/// User actions and request outcomes fed into `reduce`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTime(TimeBucket),
    SetClue { index: usize, text: String },
    /// Replaces all clue slots and the time bucket, as produced by `catalog::surprise`.
    ApplySurprise { clues: Vec<String>, time: TimeBucket },
    Submit,
    MatchSucceeded(MatchResult),
    MatchFailed(String),
    ToggleWatchlist(Recommendation),
    ClearHistory,
    SetHistoryOverlay(bool),
    /// Replays the history entry at this position (0 = most recent).
    OpenHistoryEntry(usize),
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchMatch { time: TimeBucket, clues: Vec<String> },
    PersistWatchlist,
    PersistHistory,
    RemoveHistory,
    ScrollToResults,
}

/// Applies `action` to `state` and returns the effects it requires.
pub fn reduce(state: &mut SessionState, action: Action) -> Vec<Effect> {
    match action {
        Action::SelectTime(time) => {
            state.selected_time = Some(time);
            vec![]
        }
        Action::SetClue { index, text } => {
            if !state.clues.set(index, text) {
                warn!(index, "Ignoring clue outside the form slots");
            }
            vec![]
        }
        Action::ApplySurprise { clues, time } => {
            state.clues = ClueSet::from_values(clues);
            state.selected_time = Some(time);
            vec![]
        }
        Action::Submit => {
            if state.is_submitting() {
                debug!("Submit ignored while a request is in flight");
                return vec![];
            }
            match state.validate() {
                Ok((time, clues)) => {
                    state.status = RequestStatus::Submitting;
                    vec![Effect::FetchMatch { time, clues }]
                }
                Err(invalid) => {
                    state.status = RequestStatus::Failed(invalid.to_string());
                    vec![]
                }
            }
        }
        Action::MatchSucceeded(result) => {
            state.history.insert(0, result.clone());
            state.history.truncate(HISTORY_LIMIT);
            state.result = Some(result.clone());
            state.status = RequestStatus::Resolved(result);
            vec![Effect::PersistHistory, Effect::ScrollToResults]
        }
        Action::MatchFailed(message) => {
            let message = if message.trim().is_empty() {
                FALLBACK_FAILURE_MESSAGE.to_string()
            } else {
                message
            };
            state.status = RequestStatus::Failed(message);
            vec![]
        }
        Action::ToggleWatchlist(entry) => {
            match state.watchlist.iter().position(|w| w.title == entry.title) {
                Some(_) => state.watchlist.retain(|w| w.title != entry.title),
                None => state.watchlist.push(entry),
            }
            vec![Effect::PersistWatchlist]
        }
        Action::ClearHistory => {
            state.history.clear();
            vec![Effect::RemoveHistory]
        }
        Action::SetHistoryOverlay(open) => {
            state.history_open = open;
            vec![]
        }
        Action::OpenHistoryEntry(index) => {
            let Some(entry) = state.history.get(index).cloned() else {
                warn!(index, "No history entry at this position");
                return vec![];
            };
            state.result = Some(entry.clone());
            state.status = RequestStatus::Resolved(entry);
            state.history_open = false;
            vec![Effect::ScrollToResults]
        }
    }
}
