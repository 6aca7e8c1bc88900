//! crates/cinematcher_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! The serde shape of these types is the wire shape of the service reply and
//! of the persisted watchlist/history documents.

use serde::{Deserialize, Serialize};

/// Number of positional clue slots in the form.
pub const CLUE_SLOTS: usize = 10;

/// Maximum number of entries kept in the history.
pub const HISTORY_LIMIT: usize = 10;

/// How much time the user has available. Serialized as its canonical label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    #[serde(rename = "Veloce (30-60 min)")]
    Quick,
    #[serde(rename = "Film standard (90-120 min)")]
    StandardFilm,
    #[serde(rename = "Film lungo (2-3 ore)")]
    LongFilm,
    #[serde(rename = "Miniserie (3-6 ore)")]
    Miniseries,
    #[serde(rename = "Weekend (6-12 ore)")]
    Weekend,
    #[serde(rename = "Maratona lunga (12-24 ore)")]
    LongMarathon,
    #[serde(rename = "Serie lunga (24+ ore)")]
    LongSeries,
    #[serde(rename = "Flessibile")]
    Flexible,
}

/// The positional free-text clues typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClueSet {
    slots: [String; CLUE_SLOTS],
}

impl ClueSet {
    /// Builds a set from up to ten values; missing slots stay blank, extra values are dropped.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for (slot, value) in set.slots.iter_mut().zip(values) {
            *slot = value.into();
        }
        set
    }

    /// Replaces the clue at `index`. Returns `false` when the index is outside the slots.
    pub fn set(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// The clues that will be sent with a request, in slot order.
    /// Whitespace-only slots count as blank.
    pub fn active(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|clue| !clue.trim().is_empty())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDetails {
    pub director: String,
    pub cast: Vec<String>,
    pub duration_or_seasons: String,
    pub rating: String,
}

/// A single title suggested by the service. Doubles as a watchlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    pub year: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub country: String,
    pub genre: String,
    pub total_duration: String,
    pub time_needed: String,
    pub suggested_pacing: String,
    pub reason: String,
    pub plot: String,
    pub technical_details: TechnicalDetails,
    pub where_to_watch: String,
    pub trailer_url: String,
    pub poster_url: String,
}

/// The bundle returned by one request. Doubles as a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub recommendations: Vec<Recommendation>,
    pub comparative_explanation: String,
    pub time_management: String,
}
