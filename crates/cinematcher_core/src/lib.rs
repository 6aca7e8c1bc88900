pub mod catalog;
pub mod domain;
pub mod ports;
pub mod prompt;
pub mod session;
pub mod state;
pub mod store;

pub use catalog::{surprise, Surprise, SURPRISE_TAGS};
pub use domain::{ClueSet, MatchResult, Recommendation, TechnicalDetails, TimeBucket};
pub use ports::{KeyValueStore, PortError, PortResult, RecommendationService};
pub use session::{Session, UiSignal};
pub use state::{reduce, Action, Effect, RequestStatus, SessionState, ValidationError};
pub use store::{MemoryStore, StateStore};
