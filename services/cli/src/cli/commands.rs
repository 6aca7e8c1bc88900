//! services/cli/src/cli/commands.rs
//!
//! Handlers for each subcommand. They drive the `Session` through its public
//! operations and actions, then render what changed.

use std::io::Write;

use cinematcher_core::domain::CLUE_SLOTS;
use cinematcher_core::{Action, RequestStatus, Session, UiSignal};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::cli::render;
use crate::cli::{Commands, HistoryAction, WatchlistAction};
use crate::error::AppError;

/// Runs one command against the session and writes its output to `out`.
pub async fn handle_command(
    command: Commands,
    session: &mut Session,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command {
        Commands::Times => render::times(out)?,
        Commands::Match {
            time,
            clues,
            surprise,
            seed,
        } => handle_match(session, out, time, clues, surprise, seed).await?,
        Commands::History { action } => handle_history(session, out, action).await?,
        Commands::Watchlist { action } => handle_watchlist(session, out, action).await?,
    }
    Ok(())
}

async fn handle_match(
    session: &mut Session,
    out: &mut impl Write,
    time: Option<cinematcher_core::TimeBucket>,
    clues: Vec<String>,
    surprise: bool,
    seed: Option<u64>,
) -> Result<(), AppError> {
    if clues.len() > CLUE_SLOTS {
        return Err(AppError::Usage(format!(
            "At most {} clues are accepted, got {}",
            CLUE_SLOTS,
            clues.len()
        )));
    }

    if surprise {
        let mut rng = seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy);
        session.randomize(&mut rng).await;
    } else {
        if let Some(time) = time {
            session.select_time(time).await;
        }
        for (index, clue) in clues.into_iter().enumerate() {
            session.set_clue(index, clue).await;
        }
    }
    render::form(out, session.state())?;

    let signals = session.submit().await;
    let state = session.state();
    match &state.status {
        RequestStatus::Resolved(result) => {
            info!(history = state.history.len(), "Recommendations received");
            if signals.contains(&UiSignal::ScrollToResults) {
                render::match_result(out, result, state)?;
            }
            Ok(())
        }
        RequestStatus::Failed(message) => Err(AppError::Request(message.clone())),
        _ => Ok(()),
    }
}

async fn handle_history(
    session: &mut Session,
    out: &mut impl Write,
    action: HistoryAction,
) -> Result<(), AppError> {
    match action {
        HistoryAction::List => {
            session.dispatch(Action::SetHistoryOverlay(true)).await;
            if session.state().history_open {
                render::history(out, session.state())?;
            }
        }
        HistoryAction::Open { position } => {
            let index = position
                .checked_sub(1)
                .ok_or_else(|| AppError::Usage("History positions start at 1".to_string()))?;
            let signals = session.dispatch(Action::OpenHistoryEntry(index)).await;
            match (&session.state().result, signals.contains(&UiSignal::ScrollToResults)) {
                (Some(result), true) => render::match_result(out, result, session.state())?,
                _ => {
                    return Err(AppError::Usage(format!(
                        "No history entry at position {}",
                        position
                    )))
                }
            }
        }
        HistoryAction::Clear => {
            session.dispatch(Action::ClearHistory).await;
            writeln!(out, "Cronologia cancellata.")?;
        }
    }
    Ok(())
}

async fn handle_watchlist(
    session: &mut Session,
    out: &mut impl Write,
    action: WatchlistAction,
) -> Result<(), AppError> {
    match action {
        WatchlistAction::List => render::watchlist(out, session.state())?,
        WatchlistAction::Toggle {
            recommendation,
            entry,
        } => {
            let picked = entry
                .checked_sub(1)
                .and_then(|i| session.state().history.get(i))
                .and_then(|result| {
                    recommendation
                        .checked_sub(1)
                        .and_then(|i| result.recommendations.get(i))
                })
                .cloned()
                .ok_or_else(|| {
                    AppError::Usage(format!(
                        "No recommendation {} in history entry {}",
                        recommendation, entry
                    ))
                })?;

            let title = picked.title.clone();
            session.dispatch(Action::ToggleWatchlist(picked)).await;
            if session.state().is_in_watchlist(&title) {
                writeln!(out, "Aggiunto alla watchlist: {}", title)?;
            } else {
                writeln!(out, "Rimosso dalla watchlist: {}", title)?;
            }
        }
        WatchlistAction::Remove { position } => {
            let saved = position
                .checked_sub(1)
                .and_then(|i| session.state().watchlist.get(i))
                .cloned()
                .ok_or_else(|| {
                    AppError::Usage(format!("No saved title at position {}", position))
                })?;

            let title = saved.title.clone();
            // Toggling a saved title drops it.
            session.dispatch(Action::ToggleWatchlist(saved)).await;
            writeln!(out, "Rimosso dalla watchlist: {}", title)?;
        }
    }
    Ok(())
}
