//! services/cli/src/cli/render.rs
//!
//! Plain-text rendering of the session state.

use std::io::{self, Write};

use cinematcher_core::{MatchResult, Recommendation, SessionState, TimeBucket};

pub fn times(out: &mut impl Write) -> io::Result<()> {
    for bucket in TimeBucket::ALL {
        writeln!(
            out,
            "{:<14} {:<18} {}",
            bucket.slug(),
            bucket.short_label(),
            bucket.range()
        )?;
    }
    Ok(())
}

/// The filled-in form, shown before a request goes out.
pub fn form(out: &mut impl Write, state: &SessionState) -> io::Result<()> {
    let time = state
        .selected_time
        .map(|t| t.label())
        .unwrap_or("(nessuno)");
    writeln!(out, "Tempo: {}", time)?;
    writeln!(out, "Indizi: {}", state.clues.active().join(", "))
}

pub fn match_result(out: &mut impl Write, result: &MatchResult, state: &SessionState) -> io::Result<()> {
    for (i, rec) in result.recommendations.iter().enumerate() {
        writeln!(out)?;
        recommendation(out, i + 1, rec, state.is_in_watchlist(&rec.title))?;
    }
    writeln!(out)?;
    writeln!(out, "Confronto: {}", result.comparative_explanation)?;
    writeln!(out, "Gestione del tempo: {}", result.time_management)
}

fn recommendation(out: &mut impl Write, position: usize, rec: &Recommendation, saved: bool) -> io::Result<()> {
    let marker = if saved { " [in watchlist]" } else { "" };
    write!(out, "{}. {} ({})", position, rec.title, rec.year)?;
    if let Some(original) = rec.original_title.as_deref().filter(|o| *o != rec.title) {
        write!(out, " / {}", original)?;
    }
    writeln!(out, "{}", marker)?;

    writeln!(out, "   {} · {} · {}", rec.media_type, rec.genre, rec.country)?;
    writeln!(
        out,
        "   Durata: {} · Tempo necessario: {} · Ritmo: {}",
        rec.total_duration, rec.time_needed, rec.suggested_pacing
    )?;
    let details = &rec.technical_details;
    writeln!(
        out,
        "   Regia: {} · Cast: {} · {} · Voto: {}",
        details.director,
        details.cast.join(", "),
        details.duration_or_seasons,
        details.rating
    )?;
    writeln!(out, "   Perché: {}", rec.reason)?;
    writeln!(out, "   Trama: {}", rec.plot)?;
    writeln!(out, "   Dove: {}", rec.where_to_watch)?;
    writeln!(out, "   Trailer: {}", rec.trailer_url)?;
    writeln!(out, "   Poster: {}", rec.poster_url)
}

pub fn watchlist(out: &mut impl Write, state: &SessionState) -> io::Result<()> {
    if state.watchlist.is_empty() {
        return writeln!(out, "La watchlist è vuota.");
    }
    writeln!(out, "Watchlist ({})", state.watchlist_len())?;
    for (i, rec) in state.watchlist.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {} ({}) · {} · {}",
            i + 1,
            rec.title,
            rec.year,
            rec.media_type,
            rec.total_duration
        )?;
        writeln!(out, "    Poster: {}", rec.poster_url)?;
    }
    Ok(())
}

pub fn history(out: &mut impl Write, state: &SessionState) -> io::Result<()> {
    if !state.has_history() {
        return writeln!(out, "Nessuna ricerca nella cronologia.");
    }
    for (i, entry) in state.history.iter().enumerate() {
        let titles: Vec<&str> = entry
            .recommendations
            .iter()
            .map(|rec| rec.title.as_str())
            .collect();
        writeln!(out, "{:>2}. {}", i + 1, titles.join(" · "))?;
    }
    Ok(())
}
