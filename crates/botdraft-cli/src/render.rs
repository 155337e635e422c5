// Plain-text rendering of draft loop updates for the terminal.

use botdraft_app::protocol::{SessionResults, UiUpdate};
use botdraft_core::setup::{ordinal, position_labels};
use botdraft_core::{Catalog, DraftSetup, DraftSnapshot, ParticipantKind};

/// Game listing shown when no game is named, with the configured setup and
/// the seat choices for `draft.human_position`.
pub fn render_games(catalog: &Catalog, setup: &DraftSetup) -> Vec<String> {
    let mut lines = vec!["Available games:".to_string()];
    for game in &catalog.games {
        lines.push(format!("  {:<20} {}", game.name, game.summary()));
    }

    let seats = setup.participant_count();
    lines.push(String::new());
    lines.push(format!(
        "Setup: {} bots, {} rounds, {} order, you pick {} of {}",
        setup.num_bots,
        setup.num_rounds,
        setup.mode,
        ordinal(setup.human_position),
        seats
    ));
    lines.push(format!("Seats (draft.human_position): {}", position_labels(seats).join(", ")));
    lines.push(String::new());
    lines.push("Run `botdraft <GAME>` to start a draft.".to_string());
    lines
}

/// Lines to print for one update. Empty when the update has nothing to show.
pub fn render_update(update: &UiUpdate) -> Vec<String> {
    match update {
        UiUpdate::DraftStarted {
            game,
            draft_number,
            snapshot,
        } => render_started(game, *draft_number, snapshot),
        UiUpdate::PickMade { label, record } => vec![format!(
            "  {:>3}. {} takes {} (round {}, pick {})",
            record.pick_number + 1,
            label,
            record.unit,
            record.round,
            record.pick_in_round
        )],
        // The pick line already says what changed.
        UiUpdate::Snapshot(_) => Vec::new(),
        UiUpdate::YourTurn { available } => vec![
            String::new(),
            "Your turn. Available units:".to_string(),
            format!("  {}", available.join(", ")),
            "Type a unit name to pick it.".to_string(),
        ],
        UiUpdate::PickRejected { unit, reason } => {
            vec![format!("Cannot pick {unit}: {reason}")]
        }
        UiUpdate::DraftComplete(results) => render_results(results),
    }
}

fn render_started(game: &str, draft_number: u64, snapshot: &DraftSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("=== {game}: draft #{draft_number} ==="),
        format!(
            "{} participants, {} picks planned, {} units in the pool",
            snapshot.participants.len(),
            snapshot.total_turns,
            snapshot.available.len()
        ),
    ];
    if !snapshot.free_units.is_empty() {
        lines.push(format!("Free units: {}", snapshot.free_units.join(", ")));
    }
    lines.push(snapshot.headline());
    lines
}

fn render_results(session: &SessionResults) -> Vec<String> {
    let results = &session.results;
    let mut lines = vec![
        String::new(),
        format!("=== {}: draft #{} complete ===", session.game, session.draft_number),
    ];

    let width = results
        .participants
        .iter()
        .map(|p| p.label.len())
        .max()
        .unwrap_or(0);
    for p in &results.participants {
        let marker = match p.kind {
            ParticipantKind::Human => "*",
            ParticipantKind::Bot => " ",
        };
        let picks = if p.picks.is_empty() {
            "(no picks)".to_string()
        } else {
            p.picks.join(", ")
        };
        lines.push(format!("{marker} {:<width$}  {picks}", p.label));
    }

    if !results.free_units.is_empty() {
        lines.push(format!("Free for everyone: {}", results.free_units.join(", ")));
    }
    if results.ended_early() {
        lines.push(format!(
            "The pool ran out after {} of {} picks.",
            results.turns_used, results.turns_planned
        ));
    } else if !results.unpicked.is_empty() {
        lines.push(format!("Left in the pool: {}", results.unpicked.join(", ")));
    }
    lines.push("Type `redraft` to draft again or `quit` to exit.".to_string());
    lines
}
