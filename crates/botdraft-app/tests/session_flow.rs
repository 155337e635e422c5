// Integration tests for the draft session layer.
//
// These start from the shipped default config files, build an AppState for a
// catalog game, and drive the paced loop through its channels the way a front
// end would.

use std::path::PathBuf;
use std::time::Duration;

use botdraft_app::app::{self, AppState};
use botdraft_app::config::{ensure_config_files, load_config_from, Config};
use botdraft_app::protocol::{SessionResults, UiUpdate, UserCommand};
use tokio::sync::mpsc;

// ===========================================================================
// Test helpers
// ===========================================================================

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "botdraft-session-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Config loaded from the built-in defaults written to a fresh directory.
fn default_config(name: &str) -> Config {
    let dir = scratch_dir(name);
    ensure_config_files(&dir).unwrap();
    let config = load_config_from(&dir).unwrap();
    let _ = std::fs::remove_dir_all(&dir);
    config
}

fn skirmish_state(config: &Config, seed: u64) -> AppState {
    let game = config.catalog.select("Skirmish").unwrap().clone();
    AppState::new(
        game,
        config.draft.clone(),
        config.pacing.bot_delay(),
        Some(seed),
    )
    .unwrap()
}

/// Play a whole draft, the human always taking the first unit offered.
/// Returns the results and every update seen.
async fn play_out(
    cmd_tx: &mpsc::Sender<UserCommand>,
    ui_rx: &mut mpsc::Receiver<UiUpdate>,
) -> (SessionResults, Vec<UiUpdate>) {
    let mut seen = Vec::new();
    loop {
        let update = ui_rx.recv().await.expect("ui channel closed");
        match &update {
            UiUpdate::YourTurn { available } => {
                cmd_tx
                    .send(UserCommand::Pick {
                        unit: available[0].clone(),
                    })
                    .await
                    .unwrap();
            }
            UiUpdate::DraftComplete(results) => {
                let results = (**results).clone();
                seen.push(update);
                return (results, seen);
            }
            _ => {}
        }
        seen.push(update);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn defaults_describe_a_playable_game() {
    let config = default_config("defaults");
    assert_eq!(config.draft.num_bots, 3);
    assert_eq!(config.draft.num_rounds, 7);
    assert_eq!(config.pacing.bot_delay(), Duration::from_millis(400));
    assert!(config.seed.is_none());

    let skirmish = config.catalog.select("skirmish").unwrap();
    assert!(skirmish.is_playable());
    assert!(config.catalog.select("Frontier").is_err());
}

#[tokio::test(start_paused = true)]
async fn default_skirmish_draft_runs_to_completion() {
    let config = default_config("full");
    let state = skirmish_state(&config, 11);
    let pool_size = state.engine.available().len();

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, mut ui_rx) = mpsc::channel(512);
    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, state));

    let (session, seen) = play_out(&cmd_tx, &mut ui_rx).await;
    let results = &session.results;

    // 4 seats x 7 rounds = 28 picks, and the default pool holds 28 units.
    assert_eq!(results.turns_planned, 28);
    assert_eq!(results.turns_used, pool_size.min(28));
    for p in &results.participants {
        assert_eq!(p.picks.len(), results.turns_used / 4);
    }
    assert_eq!(results.free_units, vec!["Peasant", "Militia"]);

    let picks = seen
        .iter()
        .filter(|u| matches!(u, UiUpdate::PickMade { .. }))
        .count();
    assert_eq!(picks, results.turns_used);

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn same_seed_gives_same_session() {
    let config = default_config("seeded");

    let mut logs = Vec::new();
    for _ in 0..2 {
        let state = skirmish_state(&config, 2024);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(512);
        let handle = tokio::spawn(app::run(cmd_rx, ui_tx, state));

        let (session, _) = play_out(&cmd_tx, &mut ui_rx).await;
        logs.push(session.results.participants);

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        handle.await.unwrap().unwrap();
    }
    assert_eq!(logs[0], logs[1]);
}

#[tokio::test(start_paused = true)]
async fn redraft_after_completion_starts_over() {
    let config = default_config("redraft");
    let state = skirmish_state(&config, 5);

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, mut ui_rx) = mpsc::channel(512);
    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, state));

    let (first, _) = play_out(&cmd_tx, &mut ui_rx).await;
    assert_eq!(first.draft_number, 1);

    cmd_tx.send(UserCommand::Redraft).await.unwrap();
    let (second, seen) = play_out(&cmd_tx, &mut ui_rx).await;
    assert_eq!(second.draft_number, 2);
    assert!(matches!(
        seen.first(),
        Some(UiUpdate::DraftStarted { draft_number: 2, .. })
    ));

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn updates_serialize_as_json_lines() {
    let config = default_config("json");
    let state = skirmish_state(&config, 9);

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, mut ui_rx) = mpsc::channel(512);
    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, state));

    let first = ui_rx.recv().await.unwrap();
    let line = serde_json::to_string(&first).unwrap();
    assert!(!line.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["type"], "draft_started");
    assert_eq!(value["data"]["game"], "Skirmish");
    assert_eq!(value["data"]["snapshot"]["status"], "in_progress");

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    assert!(handle.await.unwrap().is_ok());
}
