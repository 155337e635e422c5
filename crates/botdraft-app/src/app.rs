// Draft session state and the paced event loop.
//
// The loop owns one `AppState`. Human picks arrive as `UserCommand`s; when a
// bot is on the clock the loop waits out the pacing delay and then steps
// exactly one automated pick. Every change is pushed to the front end as a
// `UiUpdate`. The engine itself never sleeps.

use std::time::Duration;

use anyhow::Context;
use botdraft_core::{ContractViolation, DraftEngine, DraftSetup, Game, PickRecord};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::protocol::{SessionResults, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// One game's draft session. Survives redrafts; the engine does not.
pub struct AppState {
    pub game: Game,
    pub setup: DraftSetup,
    pub engine: DraftEngine,
    /// Pause before each automated pick.
    pub pacing: Duration,
    /// Base seed; draft `n` (counting from 1) uses `seed + n - 1`.
    seed: Option<u64>,
    /// Counts drafts in this session, starting at 1.
    draft_number: u64,
    started_at: DateTime<Utc>,
    /// Set once `DraftComplete` has been sent for the current draft.
    completion_reported: bool,
}

impl AppState {
    /// Build the first draft for `game` and start it.
    pub fn new(
        game: Game,
        setup: DraftSetup,
        pacing: Duration,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        let mut state = AppState {
            engine: DraftEngine::seeded(0),
            game,
            setup,
            pacing,
            seed,
            draft_number: 0,
            started_at: Utc::now(),
            completion_reported: false,
        };
        state.restart()?;
        Ok(state)
    }

    /// Start a fresh draft with the stored game and setup.
    pub fn restart(&mut self) -> anyhow::Result<()> {
        let plan = self
            .setup
            .build_plan(&self.game)
            .with_context(|| format!("invalid setup for game `{}`", self.game.name))?;

        self.draft_number += 1;
        let mut engine = match self.seed {
            Some(seed) => DraftEngine::seeded(seed.wrapping_add(self.draft_number - 1)),
            None => DraftEngine::from_entropy(),
        };
        engine.start(plan).context("draft plan was rejected by the engine")?;

        self.engine = engine;
        self.started_at = Utc::now();
        self.completion_reported = false;

        info!(
            "Draft #{} started for {}: {} bots, {} rounds, {} mode, human in seat {}",
            self.draft_number,
            self.game.name,
            self.setup.num_bots,
            self.setup.num_rounds,
            self.setup.mode,
            self.setup.human_position
        );
        Ok(())
    }

    pub fn draft_number(&self) -> u64 {
        self.draft_number
    }

    /// Whether an automated pick is due.
    pub fn bot_turn_pending(&self) -> bool {
        self.engine.current_turn_participant().is_ok() && !self.engine.is_human_turn()
    }

    /// Apply the human's pick of `unit`. The name is matched against the
    /// pool ignoring ASCII case.
    pub fn handle_human_pick(&mut self, unit: &str) -> Result<PickRecord, ContractViolation> {
        let human = self.engine.human_index();
        let resolved = self
            .engine
            .available()
            .iter()
            .find(|u| u.as_str() == unit)
            .or_else(|| {
                self.engine
                    .available()
                    .iter()
                    .find(|u| u.eq_ignore_ascii_case(unit))
            })
            .cloned()
            .unwrap_or_else(|| unit.to_string());
        self.engine.apply_pick(human, &resolved)
    }

    /// Make one automated pick if a bot is on the clock.
    pub fn step_bot(&mut self) -> Result<Option<PickRecord>, ContractViolation> {
        self.engine.step_automated_turn()
    }

    /// Label of the participant who made `record`.
    pub fn label_of(&self, record: &PickRecord) -> String {
        self.engine
            .participants()
            .get(record.participant)
            .map(|p| p.label.clone())
            .unwrap_or_else(|| format!("Seat {}", record.participant + 1))
    }

    /// Results of the current draft, once it is complete.
    pub fn session_results(&self) -> Option<SessionResults> {
        let results = self.engine.results().ok()?;
        Some(SessionResults {
            game: self.game.name.clone(),
            draft_number: self.draft_number,
            started_at: self.started_at,
            finished_at: Utc::now(),
            results,
        })
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the draft loop until `Quit` arrives, or until the command channel has
/// closed and no bot is left on the clock.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Draft loop started");
    announce_draft(&mut state, &ui_tx).await;

    let mut commands_open = true;
    loop {
        let bot_pending = state.bot_turn_pending();
        if !commands_open && !bot_pending {
            info!("Command channel closed and no bot turn pending, shutting down");
            break;
        }

        tokio::select! {
            cmd = cmd_rx.recv(), if commands_open => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await?;
                    }
                    None => {
                        info!("Command channel closed");
                        commands_open = false;
                    }
                }
            }

            _ = tokio::time::sleep(state.pacing), if bot_pending => {
                let record = state.step_bot().context("automated pick failed")?;
                if let Some(record) = record {
                    report_pick(&mut state, record, &ui_tx).await;
                }
            }
        }
    }

    info!("Draft loop exiting");
    Ok(())
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    match cmd {
        UserCommand::Pick { unit } => match state.handle_human_pick(&unit) {
            Ok(record) => report_pick(state, record, ui_tx).await,
            Err(e) => {
                warn!("Rejected pick of {}: {}", unit, e);
                let _ = ui_tx
                    .send(UiUpdate::PickRejected {
                        unit,
                        reason: e.to_string(),
                    })
                    .await;
            }
        },
        UserCommand::Redraft => {
            info!("Redraft requested");
            state.restart()?;
            announce_draft(state, ui_tx).await;
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
    Ok(())
}

async fn announce_draft(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::DraftStarted {
            game: state.game.name.clone(),
            draft_number: state.draft_number,
            snapshot: Box::new(state.engine.snapshot()),
        })
        .await;
    report_turn(state, ui_tx).await;
}

async fn report_pick(state: &mut AppState, record: PickRecord, ui_tx: &mpsc::Sender<UiUpdate>) {
    let label = state.label_of(&record);
    debug!("{} picked {}", label, record.unit);
    let _ = ui_tx.send(UiUpdate::PickMade { label, record }).await;
    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.engine.snapshot())))
        .await;
    report_turn(state, ui_tx).await;
}

/// Tell the front end what happens next: the human's turn, or the results.
async fn report_turn(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    if state.engine.is_human_turn() {
        let _ = ui_tx
            .send(UiUpdate::YourTurn {
                available: state.engine.available().to_vec(),
            })
            .await;
    } else if state.engine.is_complete() && !state.completion_reported {
        if let Some(results) = state.session_results() {
            info!(
                "Draft #{} complete: {} of {} turns used",
                state.draft_number, results.results.turns_used, results.results.turns_planned
            );
            state.completion_reported = true;
            let _ = ui_tx.send(UiUpdate::DraftComplete(Box::new(results))).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
