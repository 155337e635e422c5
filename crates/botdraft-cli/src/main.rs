// botdraft entry point.
//
// Startup sequence:
// 1. Parse arguments (`--help` and `--version` exit here)
// 2. Initialize tracing (log to file, stdout belongs to the draft)
// 3. Load config and catalog
// 4. List games, or build the AppState for the chosen one
// 5. Create mpsc channels
// 6. Spawn the draft loop and the stdin reader
// 7. Print updates until the loop ends

mod render;

use std::io::{BufRead, Write};

use anyhow::Context;
use botdraft_app::app::{self, AppState};
use botdraft_app::config;
use botdraft_app::protocol::UserCommand;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Draft units against weighted-random bots.
#[derive(Debug, Parser)]
#[command(name = "botdraft", version)]
struct Args {
    /// Game to draft; lists the catalog when omitted.
    game: Option<String>,

    /// Fixed RNG seed, overriding `[rng] seed` in the config.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print updates as JSON lines instead of text.
    #[arg(short, long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let args = Args::parse();

    // 2. Initialize tracing
    init_tracing()?;
    info!("botdraft starting up");

    // 3. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} games from {}",
        config.catalog.games.len(),
        config.catalog_path.display()
    );

    // 4. Pick the game
    let Some(name) = args.game.as_deref() else {
        for line in render::render_games(&config.catalog, &config.draft) {
            println!("{line}");
        }
        return Ok(());
    };
    let game = config
        .catalog
        .select(name)
        .with_context(|| format!("cannot draft `{name}`"))?
        .clone();

    let seed = args.seed.or(config.seed);
    let state = AppState::new(game, config.draft.clone(), config.pacing.bot_delay(), seed)?;

    // 5. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::channel(256);

    // 6. Spawn the draft loop and the stdin reader
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, state).await {
            error!("Draft loop error: {:#}", e);
        }
    });

    // Stdin is read on a plain thread so a pending read never holds up
    // runtime shutdown.
    std::thread::spawn(move || read_commands(cmd_tx));

    // 7. Print updates until the loop drops its sender
    let stdout = std::io::stdout();
    while let Some(update) = ui_rx.recv().await {
        let mut out = stdout.lock();
        if args.json {
            writeln!(out, "{}", serde_json::to_string(&update)?)?;
        } else {
            for line in render::render_update(&update) {
                writeln!(out, "{line}")?;
            }
        }
        out.flush()?;
    }

    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), app_handle).await;

    info!("botdraft shut down cleanly");
    Ok(())
}

/// Forward stdin lines to the draft loop. At end of input the sender is
/// dropped, so the loop finishes any pending bot picks and then exits.
fn read_commands(cmd_tx: mpsc::Sender<UserCommand>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        let Some(cmd) = UserCommand::parse_line(&line) else {
            continue;
        };
        let quit = cmd == UserCommand::Quit;
        if cmd_tx.blocking_send(cmd).is_err() || quit {
            return;
        }
    }
}

/// Initialize tracing to log to a file (stdout carries the draft itself).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("botdraft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("botdraft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("botdraft").chain(list.iter().copied()))
    }

    #[test]
    fn no_arguments_lists_games() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.game, None);
        assert_eq!(parsed.seed, None);
        assert!(!parsed.json);
    }

    #[test]
    fn game_seed_and_json() {
        let parsed = args(&["Skirmish", "--seed", "42", "--json"]).unwrap();
        assert_eq!(parsed.game.as_deref(), Some("Skirmish"));
        assert_eq!(parsed.seed, Some(42));
        assert!(parsed.json);
    }

    #[test]
    fn equals_and_short_forms() {
        let parsed = args(&["--seed=42"]).unwrap();
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.game, None);

        let parsed = args(&["-s", "1", "-j", "Skirmish"]).unwrap();
        assert_eq!(parsed.seed, Some(1));
        assert!(parsed.json);
        assert_eq!(parsed.game.as_deref(), Some("Skirmish"));
    }

    #[test]
    fn help_is_not_a_usage_error() {
        let err = args(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn bad_arguments_are_errors() {
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "soon"]).is_err());
        assert!(args(&["--fast"]).is_err());
        assert!(args(&["Skirmish", "Frontier"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
