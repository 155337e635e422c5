// Configuration loading and parsing (botdraft.toml, games.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use botdraft_core::{Catalog, ConfigurationError, DraftSetup};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Shipped defaults, written into `config/` when missing.
const DEFAULT_SETTINGS: &str = include_str!("../defaults/botdraft.toml");
const DEFAULT_GAMES: &str = include_str!("../defaults/games.toml");

const SETTINGS_FILE: &str = "botdraft.toml";
const GAMES_FILE: &str = "games.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("invalid draft data in {path}: {source}")]
    Draft {
        path: PathBuf,
        source: ConfigurationError,
    },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Setup used for new drafts unless the caller overrides it.
    pub draft: DraftSetup,
    pub pacing: PacingConfig,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub catalog_path: PathBuf,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Pause before each automated pick, in milliseconds.
    #[serde(default = "default_bot_delay_ms")]
    pub bot_delay_ms: u64,
}

impl PacingConfig {
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig {
            bot_delay_ms: default_bot_delay_ms(),
        }
    }
}

fn default_bot_delay_ms() -> u64 {
    400
}

// ---------------------------------------------------------------------------
// botdraft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for botdraft.toml.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    draft: DraftSetup,
    #[serde(default)]
    pacing: PacingConfig,
    #[serde(default)]
    rng: RngSection,
    catalog: CatalogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RngSection {
    seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogSection {
    path: String,
}

/// Upper bound on the pacing delay; anything longer is almost certainly a
/// seconds/milliseconds mix-up.
const MAX_BOT_DELAY_MS: u64 = 60_000;

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/botdraft.toml` and the catalog it points to,
/// relative to `base_dir`. Does not create missing files.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let settings_path = base_dir.join("config").join(SETTINGS_FILE);
    let settings_text = read_file(&settings_path)?;
    let settings: SettingsFile =
        toml::from_str(&settings_text).map_err(|e| ConfigError::ParseError {
            path: settings_path.clone(),
            source: e,
        })?;

    let catalog_path = base_dir.join(&settings.catalog.path);
    let catalog = load_catalog(&catalog_path)?;

    let config = Config {
        draft: settings.draft,
        pacing: settings.pacing,
        seed: settings.rng.seed,
        catalog_path,
        catalog,
    };

    validate(&config, &settings_path)?;

    Ok(config)
}

/// Parse and validate a game catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let text = read_file(path)?;
    parse_catalog(&text, path)
}

fn parse_catalog(text: &str, path: &Path) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    catalog.validate().map_err(|e| ConfigError::Draft {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(catalog)
}

/// Write any missing config files under `base_dir/config` from the built-in
/// defaults. Returns the files that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut created = Vec::new();
    for (name, contents) in [(SETTINGS_FILE, DEFAULT_SETTINGS), (GAMES_FILE, DEFAULT_GAMES)] {
        let target = config_dir.join(name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                std::io::Write::write_all(&mut dest, contents.as_bytes()).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                created.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(created)
}

/// Directory config is read from: the working directory when it already has
/// a `config/` folder, otherwise the platform config directory.
pub fn resolve_base_dir() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("config").is_dir() {
        return Ok(cwd);
    }
    match ProjectDirs::from("", "", "botdraft") {
        Some(dirs) => Ok(dirs.config_dir().to_path_buf()),
        None => Ok(cwd),
    }
}

/// Convenience wrapper: resolve the base directory, write defaults if
/// needed, then load.
pub fn load_config() -> Result<Config, ConfigError> {
    let base = resolve_base_dir()?;
    for path in ensure_config_files(&base)? {
        info!("Wrote default config file {}", path.display());
    }
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config, settings_path: &Path) -> Result<(), ConfigError> {
    config.draft.validate().map_err(|e| ConfigError::Draft {
        path: settings_path.to_path_buf(),
        source: e,
    })?;

    if config.pacing.bot_delay_ms > MAX_BOT_DELAY_MS {
        return Err(ConfigError::ValidationError {
            field: "pacing.bot_delay_ms".into(),
            message: format!(
                "must be at most {MAX_BOT_DELAY_MS}, got {}",
                config.pacing.bot_delay_ms
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
