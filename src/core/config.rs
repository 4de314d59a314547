//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.alma/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::chat::delay::{DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS};
use crate::chat::DelayBounds;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AlmaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub persona_name: Option<String>,
    pub greeting: Option<String>,
    pub status_hint: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReplyConfig {
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub seed: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PERSONA: &str = "Alma";
pub const DEFAULT_STATUS_HINT: &str = "Enter sends, Esc quits";

const DEFAULT_GREETING: &str = "Hi! I'm Alma. Ask me whatever you like. \
    My replies are simulated for now, but I'm happy to chat.";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub persona: String,
    pub greeting: String,
    pub status_hint: String,
    pub delay: DelayBounds,
    /// Fixed seed for the scripted responder (None = fresh entropy per run).
    pub seed: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.alma/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".alma").join("config.toml"))
}

/// Load config from `~/.alma/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AlmaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AlmaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AlmaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AlmaConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: AlmaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Alma Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# persona_name = "Alma"                # Or set ALMA_PERSONA env var
# greeting = "Hi! I'm Alma."           # First message of every session
# status_hint = "Enter sends, Esc quits"

# [reply]
# min_delay_ms = 1000                  # Typing pause lower bound
# max_delay_ms = 3000                  # Typing pause upper bound (exclusive)
# seed = 42                            # Fix the reply RNG (or set ALMA_REPLY_SEED)
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_seed` is from the `--seed` flag (None = not specified).
pub fn resolve(config: &AlmaConfig, cli_seed: Option<u64>) -> ResolvedConfig {
    // Persona: env → config → default
    let persona = std::env::var("ALMA_PERSONA")
        .ok()
        .or_else(|| config.general.persona_name.clone())
        .unwrap_or_else(|| DEFAULT_PERSONA.to_string());

    let greeting = config
        .general
        .greeting
        .clone()
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    let status_hint = config
        .general
        .status_hint
        .clone()
        .unwrap_or_else(|| DEFAULT_STATUS_HINT.to_string());

    // Seed: CLI → env → config
    let seed = cli_seed
        .or_else(|| {
            std::env::var("ALMA_REPLY_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .or(config.reply.seed);

    ResolvedConfig {
        persona,
        greeting,
        status_hint,
        delay: resolve_delay(config),
        seed,
    }
}

/// Resolves the typing pause range, swapping inverted bounds with a warning.
fn resolve_delay(config: &AlmaConfig) -> DelayBounds {
    let min_ms = config.reply.min_delay_ms.unwrap_or(DEFAULT_MIN_DELAY_MS);
    let max_ms = config.reply.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS);
    if max_ms < min_ms {
        warn!("Typing delay bounds inverted ({min_ms}..{max_ms} ms), swapping");
        return DelayBounds::new(max_ms, min_ms);
    }
    DelayBounds::new(min_ms, max_ms)
}
