//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.zyna/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::TabKind;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ZynaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub initial_tab: Option<TabKind>,
    pub remember_session: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub display_name: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "zyna.log";
pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub initial_tab: TabKind,
    pub remember_session: bool,
    pub display_name: String,
    pub session_path: PathBuf,
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

/// Returns `~/.zyna`, or `.zyna` in the working directory without a home.
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".zyna"))
        .unwrap_or_else(|| PathBuf::from(".zyna"))
}

/// Returns the path to `~/.zyna/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".zyna").join("config.toml"))
}

/// Load config from `~/.zyna/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ZynaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ZynaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ZynaConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ZynaConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ZynaConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ZynaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Zyna Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "zyna.log"

# [navigation]
# initial_tab = "chats"              # "profile", "chats" or "settings"
# remember_session = true            # skip sign-in when a session exists

# [profile]
# display_name = "Guest"             # shown when nobody signed in
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
/// `cli_tab` and `cli_log_level` are from CLI flags (None = not specified).
pub fn resolve(
    config: &ZynaConfig,
    cli_tab: Option<TabKind>,
    cli_log_level: Option<&str>,
) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ZYNA_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .map(|s| parse_level(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Initial tab: CLI → env → config → default
    let initial_tab = cli_tab
        .or_else(|| {
            std::env::var("ZYNA_INITIAL_TAB")
                .ok()
                .and_then(|s| TabKind::from_str(&s).ok())
        })
        .or(config.navigation.initial_tab)
        .unwrap_or_default();

    // Display name: env → config → default
    let display_name = std::env::var("ZYNA_DISPLAY_NAME")
        .ok()
        .or_else(|| config.profile.display_name.clone())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

    ResolvedConfig {
        log_level,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
        initial_tab,
        remember_session: config.navigation.remember_session.unwrap_or(true),
        display_name,
        session_path: data_dir().join("session.json"),
    }
}

fn parse_level(value: &str) -> LevelFilter {
    LevelFilter::from_str(value).unwrap_or_else(|_| {
        warn!("Unknown log level {value:?}, using {DEFAULT_LOG_LEVEL}");
        DEFAULT_LOG_LEVEL
    })
}
