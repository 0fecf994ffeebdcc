//! Configuration
//!
//! Layered settings: built-in defaults, then `~/.config/wabase/config.toml`,
//! then an explicit file, then `WABASE__*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FOOTER: &str = "© Wabase Bot · MIT License";

/// Application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the WhatsApp session database
    pub session_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Drop noisy Signal-session lines from log output
    pub filter_noise: bool,
    pub dedup: DedupConfig,
    pub menu: MenuConfig,
    pub replies: RepliesConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_dir: PathBuf::from("session"),
            log_level: "info".to_string(),
            log_json: false,
            filter_noise: true,
            dedup: DedupConfig::default(),
            menu: MenuConfig::default(),
            replies: RepliesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DedupConfig {
    /// How long a message id stays in the ledger
    pub window_secs: u64,
    /// How often expired ids are swept
    pub sweep_interval_secs: u64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            sweep_interval_secs: 30,
        }
    }
}

impl DedupConfig {
    /// Never zero: a zero window admits every repeat of an id.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs.max(1))
    }

    /// Never zero: `tokio::time::interval` panics on a zero period.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub footer: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

/// Values used by the canned button replies
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RepliesConfig {
    pub call_phone: String,
    pub link_url: String,
    pub copy_code: String,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            call_phone: "+6281234567890".to_string(),
            link_url: "https://github.com/whiskeysockets/baileys".to_string(),
            copy_code: "WABASE-2025".to_string(),
        }
    }
}

/// User-level config file location (`<config_dir>/wabase/config.toml`).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wabase").join("config.toml"))
}

impl Settings {
    /// Load settings from the user config file, `explicit` (if given) and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Settings::default())?);

        if let Some(user) = user_config_path() {
            builder = builder.add_source(File::from(user).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("WABASE")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Session database path inside `session_dir`.
    pub fn session_db_path(&self) -> PathBuf {
        self.session_dir.join("whatsapp.db")
    }
}
