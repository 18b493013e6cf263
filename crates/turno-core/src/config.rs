use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TurnoError};

/// Top-level configuration for the Turno assistant.
///
/// Loaded from `~/.turno/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for TurnoConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            time: TimeConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl TurnoConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TurnoConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TurnoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the SQLite database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.turno/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Business-local time settings.
///
/// All date expressions in conversations resolve against the business
/// timezone, never the server clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Offset of the business timezone from UTC, in minutes.
    /// Positive values are east of Greenwich (120 = UTC+02:00).
    pub utc_offset_minutes: i32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 120,
        }
    }
}

impl TimeConfig {
    /// The business timezone as a fixed offset.
    ///
    /// Fails if the configured minutes fall outside the valid UTC offset
    /// range (strictly between -24h and +24h).
    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or(TurnoError::InvalidOffset {
            minutes: self.utc_offset_minutes,
        })
    }
}

/// Conversation history tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Hard cap on stored messages per session; oldest beyond this are evicted.
    pub message_cap: u32,
    /// Recent messages included verbatim in the model context window.
    pub context_messages: u32,
    /// A session summary is refreshed every this many stored messages.
    pub summarize_every: u32,
    /// Longest accepted inbound message, in characters.
    pub max_message_length: usize,
    /// Sessions idle longer than this many days are eligible for purge.
    pub retention_days: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            message_cap: 80,
            context_messages: 20,
            summarize_every: 10,
            max_message_length: 2000,
            retention_days: 30,
        }
    }
}
