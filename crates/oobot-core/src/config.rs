//! oobot configuration system.
//!
//! TOML file at `~/.oobot/config.toml`; the host binary layers
//! `$OOBOT_CHANNELS` and CLI flags on top. The scheduling core itself never
//! reads the environment — it receives channel ids as plain parameters.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OobotError, Result};
use crate::types::ChannelId;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OobotConfig {
    /// Channels watched for ambient scheduled sends.
    #[serde(default)]
    pub channels: Vec<u64>,
    #[serde(default)]
    pub ambient: AmbientConfig,
}

/// Tuning for the ambient schedule's reaction to channel chatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    /// Probability that a qualifying message tightens the schedule.
    /// `None` means every qualifying message does.
    #[serde(default)]
    pub reply_probability: Option<f64>,
    /// Activity string advertised in the agent's presence.
    #[serde(default = "default_presence")]
    pub presence: String,
}

fn default_presence() -> String {
    "oob".into()
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            reply_probability: None,
            presence: default_presence(),
        }
    }
}

impl OobotConfig {
    /// Load config from the default path, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OobotError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| OobotError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".oobot")
            .join("config.toml")
    }

    /// Apply `$OOBOT_CHANNELS` (comma-separated ids) over the file values.
    pub fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var("OOBOT_CHANNELS") {
            let parsed = parse_channel_list(&raw);
            if !parsed.is_empty() {
                self.channels = parsed;
            }
        }
    }

    /// The monitored channel set as typed ids.
    pub fn channel_ids(&self) -> Vec<ChannelId> {
        self.channels.iter().copied().map(ChannelId).collect()
    }
}

/// Parse a comma-separated channel list; malformed entries are skipped with
/// a warning.
pub fn parse_channel_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("ignoring malformed channel id '{s}'");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OobotConfig::default();
        assert!(config.channels.is_empty());
        assert!(config.ambient.reply_probability.is_none());
        assert_eq!(config.ambient.presence, "oob");
    }

    #[test]
    fn test_parse_toml() {
        let config: OobotConfig = toml::from_str(
            r#"
            channels = [111, 222]

            [ambient]
            reply_probability = 0.25
            presence = "lurking"
            "#,
        )
        .unwrap();
        assert_eq!(config.channels, vec![111, 222]);
        assert_eq!(config.ambient.reply_probability, Some(0.25));
        assert_eq!(config.ambient.presence, "lurking");
        assert_eq!(config.channel_ids(), vec![ChannelId(111), ChannelId(222)]);
    }

    #[test]
    fn test_parse_channel_list() {
        assert_eq!(parse_channel_list("1, 2,3"), vec![1, 2, 3]);
        assert_eq!(parse_channel_list("1,junk, 3,"), vec![1, 3]);
        assert!(parse_channel_list("").is_empty());
    }
}
