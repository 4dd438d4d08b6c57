//! Codec configuration.
//!
//! Loaded from TOML by embedders; every field has a default so an empty file
//! is a valid configuration.
//!
//! ```toml
//! lowres_turn = true
//!
//! [limits]
//! max_players = 4
//! max_player_name = 30
//! max_datagram_size = 1200
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use ticnet_common::{MAX_PLAYER_NAME, MAX_PLAYERS};

use crate::diff::TurnPrecision;
use crate::error::{CodecError, Result};

/// Smallest datagram that can hold a frame header.
const MIN_DATAGRAM_SIZE: usize = 3;

/// Errors produced while loading a [`CodecConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Limits used by the decoders to protect against hostile counts and lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    /// Largest player count a settings or wait record may announce.
    pub max_players: usize,
    /// Size of a player name/address buffer; values must be strictly shorter.
    pub max_player_name: usize,
    pub max_datagram_size: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            max_player_name: MAX_PLAYER_NAME,
            // Safe baseline for internet paths without MTU discovery.
            max_datagram_size: 1200,
        }
    }
}

impl CodecLimits {
    pub fn check_player_count(&self, count: usize) -> Result<()> {
        if count > self.max_players {
            log::warn!(
                "rejecting player count {count}, session maximum is {}",
                self.max_players
            );
            return Err(CodecError::TooManyPlayers {
                count,
                max: self.max_players,
            });
        }
        Ok(())
    }

    pub fn check_player_name(&self, field: &'static str, value: &str) -> Result<()> {
        if value.len() >= self.max_player_name {
            return Err(CodecError::FieldTooLong {
                field,
                len: value.len(),
                max: self.max_player_name.saturating_sub(1),
            });
        }
        Ok(())
    }

    pub fn check_datagram(&self, len: usize) -> Result<()> {
        if len > self.max_datagram_size {
            return Err(CodecError::DatagramTooLarge {
                limit: self.max_datagram_size,
                actual: len,
            });
        }
        Ok(())
    }
}

/// Configuration shared by both ends of a connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Send `angleturn` at reduced precision.
    pub lowres_turn: bool,
    pub limits: CodecLimits,
}

impl CodecConfig {
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        let config: CodecConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let limits = &self.limits;
        if limits.max_players == 0 || limits.max_players > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "max_players must be between 1 and {MAX_PLAYERS}, got {}",
                limits.max_players
            )));
        }
        if limits.max_player_name == 0 {
            return Err(ConfigError::Invalid(
                "max_player_name must be at least 1".to_string(),
            ));
        }
        if limits.max_datagram_size < MIN_DATAGRAM_SIZE {
            return Err(ConfigError::Invalid(format!(
                "max_datagram_size must be at least {MIN_DATAGRAM_SIZE}, got {}",
                limits.max_datagram_size
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn turn_precision(&self) -> TurnPrecision {
        TurnPrecision::from_lowres(self.lowres_turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CodecConfig::from_toml_str("").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.turn_precision(), TurnPrecision::Full);
        assert_eq!(config.limits.max_players, MAX_PLAYERS);
    }

    #[test]
    fn test_parse_valid_config() {
        let toml_content = r#"
lowres_turn = true

[limits]
max_players = 4
max_datagram_size = 512
        "#;

        let config = CodecConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.turn_precision(), TurnPrecision::Reduced);
        assert_eq!(config.limits.max_players, 4);
        assert_eq!(config.limits.max_player_name, MAX_PLAYER_NAME);
        assert_eq!(config.limits.max_datagram_size, 512);
    }

    #[test]
    fn test_rejects_too_many_players() {
        let err = CodecConfig::from_toml_str("[limits]\nmax_players = 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = CodecConfig::from_toml_str("lowres_turn = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CodecConfig::load_from_file("nonexistent/ticnet.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_player_name_bound_is_exclusive() {
        let limits = CodecLimits::default();
        let longest = "n".repeat(MAX_PLAYER_NAME - 1);
        assert!(limits.check_player_name("player name", &longest).is_ok());

        let too_long = "n".repeat(MAX_PLAYER_NAME);
        assert_eq!(
            limits.check_player_name("player name", &too_long),
            Err(CodecError::FieldTooLong {
                field: "player name",
                len: MAX_PLAYER_NAME,
                max: MAX_PLAYER_NAME - 1,
            })
        );
    }

    #[test]
    fn test_player_count_limit() {
        let limits = CodecLimits {
            max_players: 4,
            ..CodecLimits::default()
        };
        assert!(limits.check_player_count(4).is_ok());
        assert_eq!(
            limits.check_player_count(5),
            Err(CodecError::TooManyPlayers { count: 5, max: 4 })
        );
    }
}
