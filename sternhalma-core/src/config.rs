//! Game setup configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::layout::{effective_player_count, is_supported};

/// Externally supplied setup parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_player_count")]
    pub player_count: usize,
}

fn default_player_count() -> usize {
    2
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: default_player_count(),
        }
    }
}

impl GameConfig {
    pub fn new(player_count: usize) -> Self {
        Self { player_count }
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Player count the game will actually seat
    pub fn normalized_player_count(&self) -> usize {
        if !is_supported(self.player_count) {
            tracing::warn!(
                "Player count {} unsupported, playing with {}",
                self.player_count,
                effective_player_count(self.player_count)
            );
        }
        effective_player_count(self.player_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_two_players() {
        assert_eq!(GameConfig::default().player_count, 2);
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_parse() {
        let config = GameConfig::from_json(r#"{"player_count": 4}"#).unwrap();
        assert_eq!(config.normalized_player_count(), 4);
        assert!(GameConfig::from_json(r#"{"player_count": "four"}"#).is_err());
    }

    #[test]
    fn test_out_of_range_normalizes_to_six() {
        assert_eq!(GameConfig::new(1).normalized_player_count(), 6);
        assert_eq!(GameConfig::new(12).normalized_player_count(), 6);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/sternhalma.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
