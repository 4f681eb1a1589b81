//! Shared game setup arguments

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use sternhalma_core::GameConfig;

#[derive(Args, Clone, Debug, Default)]
pub struct SetupArgs {
    /// Number of players (2-6); overrides the config file
    #[arg(long)]
    pub players: Option<usize>,

    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SetupArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(players) = self.players {
            config.player_count = players;
        }
        Ok(config)
    }
}
