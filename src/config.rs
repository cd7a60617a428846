use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::notation::TiePrecedence;

pub const CONFIG_VERSION: u64 = 1;
pub const APP_ID: &str = "dev.taskboard.app";

/// Shortest tick the board accepts; anything lower is clamped.
const MIN_TICK_MS: u64 = 100;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("taskboard")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct TaskBoardConfig {
    pub data_directory: PathBuf,
    pub storage_key: String,
    pub tick_interval_ms: u64,
    pub tie_precedence: TiePrecedence,
    pub max_tasks: Option<usize>,
    pub debug_logging: bool,
}

impl Default for TaskBoardConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            storage_key: "tasks".into(),
            tick_interval_ms: 1000,
            tie_precedence: TiePrecedence::default(),
            max_tasks: None,
            debug_logging: false,
        }
    }
}

impl TaskBoardConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_MS))
    }

    /// The slot key, falling back to `tasks` when the configured one is blank.
    pub fn storage_key(&self) -> &str {
        let key = self.storage_key.trim();
        if key.is_empty() { "tasks" } else { key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_tick_every_second() {
        let config = TaskBoardConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.storage_key(), "tasks");
        assert_eq!(config.tie_precedence, TiePrecedence::Record);
        assert_eq!(config.max_tasks, None);
        assert!(config.data_directory.ends_with("taskboard"));
    }

    #[test]
    fn tiny_tick_is_clamped() {
        let config = TaskBoardConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(MIN_TICK_MS));
    }

    #[test]
    fn blank_storage_key_falls_back() {
        let config = TaskBoardConfig {
            storage_key: "  ".into(),
            ..Default::default()
        };
        assert_eq!(config.storage_key(), "tasks");
    }
}
