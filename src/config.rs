use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::SearchQuery;

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trackcheck")
}

pub fn get_config_file_path() -> PathBuf {
    get_config_dir().join("config.json")
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Drop search errors instead of publishing them to the inline slot.
    /// Meant for automated and preview contexts; playback errors are still
    /// surfaced.
    pub suppress_inline_errors: bool,
    /// Maximum number of albums requested per search.
    pub search_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            suppress_inline_errors: false,
            search_limit: SearchQuery::DEFAULT_LIMIT,
        }
    }
}

impl SessionConfig {
    /// Read the config file, falling back to defaults when it is missing
    /// or malformed.
    pub fn load_or_default() -> Self {
        Self::load_from(&get_config_file_path())
    }

    fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("[SessionConfig] Malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
