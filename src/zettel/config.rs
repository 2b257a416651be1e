use crate::error::{Result, ZettelError};
use crate::ordering::SortDirection;
use crate::quick_match::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CARDS_FILE: &str = "cards.json";

/// Settings for a card collection, stored next to it in `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZettelConfig {
    /// How many suggestions quick match offers while linking
    #[serde(default = "default_quick_match_limit")]
    pub quick_match_limit: usize,

    /// Direction for listings and the tree
    #[serde(default)]
    pub sort_direction: SortDirection,

    /// File (relative to the data directory) holding the card list
    #[serde(default = "default_cards_file")]
    pub cards_file: String,
}

fn default_quick_match_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_cards_file() -> String {
    DEFAULT_CARDS_FILE.to_string()
}

impl Default for ZettelConfig {
    fn default() -> Self {
        Self {
            quick_match_limit: DEFAULT_LIMIT,
            sort_direction: SortDirection::Ascending,
            cards_file: default_cards_file(),
        }
    }
}

impl ZettelConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ZettelConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Current value of a setting, by its key in `config.json`.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "quick_match_limit" => Ok(self.quick_match_limit.to_string()),
            "sort_direction" => Ok(self.sort_direction.to_string()),
            "cards_file" => Ok(self.cards_file.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "quick_match_limit" => {
                self.quick_match_limit = value.parse().map_err(|_| {
                    ZettelError::Api(format!("quick_match_limit must be a number, got '{}'", value))
                })?;
            }
            "sort_direction" => {
                self.sort_direction = value.parse().map_err(ZettelError::Api)?;
            }
            "cards_file" => {
                if value.trim().is_empty() {
                    return Err(ZettelError::Api("cards_file cannot be empty".to_string()));
                }
                self.cards_file = value.trim().to_string();
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["quick_match_limit", "sort_direction", "cards_file"]
    }
}

fn unknown_key(key: &str) -> ZettelError {
    ZettelError::Api(format!(
        "Unknown config key '{}' (expected one of: {})",
        key,
        ZettelConfig::keys().join(", ")
    ))
}
