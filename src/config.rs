//! Application Configuration
//! Dataset location with optional JSON file override.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Published CSV export of the race spreadsheet.
const DEFAULT_DATASET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTNUbSB7i6_xLP-z36OdxHiypbfY08leVeGsZccKX_46FetbPwuLfMz74lcJqaU8jr-V7VKRKIZxrh0/pub?output=csv";

/// Config file looked up in the working directory when the
/// `RACE_INSIGHTS_CONFIG` environment variable is not set.
const DEFAULT_CONFIG_FILE: &str = "race_insights.json";

/// Runtime configuration, loaded once before the UI starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `RACE_INSIGHTS_CONFIG` (or
    /// `race_insights.json` if present). A missing file means defaults; a
    /// malformed file logs a warning and falls back to defaults so the
    /// dashboard still starts.
    pub fn load() -> Self {
        let path = std::env::var("RACE_INSIGHTS_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
