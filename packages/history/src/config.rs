use crate::ConfigError;
use navtrail_common::{MarkerLayerId, NAVIGATION_LAYER};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "navtrail.config.json";

/// Default bound on the number of history entries
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// What happens to the history cursor when removals leave it past the end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorClamp {
    /// Jump back to the newest entry
    #[default]
    ResetToZero,

    /// Move to the oldest remaining entry, staying as deep as possible
    ShiftTowardHead,
}

/// Navigation history configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Maximum number of anchors kept; older ones are evicted
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    #[serde(default)]
    pub cursor_clamp: CursorClamp,

    /// Marker layer reserved for navigation tags
    #[serde(default = "default_marker_layer")]
    pub marker_layer: MarkerLayerId,

    /// Navigate to anchors whose marker was lost, using their last offset,
    /// instead of dropping them
    #[serde(default)]
    pub follow_stale_anchors: bool,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_marker_layer() -> MarkerLayerId {
    NAVIGATION_LAYER
}

impl HistoryConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Capacity actually enforced; a history always keeps the newest entry
    pub fn capacity(&self) -> usize {
        self.max_length.max(1)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            cursor_clamp: CursorClamp::default(),
            marker_layer: default_marker_layer(),
            follow_stale_anchors: false,
        }
    }
}
