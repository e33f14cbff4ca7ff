use crate::error::ConfigError;
use crate::geometry::DEFAULT_CURVE_OFFSET;
use crate::graph::DEFAULT_CONNECTION_KIND;
use crate::palette::{DEFAULT_ACTIVATION_DISTANCE, DEFAULT_QUESTION_ERROR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Tunables of the editor. Every field has a default, so a config file only
/// needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Horizontal control point offset of connection curves, in pixels.
    pub curve_offset: f64,
    /// Pointer travel before a palette press becomes a drag, in pixels.
    pub drag_activation_distance: f64,
    /// `tipo` given to new connections.
    pub connection_kind: String,
    /// Error message pre-filled on new question blocks.
    pub question_error_message: String,
    /// Simulated latency of a save, in milliseconds.
    pub save_delay_ms: u64,
    /// Simulated latency of a login, in milliseconds.
    pub login_delay_ms: u64,
    /// Account used for navigation when the session has none.
    pub default_account: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            curve_offset: DEFAULT_CURVE_OFFSET,
            drag_activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            connection_kind: DEFAULT_CONNECTION_KIND.to_string(),
            question_error_message: DEFAULT_QUESTION_ERROR.to_string(),
            save_delay_ms: 1000,
            login_delay_ms: 800,
            default_account: "exitonetimoveis".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Zero delays, for tests and batch tools.
    pub fn instant() -> Self {
        Self {
            save_delay_ms: 0,
            login_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.curve_offset.is_finite() {
            return Err(ConfigError::Invalid("curveOffset must be finite".to_string()));
        }
        if !self.drag_activation_distance.is_finite() || self.drag_activation_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "dragActivationDistance must be a non-negative number".to_string(),
            ));
        }
        if self.connection_kind.is_empty() {
            return Err(ConfigError::Invalid(
                "connectionKind must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}
