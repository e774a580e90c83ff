//! Editor configuration

use crate::layout::{LayoutConstraints, StyleSheet};
use crate::storage::STORAGE_KEY;
use serde::{Deserialize, Serialize};

/// Preview scaling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewConfig {
    /// Width kept free beside the page stack
    pub scale_margin: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            scale_margin: 8.0,
            min_scale: 0.5,
            max_scale: 1.0,
        }
    }
}

/// Debounced persistence parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutosaveConfig {
    /// Quiet period after the last edit before saving
    pub window_ms: u64,
    pub storage_key: String,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            window_ms: 500,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

/// Top-level editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub layout: LayoutConstraints,
    /// Metrics for the reference measurement oracle
    pub styles: StyleSheet,
    pub preview: PreviewConfig,
    pub autosave: AutosaveConfig,
}

impl EditorConfig {
    /// Load configuration from JSON; missing fields take defaults
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_layout(mut self, layout: LayoutConstraints) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_autosave_window(mut self, window_ms: u64) -> Self {
        self.autosave.window_ms = window_ms;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.autosave.storage_key = key.into();
        self
    }
}
