use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pipeline::DEFAULT_ARTIFACT_PATH;

/// Everything read from `config.toml`. Missing keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub form: FormSettings,
}

/// Where the trained pipeline lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Artifact path; relative paths resolve against the working directory.
    #[serde(default = "default_artifact_path")]
    pub path: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            path: default_artifact_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default)]
    pub maximized: bool,
    #[serde(default = "default_min_width")]
    pub min_width: f32,
    #[serde(default = "default_min_height")]
    pub min_height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            maximized: false,
            min_width: default_min_width(),
            min_height: default_min_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSettings {
    /// Width of each text box and choice box, in points.
    #[serde(default = "default_input_width")]
    pub input_width: f32,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            input_width: default_input_width(),
        }
    }
}

impl AppSettings {
    /// Clamp values that would make the window or form unusable.
    pub fn normalized(mut self) -> Self {
        self.window.min_width = sane_or(self.window.min_width, default_min_width()).max(320.0);
        self.window.min_height = sane_or(self.window.min_height, default_min_height()).max(240.0);
        self.form.input_width = sane_or(self.form.input_width, default_input_width()).clamp(80.0, 800.0);
        self
    }
}

fn sane_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_PATH)
}

fn default_min_width() -> f32 {
    960.0
}

fn default_min_height() -> f32 {
    640.0
}

fn default_input_width() -> f32 {
    240.0
}
