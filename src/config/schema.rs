use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::ModelSize;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub transcription: TranscriptionConfig,
    pub models: ModelsConfig,
    pub output: OutputConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub model: ModelSize,
    pub language: Option<String>,
    pub translate: bool,
    pub threads: Option<u32>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: ModelSize::Base,
            language: None,
            translate: false,
            threads: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub dir: Option<PathBuf>,
    pub auto_download: bool,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            auto_download: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Default transcript directory; per-invocation flags override it, and
    /// without either the artifact lands next to its input.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub log_level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
        }
    }
}
