use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Model size tiers, smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelSize {
    Tiny,
    #[default]
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub fn label(self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// GGML artifact name as published in the upstream whisper.cpp model repo.
    pub fn artifact_name(self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::Large => "ggml-large-v3.bin",
        }
    }

    pub fn all() -> [ModelSize; 5] {
        [
            ModelSize::Tiny,
            ModelSize::Base,
            ModelSize::Small,
            ModelSize::Medium,
            ModelSize::Large,
        ]
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Locates GGML model artifacts on disk, fetching missing ones when allowed.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models_dir: PathBuf,
    auto_download: bool,
}

impl ModelCatalog {
    pub fn new(models_dir: PathBuf, auto_download: bool) -> Self {
        Self {
            models_dir,
            auto_download,
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn resolve(&self, size: ModelSize) -> AppResult<PathBuf> {
        let path = self.models_dir.join(size.artifact_name());
        if path.exists() {
            return Ok(path);
        }

        if !self.auto_download {
            return Err(AppError::Model(format!(
                "model `{}` not found at {} and auto download is disabled",
                size,
                path.display()
            )));
        }

        self.download(size, &path)?;
        Ok(path)
    }

    fn download(&self, size: ModelSize, dest: &Path) -> AppResult<()> {
        std::fs::create_dir_all(&self.models_dir)?;

        let url = format!("{MODEL_BASE_URL}/{}", size.artifact_name());
        tracing::info!(model = %size, %url, "downloading model artifact");

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(30))
            .timeout_read(Duration::from_secs(600))
            .build();

        let response = agent.get(&url).call().map_err(|error| {
            AppError::Model(format!("download of `{}` failed: {error}", size))
        })?;

        // Stage into a temp file so an interrupted fetch never leaves a
        // truncated artifact at the resolved path.
        let mut staging = tempfile::NamedTempFile::new_in(&self.models_dir)?;
        let mut reader = response.into_reader();
        std::io::copy(&mut reader, &mut staging)?;
        staging
            .persist(dest)
            .map_err(|error| AppError::Model(format!("could not place model artifact: {error}")))?;

        tracing::info!(model = %size, path = %dest.display(), "model artifact ready");
        Ok(())
    }
}
