use std::path::Path;

use serde::Serialize;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::decode_audio;
use crate::config::TranscriptionConfig;
use crate::error::{AppError, AppResult};
use crate::models::ModelSize;

/// Text payload produced by the speech-recognition service for one input.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub text: String,
    pub language: Option<String>,
}

/// Seam between the drivers and the underlying speech-recognition model.
pub trait TranscriptionService: Send + Sync {
    fn model(&self) -> ModelSize;
    fn transcribe(&self, audio_path: &Path) -> AppResult<Transcript>;
}

/// whisper.cpp engine. The GGML context is loaded once per run and the handle
/// is passed explicitly to every caller; there is no process-global model.
pub struct WhisperEngine {
    ctx: WhisperContext,
    model: ModelSize,
    language: Option<String>,
    translate: bool,
    threads: i32,
}

impl WhisperEngine {
    pub fn load(
        model_path: &Path,
        model: ModelSize,
        config: &TranscriptionConfig,
    ) -> AppResult<Self> {
        let path_str = model_path.to_str().ok_or_else(|| {
            AppError::Model(format!(
                "model path {} is not valid UTF-8",
                model_path.display()
            ))
        })?;

        tracing::info!(model = %model, path = %model_path.display(), "loading model");
        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|error| {
                AppError::Model(format!(
                    "failed to load {}: {error}",
                    model_path.display()
                ))
            })?;

        Ok(Self {
            ctx,
            model,
            language: config.language.clone(),
            translate: config.translate,
            threads: effective_threads(config),
        })
    }
}

fn effective_threads(config: &TranscriptionConfig) -> i32 {
    match config.threads {
        Some(threads) => threads as i32,
        None => num_cpus::get().min(8) as i32,
    }
}

impl TranscriptionService for WhisperEngine {
    fn model(&self) -> ModelSize {
        self.model
    }

    fn transcribe(&self, audio_path: &Path) -> AppResult<Transcript> {
        let samples = decode_audio(audio_path)?;
        if samples.is_empty() {
            return Ok(Transcript {
                text: String::new(),
                language: self.language.clone(),
            });
        }

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.threads);
        params.set_translate(self.translate);
        if let Some(language) = self.language.as_deref() {
            params.set_language(Some(language));
        }
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|error| AppError::Transcription(format!("state init failed: {error}")))?;

        state
            .full(params, &samples)
            .map_err(|error| AppError::Transcription(format!("inference failed: {error}")))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|error| AppError::Transcription(format!("segment count failed: {error}")))?;

        let mut text = String::new();
        for i in 0..num_segments {
            let segment = state.full_get_segment_text(i).map_err(|error| {
                AppError::Transcription(format!("segment {i} read failed: {error}"))
            })?;
            text.push_str(&segment);
        }

        Ok(Transcript {
            text,
            language: self.language.clone(),
        })
    }
}
