pub mod engine;
pub mod worker;

pub use engine::{Transcript, TranscriptionService, WhisperEngine};
pub use worker::{spawn_transcription, TranscriptionTask};
