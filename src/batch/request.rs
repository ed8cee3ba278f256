use std::path::{Path, PathBuf};

use crate::models::ModelSize;

pub const TRANSCRIPT_SUFFIX: &str = "_transcript";
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// One unit of batch work, constructed per discovered/listed file at run
/// start and immutable from then on.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub input: PathBuf,
    pub model: ModelSize,
    pub output_dir: Option<PathBuf>,
}

impl TranscriptionRequest {
    pub fn new(input: PathBuf, model: ModelSize, output_dir: Option<PathBuf>) -> Self {
        Self {
            input,
            model,
            output_dir,
        }
    }

    pub fn source_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }

    /// Artifact path: input stem + fixed suffix + fixed extension, either in
    /// the explicit output directory or alongside the input.
    pub fn artifact_path(&self) -> PathBuf {
        let stem = self
            .input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transcript".to_owned());
        let file_name = format!("{stem}{TRANSCRIPT_SUFFIX}.{TRANSCRIPT_EXTENSION}");

        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => self
                .input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TranscriptionRequest;
    use crate::models::ModelSize;
    use std::path::PathBuf;

    #[test]
    fn artifact_lands_next_to_the_input_by_default() {
        let request = TranscriptionRequest::new(
            PathBuf::from("/audio/voicemail.mp3"),
            ModelSize::Base,
            None,
        );
        assert_eq!(
            request.artifact_path(),
            PathBuf::from("/audio/voicemail_transcript.txt")
        );
        assert_eq!(request.source_name(), "voicemail.mp3");
    }

    #[test]
    fn explicit_output_directory_wins() {
        let request = TranscriptionRequest::new(
            PathBuf::from("/audio/voicemail.mp3"),
            ModelSize::Base,
            Some(PathBuf::from("/transcripts")),
        );
        assert_eq!(
            request.artifact_path(),
            PathBuf::from("/transcripts/voicemail_transcript.txt")
        );
    }

    #[test]
    fn multi_dot_names_keep_their_inner_dots() {
        let request = TranscriptionRequest::new(
            PathBuf::from("call.2026-01-05.wav"),
            ModelSize::Base,
            None,
        );
        assert_eq!(
            request.artifact_path(),
            PathBuf::from("call.2026-01-05_transcript.txt")
        );
    }
}
