use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CliOverrides;
use crate::models::ModelSize;
use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "voxscribe")]
#[command(about = "Batch speech-to-text transcription for audio files")]
pub struct Cli {
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub model: Option<ModelSize>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub translate: Option<bool>,

    #[arg(long)]
    pub threads: Option<u32>,

    #[arg(long)]
    pub models_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Transcribe every matching audio file in a folder, or an explicit list.
    Batch {
        /// Folder to scan for audio files.
        #[arg(long)]
        folder: Option<PathBuf>,

        /// Explicit audio files to transcribe, in order.
        #[arg(long, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Glob-style name pattern applied in folder mode.
        #[arg(long, default_value = "*")]
        pattern: String,

        /// Directory for transcript artifacts (default: next to each input).
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Emit the run summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Transcribe a single audio file.
    File {
        /// Path to the audio file.
        audio: PathBuf,

        #[arg(long, value_enum, default_value = "txt")]
        format: OutputFormat,

        /// Output file path (auto-generated from the input when omitted).
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn to_overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
            model: self.model,
            language: self.language.clone(),
            translate: self.translate,
            threads: self.threads,
            models_dir: self.models_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::models::ModelSize;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn batch_arguments_parse_with_overrides() {
        let cli = Cli::parse_from([
            "voxscribe",
            "--model",
            "medium",
            "--threads",
            "4",
            "batch",
            "--folder",
            "./voicemails",
            "--pattern",
            "*call*",
            "-o",
            "./transcripts",
        ]);

        let overrides = cli.to_overrides();
        assert_eq!(overrides.model, Some(ModelSize::Medium));
        assert_eq!(overrides.threads, Some(4));

        match cli.command {
            Command::Batch {
                folder,
                files,
                pattern,
                output,
                json,
            } => {
                assert_eq!(folder, Some(PathBuf::from("./voicemails")));
                assert!(files.is_empty());
                assert_eq!(pattern, "*call*");
                assert_eq!(output, Some(PathBuf::from("./transcripts")));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn file_list_mode_keeps_input_order() {
        let cli = Cli::parse_from([
            "voxscribe", "batch", "--files", "a.mp3", "b.wav", "c.flac",
        ]);

        match cli.command {
            Command::Batch { files, .. } => {
                assert_eq!(
                    files,
                    vec![
                        PathBuf::from("a.mp3"),
                        PathBuf::from("b.wav"),
                        PathBuf::from("c.flac"),
                    ]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
