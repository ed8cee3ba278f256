use std::path::{Path, PathBuf};

use crate::batch::{discover_audio_files, run_batch, BatchObserver, ItemReport, ItemStatus, TranscriptionRequest};
use crate::bootstrap::AppPaths;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::ModelCatalog;
use crate::output::{default_single_output, render_console, OutputFormat, TranscriptRecord};
use crate::transcription::{TranscriptionService, WhisperEngine};

/// Prints per-item progress as the batch runs, in the shape users of the
/// original tool expect.
pub struct ConsoleObserver;

impl BatchObserver for ConsoleObserver {
    fn item_started(&mut self, index: usize, total: usize, input: &Path) {
        let name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        println!("[{}/{}] Processing: {}", index + 1, total, name);
    }

    fn item_finished(&mut self, _index: usize, _total: usize, report: &ItemReport) {
        match &report.status {
            ItemStatus::Succeeded { artifact, .. } => {
                println!("  ✓ Saved to: {}", artifact.display());
            }
            ItemStatus::Failed { reason } => {
                println!("  ✗ Failed: {reason}");
            }
        }
        println!();
    }
}

#[derive(Debug, PartialEq)]
enum InputSelection {
    Folder { root: PathBuf },
    Explicit { files: Vec<PathBuf> },
}

/// Exactly one input mode must be supplied; anything else is a pre-run usage
/// error, not a mid-run one.
fn select_input_mode(
    folder: Option<PathBuf>,
    files: Vec<PathBuf>,
) -> AppResult<InputSelection> {
    match (folder, files.is_empty()) {
        (Some(root), true) => Ok(InputSelection::Folder { root }),
        (None, false) => Ok(InputSelection::Explicit { files }),
        (Some(_), false) => Err(AppError::Config(
            "--folder and --files are mutually exclusive".to_owned(),
        )),
        (None, true) => Err(AppError::Config(
            "either --folder or --files must be supplied".to_owned(),
        )),
    }
}

fn build_engine(config: &AppConfig, paths: &AppPaths) -> AppResult<WhisperEngine> {
    let models_dir = config
        .models
        .dir
        .clone()
        .unwrap_or_else(|| paths.models_dir.clone());
    let catalog = ModelCatalog::new(models_dir, config.models.auto_download);

    let model = config.transcription.model;
    let model_path = catalog.resolve(model)?;
    WhisperEngine::load(&model_path, model, &config.transcription)
}

#[allow(clippy::too_many_arguments)]
pub fn run_batch_command(
    config: &AppConfig,
    paths: &AppPaths,
    folder: Option<PathBuf>,
    files: Vec<PathBuf>,
    pattern: &str,
    output: Option<PathBuf>,
    json: bool,
) -> AppResult<()> {
    let inputs = match select_input_mode(folder, files)? {
        InputSelection::Folder { root } => {
            let discovered = discover_audio_files(&root, pattern)?;
            if discovered.is_empty() {
                println!(
                    "No audio files found in '{}' matching pattern '{}'",
                    root.display(),
                    pattern
                );
                return Ok(());
            }
            println!("Found {} audio files to transcribe", discovered.len());
            discovered
        }
        InputSelection::Explicit { files } => {
            println!("Processing {} files", files.len());
            files
        }
    };

    let output_dir = output.or_else(|| config.output.dir.clone());
    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
        println!("Output directory: {}", dir.display());
    } else {
        println!("Output directory: Same as input files");
    }
    println!("{}", "-".repeat(50));

    let model = config.transcription.model;
    let requests: Vec<TranscriptionRequest> = inputs
        .into_iter()
        .map(|input| TranscriptionRequest::new(input, model, output_dir.clone()))
        .collect();

    let engine = build_engine(config, paths)?;
    let report = run_batch(&engine, &requests, &mut ConsoleObserver);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary.render_text());
    }
    Ok(())
}

pub fn run_file_command(
    config: &AppConfig,
    paths: &AppPaths,
    audio: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> AppResult<()> {
    if !audio.is_file() {
        return Err(AppError::NotFound { path: audio });
    }

    let engine = build_engine(config, paths)?;
    let source_name = audio
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| audio.display().to_string());
    println!("Transcribing: {source_name}");

    let transcript = engine.transcribe(&audio)?;
    let text = transcript.text.trim().to_owned();

    if format == OutputFormat::Console {
        println!("{}", render_console(&text));
        return Ok(());
    }

    let destination = output
        .or_else(|| default_single_output(&audio, format))
        .ok_or_else(|| AppError::Config("no destination for the selected format".to_owned()))?;

    match format {
        OutputFormat::Json => {
            let record = TranscriptRecord {
                file: source_name,
                model: engine.model().label().to_owned(),
                language: transcript.language.clone(),
                generated_at: chrono::Local::now().to_rfc3339(),
                text,
            };
            std::fs::write(&destination, serde_json::to_string_pretty(&record)?)?;
            println!("Full results saved to: {}", destination.display());
        }
        _ => {
            std::fs::write(&destination, &text)?;
            println!("Transcript saved to: {}", destination.display());
        }
    }
    Ok(())
}
