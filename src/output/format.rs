use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
    Console,
}

/// Full record serialized by the single-file `json` format.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord {
    pub file: String,
    pub model: String,
    pub language: Option<String>,
    pub generated_at: String,
    pub text: String,
}

/// Where the single-file variant writes when `--output` is omitted; `None`
/// for console output, which writes nowhere.
pub fn default_single_output(input: &Path, format: OutputFormat) -> Option<PathBuf> {
    match format {
        OutputFormat::Txt => Some(input.with_extension("txt")),
        OutputFormat::Json => Some(input.with_extension("json")),
        OutputFormat::Console => None,
    }
}

pub fn render_console(text: &str) -> String {
    let bar = "=".repeat(50);
    format!("\n{bar}\nTRANSCRIPTION\n{bar}\n{text}\n{bar}")
}
