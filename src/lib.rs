pub mod audio;
pub mod batch;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod runtime;
#[cfg(test)]
mod test_support;
pub mod transcription;

use std::path::PathBuf;

use clap::Parser;

use crate::bootstrap::AppPaths;
use crate::cli::{Cli, Command};
use crate::config::{load_config, AppConfig};
use crate::error::AppResult;
use crate::output::OutputFormat;
use crate::runtime::{run_batch_command, run_file_command};

trait CommandExecutor {
    #[allow(clippy::too_many_arguments)]
    fn batch(
        &self,
        config: &AppConfig,
        paths: &AppPaths,
        folder: Option<PathBuf>,
        files: Vec<PathBuf>,
        pattern: String,
        output: Option<PathBuf>,
        json: bool,
    ) -> AppResult<()>;

    fn file(
        &self,
        config: &AppConfig,
        paths: &AppPaths,
        audio: PathBuf,
        format: OutputFormat,
        output: Option<PathBuf>,
    ) -> AppResult<()>;
}

struct DefaultCommandExecutor;

impl CommandExecutor for DefaultCommandExecutor {
    fn batch(
        &self,
        config: &AppConfig,
        paths: &AppPaths,
        folder: Option<PathBuf>,
        files: Vec<PathBuf>,
        pattern: String,
        output: Option<PathBuf>,
        json: bool,
    ) -> AppResult<()> {
        run_batch_command(config, paths, folder, files, &pattern, output, json)
    }

    fn file(
        &self,
        config: &AppConfig,
        paths: &AppPaths,
        audio: PathBuf,
        format: OutputFormat,
        output: Option<PathBuf>,
    ) -> AppResult<()> {
        run_file_command(config, paths, audio, format, output)
    }
}

fn execute_command<E: CommandExecutor>(
    command: Command,
    paths: AppPaths,
    config: AppConfig,
    executor: &E,
) -> AppResult<()> {
    match command {
        Command::Batch {
            folder,
            files,
            pattern,
            output,
            json,
        } => executor.batch(&config, &paths, folder, files, pattern, output, json),
        Command::File {
            audio,
            format,
            output,
        } => executor.file(&config, &paths, audio, format, output),
    }
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let paths = AppPaths::resolve()?;
    paths.ensure_dirs()?;

    let config = load_config(&paths, &cli.to_overrides())?;

    // RUST_LOG wins; the config supplies the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.diagnostics.log_level.clone().into()),
        )
        .with_target(false)
        .with_level(true)
        .compact()
        .init();

    execute_command(cli.command, paths, config, &DefaultCommandExecutor)
}
