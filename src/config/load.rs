use std::path::PathBuf;

use crate::bootstrap::AppPaths;
use crate::config::schema::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::ModelSize;

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub model: Option<ModelSize>,
    pub language: Option<String>,
    pub translate: Option<bool>,
    pub threads: Option<u32>,
    pub models_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

pub fn load_config(paths: &AppPaths, overrides: &CliOverrides) -> AppResult<AppConfig> {
    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(|| paths.config_file.clone());

    let mut config = if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)?;
        toml::from_str::<AppConfig>(&raw)?
    } else {
        let defaults = AppConfig::default();
        write_default_config(&config_path, &defaults)?;
        defaults
    };

    if config.models.dir.is_none() {
        config.models.dir = Some(paths.models_dir.clone());
    }

    apply_env_overrides(&mut config);
    apply_cli_overrides(&mut config, overrides);

    validate(&config)?;
    Ok(config)
}

fn write_default_config(path: &PathBuf, defaults: &AppConfig) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = toml::to_string_pretty(defaults)?;
    std::fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}

fn validate(config: &AppConfig) -> AppResult<()> {
    if config.transcription.threads == Some(0) {
        return Err(AppError::Config(
            "transcription.threads must be > 0 when set".to_owned(),
        ));
    }

    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(value) = std::env::var("VOXSCRIBE_MODEL") {
        if let Some(parsed) = parse_model_size(&value) {
            config.transcription.model = parsed;
        }
    }
    if let Ok(value) = std::env::var("VOXSCRIBE_LANGUAGE") {
        config.transcription.language = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }
    if let Ok(value) = std::env::var("VOXSCRIBE_TRANSLATE") {
        if let Some(parsed) = parse_bool(&value) {
            config.transcription.translate = parsed;
        }
    }
    if let Ok(value) = std::env::var("VOXSCRIBE_THREADS") {
        if let Ok(parsed) = value.parse::<u32>() {
            config.transcription.threads = Some(parsed);
        }
    }
    if let Ok(value) = std::env::var("VOXSCRIBE_MODELS_DIR") {
        if !value.trim().is_empty() {
            config.models.dir = Some(PathBuf::from(value));
        }
    }
    if let Ok(value) = std::env::var("VOXSCRIBE_AUTO_DOWNLOAD") {
        if let Some(parsed) = parse_bool(&value) {
            config.models.auto_download = parsed;
        }
    }
    if let Ok(value) = std::env::var("VOXSCRIBE_OUTPUT_DIR") {
        if !value.trim().is_empty() {
            config.output.dir = Some(PathBuf::from(value));
        }
    }
    if let Ok(value) = std::env::var("VOXSCRIBE_LOG_LEVEL") {
        config.diagnostics.log_level = value;
    }
}

fn apply_cli_overrides(config: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(value) = overrides.model {
        config.transcription.model = value;
    }
    if let Some(value) = &overrides.language {
        config.transcription.language = Some(value.clone());
    }
    if let Some(value) = overrides.translate {
        config.transcription.translate = value;
    }
    if let Some(value) = overrides.threads {
        config.transcription.threads = Some(value);
    }
    if let Some(value) = &overrides.models_dir {
        config.models.dir = Some(value.clone());
    }
    if let Some(value) = &overrides.output_dir {
        config.output.dir = Some(value.clone());
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_model_size(value: &str) -> Option<ModelSize> {
    match value.trim().to_ascii_lowercase().as_str() {
        "tiny" => Some(ModelSize::Tiny),
        "base" => Some(ModelSize::Base),
        "small" => Some(ModelSize::Small),
        "medium" => Some(ModelSize::Medium),
        "large" => Some(ModelSize::Large),
        _ => None,
    }
}
