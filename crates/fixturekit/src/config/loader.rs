use std::path::{Path, PathBuf};

use log::debug;

use crate::config::schema::Config;
use crate::error::ConfigError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FIXTUREKIT_CONFIG";

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "fixturekit.json";

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

/// Rejects unknown keys and wrong value types before deserialising, so a
/// misspelled setting is an error instead of a silent default.
fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

/// Loads `$FIXTUREKIT_CONFIG` if set, otherwise `fixturekit.json` in `dir`.
///
/// A missing default file is not an error; built-in defaults are used.
/// An explicitly named file must exist.
pub fn load_default_config<P: AsRef<Path>>(dir: P) -> Result<Config, ConfigError> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(explicit);
        debug!("Loading config from {} ({})", path.display(), CONFIG_ENV);
        return load_config(path);
    }

    let path = dir.as_ref().join(CONFIG_FILE);
    if path.is_file() {
        debug!("Loading config from {}", path.display());
        load_config(path)
    } else {
        debug!("No {} found, using defaults", CONFIG_FILE);
        Ok(Config::default())
    }
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.images.font.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "images.font must not be empty".to_string(),
        });
    }

    let stripper = &config.stripper;

    if !is_identifier(&stripper.parameter) {
        return Err(ConfigError::Validation {
            message: format!(
                "stripper.parameter '{}' is not a valid identifier",
                stripper.parameter
            ),
        });
    }

    if stripper.extension.is_empty()
        || stripper
            .extension
            .chars()
            .any(|c| c == '.' || c == '/' || c == '\\' || c == '*')
    {
        return Err(ConfigError::Validation {
            message: format!(
                "stripper.extension '{}' must be a bare extension like 'dart'",
                stripper.extension
            ),
        });
    }

    if stripper.source_directory.is_absolute() {
        return Err(ConfigError::Validation {
            message: format!(
                "stripper.source_directory '{}' must be relative",
                stripper.source_directory.display()
            ),
        });
    }

    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
