use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("{component} support is not compiled in. Rebuild with: cargo build --features {feature}")]
    MissingDependency {
        component: &'static str,
        feature: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document generation failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Image generation failed: {0}")]
    Image(#[from] ImageError),
}

impl FixtureError {
    /// The install hint for a missing optional dependency, if this is one.
    pub fn remediation(&self) -> Option<String> {
        match self {
            FixtureError::MissingDependency { feature, .. } => {
                Some(format!("cargo build --features {}", feature))
            }
            _ => None,
        }
    }

    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, FixtureError::MissingDependency { .. })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write document '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize XML part '{part}': {message}")]
    Xml { part: String, message: String },

    #[error("Failed to build DOCX package: {0}")]
    Package(String),
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode image '{path}': {message}")]
    Encode { path: PathBuf, message: String },

    #[error("Failed to write image '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum StripError {
    #[error("Invalid parameter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid source glob '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to enumerate '{path}': {message}")]
    Enumerate { path: PathBuf, message: String },

    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StripError {
    /// Path of the file the error concerns, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            StripError::Enumerate { path, .. }
            | StripError::ReadFile { path, .. }
            | StripError::WriteFile { path, .. } => Some(path),
            StripError::Pattern(_) | StripError::Glob { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixtureError>;
