use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    /// Base URL of the app the fixtures are uploaded to; only used in the
    /// printed testing instructions.
    #[serde(default = "default_app_url")]
    pub app_url: String,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub stripper: StripperConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            app_url: default_app_url(),
            documents: DocumentsConfig::default(),
            images: ImagesConfig::default(),
            stripper: StripperConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    /// File name (or path) of the preferred TrueType font.
    #[serde(default = "default_font")]
    pub font: String,
    /// Extra directories searched before the platform font directories.
    #[serde(default)]
    pub font_directories: Vec<PathBuf>,
}

fn default_font() -> String {
    "arial.ttf".to_string()
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            font: default_font(),
            font_directories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripperConfig {
    #[serde(default = "default_source_directory")]
    pub source_directory: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_parameter")]
    pub parameter: String,
}

fn default_source_directory() -> PathBuf {
    PathBuf::from("lib")
}

fn default_extension() -> String {
    "dart".to_string()
}

fn default_parameter() -> String {
    "value".to_string()
}

impl Default for StripperConfig {
    fn default() -> Self {
        Self {
            source_directory: default_source_directory(),
            extension: default_extension(),
            parameter: default_parameter(),
        }
    }
}
