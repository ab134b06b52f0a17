//! Stand-ins used when the "image" feature is disabled.

use std::path::{Path, PathBuf};

use crate::config::ImagesConfig;
use crate::error::{FixtureError, Result};

fn missing() -> FixtureError {
    FixtureError::MissingDependency {
        component: "Image",
        feature: "image",
    }
}

/// Placeholder so callers can name the type without the feature.
pub struct FontSource;

impl FontSource {
    pub fn load(_config: &ImagesConfig) -> Self {
        FontSource
    }
}

pub fn create_agent_test_image(_dir: &Path, _fonts: &FontSource) -> Result<PathBuf> {
    Err(missing())
}

pub fn create_simple_text_image(_dir: &Path, _fonts: &FontSource) -> Result<PathBuf> {
    Err(missing())
}

pub fn create_all(_config: &ImagesConfig) -> Result<Vec<PathBuf>> {
    Err(missing())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_missing_feature() {
        let err = create_all(&ImagesConfig::default()).unwrap_err();
        assert!(err.is_missing_dependency());
        assert_eq!(err.remediation().as_deref(), Some("cargo build --features image"));
    }
}
