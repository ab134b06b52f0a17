//! Stand-ins used when the "docx" feature is disabled.

use std::path::{Path, PathBuf};

use crate::config::DocumentsConfig;
use crate::error::{FixtureError, Result};

fn missing() -> FixtureError {
    FixtureError::MissingDependency {
        component: "DOCX",
        feature: "docx",
    }
}

pub fn create_modeling_contract(_dir: &Path) -> Result<PathBuf> {
    Err(missing())
}

pub fn create_model_portfolio(_dir: &Path) -> Result<PathBuf> {
    Err(missing())
}

pub fn create_booking_details(_dir: &Path) -> Result<PathBuf> {
    Err(missing())
}

pub fn create_all(_config: &DocumentsConfig) -> Result<Vec<PathBuf>> {
    Err(missing())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_missing_feature() {
        let err = create_all(&DocumentsConfig::default()).unwrap_err();
        assert!(err.is_missing_dependency());
        assert_eq!(err.remediation().as_deref(), Some("cargo build --features docx"));
    }
}
