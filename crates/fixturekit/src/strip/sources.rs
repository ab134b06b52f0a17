use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::debug;

use crate::error::StripError;

/// Hidden files are skipped, and `*` never crosses a path
/// separator.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Builds `<root>/<source_directory>/**/*.<extension>` with the fixed part
/// escaped, so glob metacharacters in the root path match literally.
pub fn source_pattern(root: &Path, source_directory: &Path, extension: &str) -> String {
    let base = root.join(source_directory);
    format!(
        "{}/**/*.{}",
        Pattern::escape(&base.to_string_lossy()),
        Pattern::escape(extension)
    )
}

/// Recursively lists matching source files in sorted order.
///
/// Unreadable entries are returned as errors in place so the caller can
/// report them and carry on with the rest.
pub fn find_sources(
    root: &Path,
    source_directory: &Path,
    extension: &str,
) -> Result<Vec<Result<PathBuf, StripError>>, StripError> {
    let pattern = source_pattern(root, source_directory, extension);
    debug!("Scanning {}", pattern);

    let paths = glob::glob_with(&pattern, MATCH_OPTIONS).map_err(|e| StripError::Glob {
        pattern: pattern.clone(),
        source: e,
    })?;

    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(Ok(path)),
            Ok(_) => None,
            Err(e) => Some(Err(StripError::Enumerate {
                path: e.path().to_path_buf(),
                message: e.error().to_string(),
            })),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("lib/b.dart"));
        touch(&root.join("lib/a.dart"));
        touch(&root.join("lib/widgets/forms/input.dart"));
        touch(&root.join("lib/readme.md"));
        touch(&root.join("test/a_test.dart"));

        let found: Vec<PathBuf> = find_sources(root, Path::new("lib"), "dart")
            .unwrap()
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(
            found,
            vec![
                root.join("lib/a.dart"),
                root.join("lib/b.dart"),
                root.join("lib/widgets/forms/input.dart"),
            ]
        );
    }

    #[test]
    fn test_hidden_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("lib/.hidden.dart"));
        touch(&root.join("lib/shown.dart"));

        let found: Vec<PathBuf> = find_sources(root, Path::new("lib"), "dart")
            .unwrap()
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(found, vec![root.join("lib/shown.dart")]);
    }

    #[test]
    fn test_directories_named_like_sources_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("lib/weird.dart")).unwrap();
        touch(&root.join("lib/real.dart"));

        let found = find_sources(root, Path::new("lib"), "dart").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_missing_source_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = find_sources(dir.path(), Path::new("lib"), "dart").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_pattern_escapes_root() {
        let pattern = source_pattern(Path::new("/tmp/[proj]"), Path::new("lib"), "dart");
        assert_eq!(pattern, "/tmp/[[]proj[]]/lib/**/*.dart");
    }
}
