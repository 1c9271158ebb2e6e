//! Source file enumeration.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

const SOURCE_SUFFIX: &str = ".go";
const TEST_SUFFIX: &str = "_test.go";

/// Whether a path names a Go source file that belongs in the registry scan.
pub fn is_source_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(SOURCE_SUFFIX) && !name.ends_with(TEST_SUFFIX))
}

/// Recursively list the non-test `.go` files under `root`.
///
/// Directory entries are visited in file-name order, so the result is the
/// same on every run.
pub fn list_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Enumeration {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() || !is_source_file(entry.path()) {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}
