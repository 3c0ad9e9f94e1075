//! Filesystem glob helpers used by the workflow engine's artifact-capture action.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Find the most recently modified file under `root` matching `pattern` (a glob such as
/// `**/*.md` or `docs/*.json`).
///
/// Returns `Ok(None)` if no file matches. Never falls back to a partial match.
///
/// # Errors
///
/// Returns an error if `pattern` does not compile, or if reading file metadata fails.
pub fn find_latest_matching(root: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let full_pattern = root.join(pattern);
    let full_pattern_str = full_pattern
        .to_str()
        .ok_or_else(|| Error::invalid_argument(format!("non-UTF-8 glob pattern: {pattern}")))?;

    let mut best: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in glob::glob(full_pattern_str)
        .map_err(|e| Error::invalid_argument(format!("invalid glob pattern '{pattern}': {e}")))?
    {
        let path = entry.map_err(|e| Error::io(format!("glob walk failed: {e}")))?;
        if !path.is_file() {
            continue;
        }
        let modified = path
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| Error::io(format!("failed to stat {}: {e}", path.display())))?;
        if best.as_ref().is_none_or(|(t, _)| modified > *t) {
            best = Some((modified, path));
        }
    }

    Ok(best.map(|(_, path)| path))
}
