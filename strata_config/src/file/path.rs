//! Filesystem path helpers used while resolving imports.

use crate::StrataResult;

use std::path::{Path, PathBuf};

use super::error::{file_error, invalid_data};

/// Canonicalise `p` using platform-specific rules.
///
/// Returns an absolute, normalised path with symlinks resolved, so paths
/// reached through different spellings collapse to one cycle-detection key.
/// On Windows the `dunce` crate is used to avoid introducing UNC prefixes in
/// diagnostic messages.
///
/// # Errors
///
/// Returns a [`crate::StrataError::File`] naming `p` if canonicalisation
/// fails, including when the file does not exist.
pub fn canonicalise(p: &Path) -> StrataResult<PathBuf> {
    #[cfg(windows)]
    {
        dunce::canonicalize(p).map_err(|e| file_error(p, e))
    }
    #[cfg(not(windows))]
    {
        std::fs::canonicalize(p).map_err(|e| file_error(p, e))
    }
}

/// Directory against which a file's own imports are resolved.
pub(super) fn parent_dir(path: &Path) -> StrataResult<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            invalid_data(
                path,
                "cannot determine parent directory for resolving imports",
            )
        })
}
