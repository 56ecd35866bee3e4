//! Error constructors shared by file loading helpers.

use crate::StrataError;

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

/// Construct a [`StrataError::File`] for a configuration path.
pub(super) fn file_error(
    path: &Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<StrataError> {
    Arc::new(StrataError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

pub(super) fn invalid_data(path: &Path, msg: impl Into<String>) -> Arc<StrataError> {
    file_error(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
    )
}

/// Wrap `err` with `path` unless it already carries file provenance.
///
/// Errors raised while loading a nested import are forwarded unchanged so
/// diagnostics keep the innermost file's path rather than the importer's.
pub(super) fn wrap_nested(path: &Path, err: Arc<StrataError>) -> Arc<StrataError> {
    if err.has_file_context() {
        err
    } else {
        file_error(path, err)
    }
}
