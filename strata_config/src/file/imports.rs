//! Wildcard expansion and folding of imported configuration files.

use std::collections::HashSet;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::merge::merge;
use crate::{Config, StrataResult};

use super::Evaluator;
use super::error::file_error;
use super::loader::FileLoader;

/// Expand `pattern` and fold every matched file into `accumulator`.
pub(super) fn import_wildcard<E: Evaluator>(
    loader: &FileLoader<E>,
    pattern: &str,
    base_dir: &Path,
    accumulator: Config,
    visited: &mut HashSet<PathBuf>,
    stack: &mut Vec<PathBuf>,
) -> StrataResult<Config> {
    let mut acc = accumulator;
    for path in expand_pattern(pattern, base_dir)? {
        let loaded = loader.load_inner(&path, visited, stack)?;
        acc = merge(&acc, &loaded);
    }
    Ok(acc)
}

/// Expand a path pattern relative to `base_dir`.
///
/// Matches are sorted lexicographically so the fold order, and with it any
/// conflict outcome, is independent of filesystem enumeration order. A
/// pattern with no matches degrades to the literal path, so a missing
/// non-wildcard import is attempted and reported rather than skipped.
fn expand_pattern(pattern: &str, base_dir: &Path) -> StrataResult<Vec<PathBuf>> {
    let resolved = if Path::new(pattern).is_absolute() {
        PathBuf::from(pattern)
    } else {
        base_dir.join(pattern)
    };
    let entries =
        glob::glob(&resolved.to_string_lossy()).map_err(|e| file_error(&resolved, e))?;
    let mut matches = collect_matches(&resolved, entries)?;
    if matches.is_empty() {
        matches.push(resolved);
    }
    tracing::debug!(pattern, matched = matches.len(), "expanded import pattern");
    Ok(matches)
}

/// Gather expansion results, propagating the first failed entry.
///
/// Expansion can fail per path, not just per pattern (an intermediate
/// directory becoming unreadable mid-walk, for example). Dropping such
/// entries would fold a partial file set without any error, so the first
/// failure aborts the import instead.
pub(super) fn collect_matches<I, E>(pattern_path: &Path, entries: I) -> StrataResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = Result<PathBuf, E>>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    let mut matches = Vec::new();
    for entry in entries {
        matches.push(entry.map_err(|e| file_error(pattern_path, e))?);
    }
    matches.sort();
    Ok(matches)
}
