//! Runtime loading entrypoints for configuration files and import chains.

use serde_json::Value;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::value_kind;
use crate::merge::merge;
use crate::{Config, StrataError, StrataResult};

use super::Evaluator;
use super::error::{invalid_data, wrap_nested};
use super::imports::import_wildcard;
use super::path::{canonicalise, parent_dir};

/// Reserved top-level key declaring a file's imports.
const IMPORT_KEY: &str = "import";

/// Loads configuration files through an [`Evaluator`], resolving imports.
///
/// A file's value may carry a top-level `import` key holding a path pattern
/// (or an array of patterns) resolved relative to the file's directory.
/// Imported files form the base configuration and the importing file's own
/// settings merge over them. Import chains are cycle-checked.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use strata_config::{FileLoader, FormatEvaluator};
///
/// let loader = FileLoader::new(FormatEvaluator);
/// let config = loader.load(Path::new("config.toml"))?;
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FileLoader<E> {
    evaluator: E,
}

impl<E: Evaluator> FileLoader<E> {
    /// Create a loader delegating evaluation to `evaluator`.
    #[must_use]
    pub const fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Load the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`StrataError::File`] wrapping the underlying cause when
    /// evaluation or validation fails. A failure inside a nested import
    /// keeps the innermost file's path. Cyclic imports are reported as
    /// [`StrataError::CyclicImport`].
    pub fn load(&self, path: &Path) -> StrataResult<Config> {
        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        self.load_inner(path, &mut visited, &mut stack)
    }

    /// Expand `pattern` relative to `base_dir` and fold every matched file
    /// into `accumulator`.
    ///
    /// Matches load in lexicographic order, so later files win conflicts
    /// deterministically. A pattern with zero matches falls back to loading
    /// the literal path, surfacing a clear load error for missing
    /// non-wildcard imports.
    ///
    /// # Errors
    ///
    /// Returns the first load failure; `accumulator` merges are total and
    /// never fail themselves.
    pub fn import(
        &self,
        pattern: &str,
        base_dir: &Path,
        accumulator: Config,
    ) -> StrataResult<Config> {
        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        import_wildcard(self, pattern, base_dir, accumulator, &mut visited, &mut stack)
    }

    pub(super) fn load_inner(
        &self,
        path: &Path,
        visited: &mut HashSet<PathBuf>,
        stack: &mut Vec<PathBuf>,
    ) -> StrataResult<Config> {
        let canonical = canonicalise(path)?;
        if !visited.insert(canonical.clone()) {
            let mut cycle: Vec<String> = stack.iter().map(|p| p.display().to_string()).collect();
            cycle.push(canonical.display().to_string());
            return Err(std::sync::Arc::new(StrataError::CyclicImport {
                cycle: cycle.join(" -> "),
            }));
        }
        stack.push(canonical.clone());
        let result = self.load_evaluated(&canonical, visited, stack);
        stack.pop();
        visited.remove(&canonical);
        result
    }

    fn load_evaluated(
        &self,
        canonical: &Path,
        visited: &mut HashSet<PathBuf>,
        stack: &mut Vec<PathBuf>,
    ) -> StrataResult<Config> {
        let evaluation = self
            .evaluator
            .evaluate(canonical)
            .map_err(|e| wrap_nested(canonical, e))?;
        let (patterns, own_value) = take_imports(canonical, evaluation.into_config_value())?;
        let own = Config::from_value(own_value).map_err(|e| wrap_nested(canonical, e))?;

        let mut imported = Config::new();
        if !patterns.is_empty() {
            let base_dir = parent_dir(canonical)?;
            for pattern in &patterns {
                imported = import_wildcard(self, pattern, &base_dir, imported, visited, stack)?;
            }
        }
        tracing::debug!(
            path = %canonical.display(),
            apps = own.len(),
            imports = patterns.len(),
            "loaded configuration file"
        );
        Ok(merge(&imported, &own))
    }
}

/// Split the reserved `import` key out of a file's value.
///
/// Non-object values pass through untouched; the validator reports them.
fn take_imports(path: &Path, value: Value) -> StrataResult<(Vec<String>, Value)> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Ok((Vec::new(), other)),
    };
    let patterns = match map.shift_remove(IMPORT_KEY) {
        None => Vec::new(),
        Some(Value::String(pattern)) => vec![pattern],
        Some(Value::Array(entries)) => {
            let mut patterns = Vec::with_capacity(entries.len());
            for entry in entries {
                let Value::String(pattern) = entry else {
                    return Err(invalid_data(
                        path,
                        format!(
                            "'{IMPORT_KEY}' entries must be path patterns, found {}",
                            value_kind(&entry)
                        ),
                    ));
                };
                patterns.push(pattern);
            }
            patterns
        }
        Some(other) => {
            return Err(invalid_data(
                path,
                format!(
                    "'{IMPORT_KEY}' key must be a path pattern or array of patterns, found {}",
                    value_kind(&other)
                ),
            ));
        }
    };
    Ok((patterns, Value::Object(map)))
}
