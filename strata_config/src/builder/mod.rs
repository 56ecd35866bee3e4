//! Explicit accumulator for sequential configuration declarations.
//!
//! Hosts with a scripted configuration surface evaluate a file as a sequence
//! of declaration statements. Each file evaluation owns one builder, threads
//! it through the statements in order, and returns the accumulated
//! configuration explicitly at the end. There is no implicit or global
//! accumulator state.

use serde_json::{Map, Value};

use std::path::{Path, PathBuf};

use crate::file::{Evaluator, FileLoader};
use crate::merge::{merge, merge_values, merge_with};
use crate::{Config, StrataResult};

#[cfg(any(feature = "toml", feature = "json"))]
use crate::file::FormatEvaluator;

/// Accumulates declaration and import steps into one configuration.
///
/// Later declarations win conflicts, matching the "last declaration wins"
/// expectation when environment-specific overrides stack after base
/// configuration.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use strata_config::ConfigBuilder;
///
/// let config = ConfigBuilder::new(".")
///     .config("ecto", json!({"pool_size": 5}))?
///     .config_key("ecto", "Repo", json!({"hostname": "localhost"}))?
///     .config_key("ecto", "Repo", json!({"port": 5432}))?
///     .finish();
/// let repo = config.get("ecto").and_then(|s| s.get("Repo")).cloned();
/// assert_eq!(repo, Some(json!({"hostname": "localhost", "port": 5432})));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Debug)]
pub struct ConfigBuilder<E> {
    accumulator: Config,
    base_dir: PathBuf,
    loader: FileLoader<E>,
}

#[cfg(any(feature = "toml", feature = "json"))]
impl ConfigBuilder<FormatEvaluator> {
    /// Create an empty accumulator importing files relative to `base_dir`,
    /// using the built-in format evaluator.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_evaluator(base_dir, FormatEvaluator)
    }
}

impl<E: Evaluator> ConfigBuilder<E> {
    /// Create an empty accumulator delegating file evaluation to `evaluator`.
    #[must_use]
    pub fn with_evaluator(base_dir: impl Into<PathBuf>, evaluator: E) -> Self {
        Self {
            accumulator: Config::new(),
            base_dir: base_dir.into(),
            loader: FileLoader::new(evaluator),
        }
    }

    /// Merge `settings` for `app` into the accumulator.
    ///
    /// # Errors
    ///
    /// Returns a shape error when `settings` is not a keyed mapping.
    pub fn config(mut self, app: &str, settings: Value) -> StrataResult<Self> {
        let mut outer = Map::new();
        outer.insert(app.to_owned(), settings);
        let incoming = Config::from_value(Value::Object(outer))?;
        self.accumulator = merge(&self.accumulator, &incoming);
        Ok(self)
    }

    /// Merge `opts` under `key` for `app`, accumulating rather than
    /// overwriting a prior declaration for the same key.
    ///
    /// The conflict callback applies one more level of keyed merging, so
    /// declaring `{"a": 1}` and then `{"b": 2}` for the same key yields
    /// `{"a": 1, "b": 2}`.
    ///
    /// # Errors
    ///
    /// Returns a shape error when the resulting declaration is malformed.
    pub fn config_key(mut self, app: &str, key: &str, opts: Value) -> StrataResult<Self> {
        let mut settings = Map::new();
        settings.insert(key.to_owned(), opts);
        let mut outer = Map::new();
        outer.insert(app.to_owned(), Value::Object(settings));
        let incoming = Config::from_value(Value::Object(outer))?;
        self.accumulator = merge_with(&self.accumulator, &incoming, |_, _, left, right| {
            merge_values(left, right)
        });
        Ok(self)
    }

    /// Fold every file matched by `pattern` into the accumulator at this
    /// point in the declaration sequence.
    ///
    /// # Errors
    ///
    /// Propagates any load failure; see [`FileLoader::import`].
    pub fn import(mut self, pattern: &str) -> StrataResult<Self> {
        let accumulator = std::mem::take(&mut self.accumulator);
        self.accumulator = self.loader.import(pattern, &self.base_dir, accumulator)?;
        Ok(self)
    }

    /// Directory against which import patterns resolve.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The configuration accumulated so far.
    #[must_use]
    pub const fn current(&self) -> &Config {
        &self.accumulator
    }

    /// Return the accumulated configuration.
    #[must_use]
    pub fn finish(self) -> Config {
        self.accumulator
    }
}
