//! The evaluator seam: turning a source file into a nested value.
//!
//! The engine does not parse files itself. An [`Evaluator`] executes a file
//! and reports what the evaluation produced: a returned value plus any named
//! bindings established during evaluation. The engine only ever looks for
//! the [`ACCUMULATOR_BINDING`] binding; hosts with richer evaluation models
//! (scripted configuration, templating) implement the trait themselves.

use serde_json::{Map, Value};

use std::path::Path;

use crate::StrataResult;

#[cfg(any(feature = "toml", feature = "json"))]
use super::error::{file_error, invalid_data};

/// Name of the binding holding a file's accumulated configuration.
///
/// When an evaluation establishes this binding its value takes precedence
/// over the file's returned value. Absence of the binding is not an error.
pub const ACCUMULATOR_BINDING: &str = "config";

/// Outcome of evaluating one configuration source file.
#[derive(Clone, Debug)]
pub struct Evaluation {
    returned: Value,
    bindings: Map<String, Value>,
}

impl Evaluation {
    /// Evaluation that produced only a returned value.
    #[must_use]
    pub fn new(returned: Value) -> Self {
        Self {
            returned,
            bindings: Map::new(),
        }
    }

    /// Record a named binding established during evaluation.
    #[must_use]
    pub fn with_binding(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }

    /// The value the engine treats as the file's configuration.
    ///
    /// The [`ACCUMULATOR_BINDING`] binding wins when present; otherwise the
    /// returned value stands.
    #[must_use]
    pub fn into_config_value(mut self) -> Value {
        self.bindings
            .shift_remove(ACCUMULATOR_BINDING)
            .unwrap_or(self.returned)
    }
}

/// External collaborator that executes a configuration source file.
pub trait Evaluator {
    /// Evaluate the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::StrataError`] when the file cannot be read or its
    /// evaluation fails; the loader wraps causes with the file's path.
    fn evaluate(&self, path: &Path) -> StrataResult<Evaluation>;
}

/// Built-in evaluator parsing declarative files by extension.
///
/// `.toml` files parse as TOML (with the `toml` feature) and `.json` files
/// as JSON (with the `json` feature); any other extension is rejected with
/// a file error rather than guessed at. Declarative formats return their
/// whole document and establish no bindings.
#[cfg(any(feature = "toml", feature = "json"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct FormatEvaluator;

#[cfg(any(feature = "toml", feature = "json"))]
impl Evaluator for FormatEvaluator {
    fn evaluate(&self, path: &Path) -> StrataResult<Evaluation> {
        let data = std::fs::read_to_string(path).map_err(|e| file_error(path, e))?;
        parse_by_format(path, &data).map(Evaluation::new)
    }
}

/// Parse configuration data according to the file extension.
#[cfg(any(feature = "toml", feature = "json"))]
fn parse_by_format(path: &Path, data: &str) -> StrataResult<Value> {
    use figment::Figment;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("json") => {
            #[cfg(feature = "json")]
            {
                use figment::providers::{Format, Json};
                Figment::from(Json::string(data))
            }
            #[cfg(not(feature = "json"))]
            {
                return Err(file_error(
                    path,
                    std::io::Error::other(
                        "json feature disabled: enable the 'json' feature to support this file format",
                    ),
                ));
            }
        }
        Some("toml") => {
            #[cfg(feature = "toml")]
            {
                use figment::providers::{Format, Toml};
                // Validate TOML first so parse failures are reported with this
                // file's context before Figment performs its own parse pass.
                toml::from_str::<toml::Value>(data).map_err(|e| file_error(path, e))?;
                Figment::from(Toml::string(data))
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(file_error(
                    path,
                    std::io::Error::other(
                        "toml feature disabled: enable the 'toml' feature to support this file format",
                    ),
                ));
            }
        }
        Some(other) => {
            return Err(invalid_data(
                path,
                format!("unsupported configuration format '{other}': expected 'toml' or 'json'"),
            ));
        }
        None => {
            return Err(invalid_data(
                path,
                "missing file extension: expected 'toml' or 'json'",
            ));
        }
    };
    figment.extract().map_err(|e| file_error(path, e))
}
