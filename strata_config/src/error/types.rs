//! Primary error enum for configuration loading flows.

use std::sync::Arc;

use thiserror::Error;

/// Result alias used throughout the crate.
///
/// Errors are reference counted so a single failure can be reported through
/// several layers of a load without cloning the underlying cause.
pub type StrataResult<T> = Result<T, Arc<StrataError>>;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// The top-level value is not a keyed mapping of application settings.
    #[error("expected a keyed mapping of application settings, found {found}")]
    TopLevelShape {
        /// JSON type of the offending value.
        found: &'static str,
    },

    /// An application's settings are not themselves a keyed mapping.
    #[error("settings for application '{app}' must be a keyed mapping, found {found}")]
    AppShape {
        /// Application whose settings are malformed.
        app: String,
        /// JSON type of the offending value.
        found: &'static str,
    },

    /// Error originating from a configuration file.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the load failure.
        path: std::path::PathBuf,
        /// Underlying error reported by the evaluator or validator.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Cycle detected while resolving imports.
    #[error("cyclic import detected: {cycle}")]
    CyclicImport {
        /// Chain of configuration files participating in the cycle.
        cycle: String,
    },

    /// The environment store rejected a commit.
    #[error("failed to persist '{key}' for application '{app}': {message}")]
    Persist {
        /// Application whose setting could not be committed.
        app: String,
        /// Setting key that could not be committed.
        key: String,
        /// Explanation supplied by the store.
        message: String,
    },
}
