//! Constructors and classification helpers for `StrataError`.

use std::sync::Arc;

use serde_json::Value;

use super::StrataError;

/// Human-readable name of a JSON value's type, used in shape diagnostics.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(..) => "bool",
        Value::Number(..) => "number",
        Value::String(..) => "string",
        Value::Array(..) => "array",
        Value::Object(..) => "object",
    }
}

impl StrataError {
    /// Construct a top-level shape error describing `value`.
    #[must_use]
    pub fn top_level_shape(value: &Value) -> Arc<Self> {
        Arc::new(Self::TopLevelShape {
            found: value_kind(value),
        })
    }

    /// Construct a per-application shape error describing `value`.
    #[must_use]
    pub fn app_shape(app: impl Into<String>, value: &Value) -> Arc<Self> {
        Arc::new(Self::AppShape {
            app: app.into(),
            found: value_kind(value),
        })
    }

    /// Construct a persistence error for one `(app, key)` commit.
    #[must_use]
    pub fn persist(
        app: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::Persist {
            app: app.into(),
            key: key.into(),
            message: message.into(),
        })
    }

    /// Whether this error already carries file provenance.
    ///
    /// Load sites use this to decide between forwarding an error unchanged
    /// and wrapping it with the current file's path: an error raised while
    /// loading a nested import keeps the innermost path.
    #[must_use]
    pub const fn has_file_context(&self) -> bool {
        matches!(self, Self::File { .. } | Self::CyclicImport { .. })
    }
}
