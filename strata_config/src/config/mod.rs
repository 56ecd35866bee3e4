//! The merged configuration tree: applications mapped to keyed settings.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StrataResult;
use crate::validate;

/// Per-application settings: an insertion-ordered keyed mapping.
pub type AppSettings = Map<String, Value>;

/// An insertion-ordered mapping of application names to their settings.
///
/// Every value in the underlying map is a JSON object; the invariant is
/// established by [`Config::from_value`] and preserved by the merge
/// operations. A `Config` is immutable once produced: merging two configs
/// yields a new value and never mutates its inputs.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use strata_config::Config;
///
/// let config = Config::from_value(json!({"ecto": {"pool_size": 10}}))?;
/// assert_eq!(config.len(), 1);
/// assert!(config.get("ecto").is_some());
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Validate `value` and wrap it as a configuration.
    ///
    /// # Errors
    ///
    /// Returns a shape error when `value` is not an object or when any
    /// application's settings are not an object.
    pub fn from_value(value: Value) -> StrataResult<Self> {
        validate::validate(&value)?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            // validate() rejects every non-object value.
            other => Err(crate::StrataError::top_level_shape(&other)),
        }
    }

    /// Number of applications present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no application carries settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Settings for `app`, if present.
    #[must_use]
    pub fn get(&self, app: &str) -> Option<&AppSettings> {
        self.0.get(app).and_then(Value::as_object)
    }

    /// Iterate applications and their settings in insertion order.
    #[must_use]
    pub fn apps(&self) -> impl Iterator<Item = (&str, &AppSettings)> {
        self.0
            .iter()
            .filter_map(|(app, settings)| settings.as_object().map(|s| (app.as_str(), s)))
    }

    /// Consume the configuration, returning the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Borrow the underlying map. Values are guaranteed to be objects.
    pub(crate) const fn raw(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Wrap a map whose values the caller guarantees are objects.
    pub(crate) const fn from_raw(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
