//! Shape validation for loaded configuration values.
//!
//! Validation is a structural check only: the top level must be a keyed
//! mapping and every application's settings must be a keyed mapping. The
//! contents of individual setting values are schema-free and deliberately
//! uninspected.

use serde_json::Value;

use crate::error::{StrataError, StrataResult};

/// Check that `value` has the shape of a configuration.
///
/// # Errors
///
/// Returns [`StrataError::TopLevelShape`] when `value` is not an object, or
/// [`StrataError::AppShape`] naming the first application whose settings are
/// not an object.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use strata_config::validate;
///
/// validate(&json!({"ecto": {"pool_size": 10}}))?;
/// assert!(validate(&json!({"ecto": [1, 2, 3]})).is_err());
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn validate(value: &Value) -> StrataResult<()> {
    let Some(apps) = value.as_object() else {
        return Err(StrataError::top_level_shape(value));
    };
    for (app, settings) in apps {
        if !settings.is_object() {
            return Err(StrataError::app_shape(app, settings));
        }
    }
    Ok(())
}
