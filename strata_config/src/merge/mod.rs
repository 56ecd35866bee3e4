//! Keyed deep-merge primitives over configuration trees.
//!
//! The outer merge unions application names; the inner merge unions setting
//! keys within one application. Conflicting values that are both keyed
//! mappings merge recursively; other conflicts resolve to the right-hand
//! value, or to the result of a caller-supplied callback. Merging is total:
//! it never fails and never mutates its inputs.

use serde_json::{Map, Value};

use crate::Config;

/// Per-leaf conflict resolver for [`merge_with`].
///
/// Invoked as `(app, key, left, right)` only when the two sides carry
/// structurally different values for `key` and the values are not both keyed
/// mappings (those recurse instead). The returned value becomes the resolved
/// setting.
pub trait MergeCallback: Fn(&str, &str, &Value, &Value) -> Value {}

impl<F> MergeCallback for F where F: Fn(&str, &str, &Value, &Value) -> Value {}

/// Merge `right` over `left`, with later declarations winning conflicts.
///
/// Applications present on only one side carry through unchanged. When both
/// sides configure an application, their settings merge key by key: equal
/// values carry through, nested keyed mappings merge recursively, and any
/// other conflict resolves to the `right` value.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use strata_config::{Config, merge};
///
/// let base = Config::from_value(json!({"ecto": {"pool_size": 5}}))?;
/// let overrides = Config::from_value(json!({"ecto": {"pool_size": 10}}))?;
/// let merged = merge(&base, &overrides);
/// assert_eq!(merged.into_value(), json!({"ecto": {"pool_size": 10}}));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[must_use]
pub fn merge(left: &Config, right: &Config) -> Config {
    merge_with(left, right, |_, _, _, right_value| right_value.clone())
}

/// Merge `right` over `left`, resolving leaf conflicts through `callback`.
///
/// Identical to [`merge`] except that a conflict between values that are not
/// both keyed mappings is resolved by `callback(app, key, left, right)`
/// instead of defaulting to the right-hand value. Equal values never reach
/// the callback, so merging a configuration with itself returns it
/// unchanged.
#[must_use]
pub fn merge_with<F>(left: &Config, right: &Config, callback: F) -> Config
where
    F: MergeCallback,
{
    let mut merged = Map::new();
    for (app, left_settings) in left.raw() {
        let resolved = match right.raw().get(app) {
            Some(right_settings) => {
                merge_settings(app, left_settings, right_settings, &callback)
            }
            None => left_settings.clone(),
        };
        merged.insert(app.clone(), resolved);
    }
    for (app, right_settings) in right.raw() {
        if !merged.contains_key(app) {
            merged.insert(app.clone(), right_settings.clone());
        }
    }
    Config::from_raw(merged)
}

/// Merge `right` over `left` as plain values.
///
/// When both sides are keyed mappings their keys union, recursing into
/// nested mappings; otherwise `right` wins. This is the resolution the
/// engine applies below the per-application level, exposed for callbacks
/// that want one more level of keyed merging.
#[must_use]
pub fn merge_values(left: &Value, right: &Value) -> Value {
    let (Some(left_map), Some(right_map)) = (left.as_object(), right.as_object()) else {
        return right.clone();
    };
    let mut merged = Map::new();
    for (key, left_value) in left_map {
        let resolved = match right_map.get(key) {
            Some(right_value) if right_value != left_value => {
                merge_values(left_value, right_value)
            }
            _ => left_value.clone(),
        };
        merged.insert(key.clone(), resolved);
    }
    for (key, right_value) in right_map {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), right_value.clone());
        }
    }
    Value::Object(merged)
}

/// Inner merge over one application's settings.
fn merge_settings<F>(app: &str, left: &Value, right: &Value, callback: &F) -> Value
where
    F: MergeCallback,
{
    // Config guarantees both sides are objects; anything else resolves to
    // the right-hand side.
    let (Some(left_map), Some(right_map)) = (left.as_object(), right.as_object()) else {
        return right.clone();
    };
    let mut merged = Map::new();
    for (key, left_value) in left_map {
        let resolved = match right_map.get(key) {
            None => left_value.clone(),
            Some(right_value) if right_value == left_value => left_value.clone(),
            Some(right_value) if right_value.is_object() && left_value.is_object() => {
                merge_values(left_value, right_value)
            }
            Some(right_value) => callback(app, key, left_value, right_value),
        };
        merged.insert(key.clone(), resolved);
    }
    for (key, right_value) in right_map {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), right_value.clone());
        }
    }
    Value::Object(merged)
}
