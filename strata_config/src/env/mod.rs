//! Projecting a merged configuration into persistent environment storage.

use serde_json::{Map, Value};

use std::sync::{Mutex, PoisonError};

use crate::{Config, StrataResult};

/// External collaborator holding process-wide per-application settings.
///
/// Implementations are assumed idempotent: committing the same
/// `(app, key, value)` twice is equivalent to committing it once.
pub trait EnvStore {
    /// Commit `value` under `key` for `app`, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::StrataError`] when the store rejects the commit.
    fn set_persistent(&self, app: &str, key: &str, value: &Value) -> StrataResult<()>;
}

/// Commit every setting of `config` into `store`.
///
/// Commits apply in the configuration's iteration order, outer mapping
/// first. No atomicity is promised: a store failure aborts the projection
/// and leaves earlier commits applied.
///
/// # Errors
///
/// Propagates the first error returned by the store.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use strata_config::{Config, MemoryStore, persist};
///
/// let config = Config::from_value(json!({"ecto": {"pool_size": 10}}))?;
/// let store = MemoryStore::new();
/// persist(&config, &store)?;
/// assert_eq!(store.get("ecto", "pool_size"), Some(json!(10)));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn persist<S: EnvStore + ?Sized>(config: &Config, store: &S) -> StrataResult<()> {
    for (app, settings) in config.apps() {
        for (key, value) in settings {
            store.set_persistent(app, key, value)?;
            tracing::trace!(app, key, "committed setting");
        }
    }
    Ok(())
}

/// In-process [`EnvStore`] backed by a mutex-guarded map.
///
/// Suitable as the default store for single-process hosts and as a test
/// double; settings survive for the lifetime of the value, not the process
/// environment.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key` for `app`, if any.
    #[must_use]
    pub fn get(&self, app: &str, key: &str) -> Option<Value> {
        self.lock().get(app)?.get(key).cloned()
    }

    /// Snapshot of everything committed so far, keyed by application.
    #[must_use]
    pub fn snapshot(&self) -> Map<String, Value> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Map<String, Value>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnvStore for MemoryStore {
    fn set_persistent(&self, app: &str, key: &str, value: &Value) -> StrataResult<()> {
        let mut entries = self.lock();
        match entries.get_mut(app).and_then(Value::as_object_mut) {
            Some(settings) => {
                settings.insert(key.to_owned(), value.clone());
            }
            None => {
                let mut settings = Map::new();
                settings.insert(key.to_owned(), value.clone());
                entries.insert(app.to_owned(), Value::Object(settings));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
