//! Tests covering environment projection and the in-process store.

use std::sync::Mutex;

use anyhow::{Result, anyhow, ensure};
use serde_json::{Value, json};

use super::{EnvStore, MemoryStore, persist};
use crate::{Config, StrataError, StrataResult};

fn config(value: Value) -> Result<Config> {
    Config::from_value(value).map_err(|err| anyhow!(err.to_string()))
}

/// Store recording commit order, optionally failing after `limit` commits.
#[derive(Default)]
struct RecordingStore {
    commits: Mutex<Vec<(String, String)>>,
    limit: Option<usize>,
}

impl EnvStore for RecordingStore {
    fn set_persistent(&self, app: &str, key: &str, _value: &Value) -> StrataResult<()> {
        let mut commits = self
            .commits
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if self.limit.is_some_and(|limit| commits.len() >= limit) {
            return Err(StrataError::persist(app, key, "store unavailable"));
        }
        commits.push((app.to_owned(), key.to_owned()));
        Ok(())
    }
}

#[test]
fn persist_commits_every_setting_in_iteration_order() -> Result<()> {
    let config = config(json!({
        "ecto": {"pool_size": 10, "timeout": 5000},
        "logger": {"level": "info"},
    }))?;
    let store = RecordingStore::default();
    persist(&config, &store).map_err(|err| anyhow!(err.to_string()))?;
    let commits = store
        .commits
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone();
    let expected = [
        ("ecto", "pool_size"),
        ("ecto", "timeout"),
        ("logger", "level"),
    ];
    ensure!(
        commits
            .iter()
            .map(|(app, key)| (app.as_str(), key.as_str()))
            .eq(expected),
        "unexpected commit order {commits:?}"
    );
    Ok(())
}

#[test]
fn a_store_failure_leaves_earlier_commits_applied() -> Result<()> {
    let config = config(json!({"app": {"a": 1, "b": 2, "c": 3}}))?;
    let store = RecordingStore {
        limit: Some(2),
        ..RecordingStore::default()
    };
    let Err(err) = persist(&config, &store) else {
        return Err(anyhow!("expected persistence to fail at the third commit"));
    };
    ensure!(
        matches!(err.as_ref(), StrataError::Persist { key, .. } if key == "c"),
        "expected the failing key to be reported, got {err:?}"
    );
    let applied = store
        .commits
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .len();
    ensure!(applied == 2, "expected two commits to remain applied");
    Ok(())
}

#[test]
fn memory_store_returns_committed_values() -> Result<()> {
    let config = config(json!({"ecto": {"pool_size": 10}}))?;
    let store = MemoryStore::new();
    persist(&config, &store).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        store.get("ecto", "pool_size") == Some(json!(10)),
        "expected the committed value to be readable"
    );
    ensure!(
        store.get("ecto", "absent").is_none() && store.get("other", "k").is_none(),
        "expected absent entries to read as None"
    );
    Ok(())
}

#[test]
fn persisting_again_overwrites_previous_values() -> Result<()> {
    let store = MemoryStore::new();
    persist(&config(json!({"app": {"k": 1}}))?, &store).map_err(|err| anyhow!(err.to_string()))?;
    persist(&config(json!({"app": {"k": 2}}))?, &store).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        store.get("app", "k") == Some(json!(2)),
        "expected the later projection to overwrite the earlier one"
    );
    ensure!(
        store.snapshot() == json!({"app": {"k": 2}}).as_object().cloned().unwrap_or_default(),
        "unexpected store snapshot"
    );
    Ok(())
}
