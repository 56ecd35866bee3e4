//! Shared helpers for file module tests along with focused submodules.

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};

pub(super) mod evaluator_tests;

pub(super) fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write fixture {name}"))?;
    Ok(path)
}

pub(super) fn to_anyhow<T>(result: crate::StrataResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}
