//! Tests covering evaluation outcomes and the accumulator binding contract.

use std::path::Path;

use anyhow::{Result, anyhow, ensure};
use serde_json::{Value, json};
use tempfile::TempDir;

use super::{to_anyhow, write_file};
use crate::file::{ACCUMULATOR_BINDING, Evaluation, Evaluator, FileLoader};
use crate::{StrataError, StrataResult};

/// Evaluator returning one canned evaluation for every path.
struct CannedEvaluator(Evaluation);

impl Evaluator for CannedEvaluator {
    fn evaluate(&self, _path: &Path) -> StrataResult<Evaluation> {
        Ok(self.0.clone())
    }
}

/// Evaluator failing with a fixed error for every path.
struct FailingEvaluator(fn() -> std::sync::Arc<StrataError>);

impl Evaluator for FailingEvaluator {
    fn evaluate(&self, _path: &Path) -> StrataResult<Evaluation> {
        Err((self.0)())
    }
}

fn existing_file(dir: &TempDir) -> Result<std::path::PathBuf> {
    write_file(dir.path(), "any.cfg", "")
}

#[test]
fn accumulator_binding_wins_over_the_returned_value() -> Result<()> {
    let evaluation = Evaluation::new(json!({"returned": {}}))
        .with_binding(ACCUMULATOR_BINDING, json!({"bound": {"k": 1}}));
    ensure!(
        evaluation.into_config_value() == json!({"bound": {"k": 1}}),
        "expected the accumulator binding to take precedence"
    );
    Ok(())
}

#[test]
fn absent_binding_falls_back_to_the_returned_value() -> Result<()> {
    let evaluation = Evaluation::new(json!({"returned": {}}))
        .with_binding("unrelated", json!({"ignored": {}}));
    ensure!(
        evaluation.into_config_value() == json!({"returned": {}}),
        "expected the returned value when the binding is absent"
    );
    Ok(())
}

#[test]
fn loader_uses_the_binding_from_a_custom_evaluator() -> Result<()> {
    let dir = TempDir::new()?;
    let path = existing_file(&dir)?;
    let evaluation = Evaluation::new(Value::Null)
        .with_binding(ACCUMULATOR_BINDING, json!({"ecto": {"pool_size": 10}}));
    let loader = FileLoader::new(CannedEvaluator(evaluation));
    let config = to_anyhow(loader.load(&path))?;
    ensure!(
        config.into_value() == json!({"ecto": {"pool_size": 10}}),
        "expected the bound accumulator to become the configuration"
    );
    Ok(())
}

#[test]
fn evaluator_errors_are_wrapped_with_the_file_path() -> Result<()> {
    let dir = TempDir::new()?;
    let path = existing_file(&dir)?;
    let loader = FileLoader::new(FailingEvaluator(|| {
        StrataError::top_level_shape(&json!([1, 2, 3]))
    }));
    let Err(err) = loader.load(&path) else {
        return Err(anyhow!("expected the evaluator failure to propagate"));
    };
    match err.as_ref() {
        StrataError::File { path: reported, source } => {
            ensure!(
                reported.ends_with("any.cfg"),
                "expected the evaluated file's path, got {reported:?}"
            );
            ensure!(
                source.to_string().contains("keyed mapping"),
                "expected the shape cause to be preserved, got {source}"
            );
        }
        other => return Err(anyhow!("expected File error, got {other:?}")),
    }
    Ok(())
}

#[test]
fn evaluator_file_errors_are_not_rewrapped() -> Result<()> {
    let dir = TempDir::new()?;
    let path = existing_file(&dir)?;
    let loader = FileLoader::new(FailingEvaluator(|| {
        std::sync::Arc::new(StrataError::File {
            path: "inner.cfg".into(),
            source: Box::new(std::io::Error::other("inner failure")),
        })
    }));
    let Err(err) = loader.load(&path) else {
        return Err(anyhow!("expected the evaluator failure to propagate"));
    };
    match err.as_ref() {
        StrataError::File { path: reported, .. } => {
            ensure!(
                reported.as_path() == Path::new("inner.cfg"),
                "expected the inner path to survive, got {reported:?}"
            );
        }
        other => return Err(anyhow!("expected File error, got {other:?}")),
    }
    Ok(())
}

#[test]
fn non_mapping_evaluation_is_a_shape_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = existing_file(&dir)?;
    let loader = FileLoader::new(CannedEvaluator(Evaluation::new(json!("scalar"))));
    let Err(err) = loader.load(&path) else {
        return Err(anyhow!("expected a scalar evaluation to fail validation"));
    };
    ensure!(
        err.to_string().contains("keyed mapping"),
        "expected a shape cause, got {err}"
    );
    Ok(())
}
