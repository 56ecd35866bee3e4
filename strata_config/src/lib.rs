//! Hierarchical configuration merging for per-application settings.
//!
//! `strata_config` loads declarative configuration sources, each describing
//! nested key/value settings per application, and combines them into one
//! conflict-resolved tree. Later declarations win conflicts; nested keyed
//! mappings merge recursively instead of overwriting. The merged tree can
//! be projected into a process-wide environment store.
//!
//! The engine is deliberately small and synchronous: loading happens once,
//! early, and every merge is a pure function over immutable [`Config`]
//! values. File parsing sits behind the [`Evaluator`] trait; the built-in
//! [`FormatEvaluator`] handles TOML and JSON documents, and hosts with a
//! scripted configuration surface drive the same engine through
//! [`ConfigBuilder`].
//!
//! ```rust
//! use serde_json::json;
//! use strata_config::{Config, merge};
//!
//! let base = Config::from_value(json!({"logger": {"level": "info"}}))?;
//! let overrides = Config::from_value(json!({"logger": {"level": "warn"}}))?;
//! assert_eq!(
//!     merge(&base, &overrides).into_value(),
//!     json!({"logger": {"level": "warn"}}),
//! );
//! # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
//! ```

mod builder;
mod config;
mod env;
mod error;
mod file;
mod merge;
mod validate;

pub use builder::ConfigBuilder;
pub use config::{AppSettings, Config};
pub use env::{EnvStore, MemoryStore, persist};
pub use error::{StrataError, StrataResult};
#[cfg(any(feature = "toml", feature = "json"))]
pub use file::FormatEvaluator;
pub use file::{ACCUMULATOR_BINDING, Evaluation, Evaluator, FileLoader, canonicalise};
pub use merge::{MergeCallback, merge, merge_values, merge_with};
pub use validate::validate;
