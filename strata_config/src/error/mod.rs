//! Error types produced by the merge engine.

mod constructors;
mod types;

pub(crate) use constructors::value_kind;
pub use types::{StrataError, StrataResult};
