//! Loading configuration sources and resolving wildcard imports.

mod error;
mod evaluator;
mod imports;
mod loader;
mod path;

pub use evaluator::{ACCUMULATOR_BINDING, Evaluation, Evaluator};
#[cfg(any(feature = "toml", feature = "json"))]
pub use evaluator::FormatEvaluator;
pub use loader::FileLoader;
pub use path::canonicalise;

#[cfg(test)]
mod tests;
