//! Content loaders for reading arena data from files.
//!
//! Each loader exposes `load(path)` for files and `parse(text)` for in-memory
//! content, both returning [`LoadResult`].

pub mod config;
pub mod factory;
pub mod scenario;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::{Scenario, ScenarioLoader, UnitSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
