//! Data-driven arena content and its loaders.
//!
//! This crate reads the files an arena session is assembled from:
//! - AI tuning (`GameConfig`, data-driven via TOML)
//! - Scenarios: glyph map, safe zone and unit placement (data-driven via RON)
//!
//! All loaders deserialize arena-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, Scenario, ScenarioLoader, UnitSpec};
