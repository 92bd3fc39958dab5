//! paramvec runner: strategy registry, invocation resolution, batch sampling, export.
//!
//! This crate builds on `paramvec-core` to provide:
//! - A registry of named strategy factories (structured or legacy output)
//! - Resolution of one invocation (count, mode, filter, seed) to vectors
//! - Named-record conversion with shape checks
//! - TOML runner configuration
//! - Parallel batch resolution with per-strategy derived seeds
//! - JSON and CSV export

pub mod batch;
pub mod config;
pub mod export;
pub mod registry;
pub mod runner;

pub use batch::{resolve_all, BatchEntry, BatchResults};
pub use config::{ConfigError, RunnerConfig};
pub use export::{export_strategies, export_vectors_csv, export_vectors_json, write_export};
pub use registry::{Strategy, StrategyMetadata, StrategyOutput, StrategyRegistry};
pub use runner::{resolve, Invocation, MissingFilterPolicy, Record, ResolvedStrategy, RunError};
