//! Configuration-driven mock CSV generation.
//!
//! A config file selects a dataset schema; each column spec is resolved once
//! into a [`template::Directive`] (random letters, a fake-data provider, a
//! custom handler or free-text fallback) and rows are produced in memory
//! before a single write.

pub mod config;
pub mod context;
pub mod engine;
pub mod errors;
pub mod faker_rs;
pub mod generators;
pub mod locale;
pub mod model;
pub mod output;
pub mod row;
pub mod template;

pub use config::{ColumnSpec, Config, DatasetSchema};
pub use engine::{GeneratedDataset, GenerationEngine, GenerationResult};
pub use errors::{ConfigError, GenerationError};
pub use generators::ProviderRegistry;
pub use model::GenerationReport;
