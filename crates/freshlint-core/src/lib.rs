//! Core types, configuration, and error handling for freshlint.
//!
//! This crate provides the shared foundation used by all other freshlint
//! crates:
//! - [`FreshlintError`] — unified error type using `thiserror`
//! - [`FreshlintConfig`] — configuration loaded from `.freshlint.toml`
//! - The data model: [`LineRange`], [`RangeSet`], [`Severity`],
//!   [`Diagnostic`], [`FileResult`], [`Report`]

mod config;
mod error;
mod ranges;
mod types;

pub use config::{AnalyzerConfig, DiffConfig, FilesConfig, FreshlintConfig, RunConfig};
pub use error::FreshlintError;
pub use ranges::{intersects, LineRange, RangeSet};
pub use types::{Diagnostic, FileResult, Report, Severity};

/// A convenience `Result` type for freshlint operations.
pub type Result<T> = std::result::Result<T, FreshlintError>;
