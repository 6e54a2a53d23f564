//! The analyzer abstraction and the ESLint adapter.
//!
//! A diagnostic source implements [`Analyzer`]: two cheap path predicates
//! (applicability and ignore rules) plus the per-file diagnostic run. The
//! correlator only ever talks to this trait, so tests can substitute a
//! stub and the gate logic stays analyzer-agnostic.

use std::path::Path;

use async_trait::async_trait;

use freshlint_core::{Diagnostic, Result};

pub mod eslint;
mod matcher;

pub use eslint::EslintAnalyzer;
pub use matcher::FileMatcher;

/// A pluggable diagnostic source.
///
/// Implementations hold only immutable configuration and may be shared
/// across concurrent per-file invocations.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Whether the analyzer applies to this file at all (file filter).
    fn is_applicable(&self, path: &Path) -> bool;

    /// Whether the analyzer's own ignore rules exclude this file.
    fn is_ignored(&self, path: &Path) -> bool;

    /// Run the analyzer on a single file, repo-relative path.
    ///
    /// # Errors
    ///
    /// [`FreshlintError::AnalyzerUnavailable`](freshlint_core::FreshlintError)
    /// when the analyzer binary itself is missing (fatal for the run);
    /// [`FreshlintError::Analyzer`](freshlint_core::FreshlintError) for a
    /// failure of this one invocation (recoverable per file).
    async fn analyze(&self, path: &Path) -> Result<Vec<Diagnostic>>;
}
