/// Errors that can occur across the freshlint pipeline.
///
/// Each variant wraps a specific failure domain. Library crates return this
/// type directly; the binary matches on it at the top level to derive the
/// process exit code.
///
/// # Examples
///
/// ```
/// use freshlint_core::FreshlintError;
///
/// let err = FreshlintError::Config("missing analyzer command".into());
/// assert!(err.to_string().contains("missing analyzer command"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FreshlintError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The working tree does not match the branch being linted.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A source or target ref could not be resolved to a commit.
    #[error("cannot resolve ref: {0}")]
    RefResolution(String),

    /// The two branches share no common ancestor commit.
    #[error("no common ancestor between '{source_ref}' and '{target}'")]
    NoCommonAncestor {
        /// Feature branch ref.
        source_ref: String,
        /// Target branch ref.
        target: String,
    },

    /// Any other git operation failure.
    #[error("git error: {0}")]
    Git(String),

    /// The analyzer executable could not be found. Fatal for the whole run.
    #[error("analyzer unavailable: {0}")]
    AnalyzerUnavailable(String),

    /// A single analyzer invocation failed. Recoverable per file.
    #[error("analyzer error: {0}")]
    Analyzer(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
