use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FreshlintError;

/// Top-level configuration loaded from `.freshlint.toml`.
///
/// Every section is optional; resolution order is CLI flags > config file >
/// built-in defaults.
///
/// # Examples
///
/// ```
/// use freshlint_core::FreshlintConfig;
///
/// let config = FreshlintConfig::default();
/// assert_eq!(config.diff.target_branch, "origin/develop");
/// assert_eq!(config.files.extensions, vec!["js", "ts"]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FreshlintConfig {
    /// Diff computation settings.
    #[serde(default)]
    pub diff: DiffConfig,
    /// Which files are eligible for analysis.
    #[serde(default)]
    pub files: FilesConfig,
    /// External analyzer settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Execution settings.
    #[serde(default)]
    pub run: RunConfig,
}

impl FreshlintConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FreshlintError::Io`] if the file cannot be read, or
    /// [`FreshlintError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use freshlint_core::FreshlintConfig;
    /// use std::path::Path;
    ///
    /// let config = FreshlintConfig::from_file(Path::new(".freshlint.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, FreshlintError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`FreshlintError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use freshlint_core::FreshlintConfig;
    ///
    /// let toml = r#"
    /// [diff]
    /// target_branch = "origin/main"
    /// "#;
    /// let config = FreshlintConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.diff.target_branch, "origin/main");
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, FreshlintError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Diff computation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Branch the feature branch is diffed against (default: `origin/develop`).
    #[serde(default = "default_target_branch")]
    pub target_branch: String,
}

fn default_target_branch() -> String {
    "origin/develop".into()
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            target_branch: default_target_branch(),
        }
    }
}

/// Which files are eligible for analysis.
///
/// Files outside `extensions` are never analyzed, regardless of what the
/// analyzer itself would accept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// File extensions handed to the analyzer (default: `js`, `ts`).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns that are never analyzed (e.g. `"dist/**"`).
    #[serde(default)]
    pub skip_patterns: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["js".into(), "ts".into()]
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            skip_patterns: Vec::new(),
        }
    }
}

/// External analyzer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Executable to spawn (default: `eslint`).
    #[serde(default = "default_command")]
    pub command: String,
    /// Extra arguments inserted before the format flag and file path.
    #[serde(default)]
    pub args: Vec<String>,
    /// Ignore file resolved against the repository root, gitignore syntax
    /// (default: `.eslintignore`).
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
}

fn default_command() -> String {
    "eslint".into()
}

fn default_ignore_file() -> String {
    ".eslintignore".into()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            ignore_file: default_ignore_file(),
        }
    }
}

/// Execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum concurrent analyzer invocations (default: 4).
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}
