use std::path::Path;

use freshlint_core::FilesConfig;

/// Path filter deciding which files are eligible for analysis.
///
/// A file matches when its extension is in the configured list and no skip
/// pattern matches its path. Files outside the filter are never analyzed,
/// regardless of what the analyzer itself would accept.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use freshlint_analyzer::FileMatcher;
/// use freshlint_core::FilesConfig;
///
/// let matcher = FileMatcher::from_config(&FilesConfig::default());
/// assert!(matcher.is_match(Path::new("src/app.ts")));
/// assert!(!matcher.is_match(Path::new("README.md")));
/// ```
pub struct FileMatcher {
    extensions: Vec<String>,
    skip_patterns: Vec<glob::Pattern>,
}

impl FileMatcher {
    /// Build a matcher from the files section of the configuration.
    ///
    /// Invalid skip globs are dropped silently; an unparseable pattern can
    /// never match anything anyway.
    pub fn from_config(config: &FilesConfig) -> Self {
        let skip_patterns = config
            .skip_patterns
            .iter()
            .filter_map(|p| glob::Pattern::new(p).ok())
            .collect();
        Self {
            extensions: config.extensions.clone(),
            skip_patterns,
        }
    }

    /// Whether `path` is eligible for analysis.
    pub fn is_match(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }
        let path_str = path.to_string_lossy();
        !self.skip_patterns.iter().any(|p| p.matches(&path_str))
    }
}
