use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Severity of an analyzer diagnostic.
///
/// Serialized as the numeric code the analyzer ecosystem uses: `1` for a
/// warning, `2` for an error.
///
/// # Examples
///
/// ```
/// use freshlint_core::Severity;
///
/// let s: Severity = serde_json::from_str("2").unwrap();
/// assert_eq!(s, Severity::Error);
/// assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    /// A finding worth attention that does not fail the build on its own.
    Warning = 1,
    /// A finding that must be fixed.
    Error = 2,
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> u8 {
        s as u8
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(format!("unknown severity code: {other}")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single issue reported by the analyzer, anchored to a line span.
///
/// Mirrors the analyzer's own message shape: `ruleId` may be null (for
/// example on parse errors), `endLine` is absent for point diagnostics.
/// Ephemeral; produced per invocation and never persisted.
///
/// # Examples
///
/// ```
/// use freshlint_core::{Diagnostic, Severity};
///
/// let diag = Diagnostic {
///     rule_id: Some("no-unused-vars".into()),
///     severity: Severity::Error,
///     message: "'x' is assigned a value but never used.".into(),
///     line: 11,
///     column: Some(7),
///     end_line: None,
///     end_column: None,
/// };
/// // A missing end line means a single-line span.
/// assert_eq!(diag.span(), (11, 11));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Identifier of the rule that fired, if any.
    pub rule_id: Option<String>,
    /// Warning or error.
    pub severity: Severity,
    /// Human-readable description of the issue.
    pub message: String,
    /// First line of the span (1-based).
    pub line: u32,
    /// Column of the span start, when the analyzer reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    /// Last line of the span; absent means the span is a single line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    /// Column just past the span end, when the analyzer reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
}

impl Diagnostic {
    /// The inclusive line span of this diagnostic.
    ///
    /// An absent `end_line` is treated as `line`.
    pub fn span(&self) -> (u32, u32) {
        (self.line, self.end_line.unwrap_or(self.line))
    }
}

/// Diagnostics that survived range filtering for a single file.
///
/// Invariant: `error_count` and `warning_count` are true counts over
/// `messages` — recomputed after filtering, never carried over from the
/// analyzer's pre-filter report.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use freshlint_core::{Diagnostic, FileResult, Severity};
///
/// let messages = vec![Diagnostic {
///     rule_id: Some("eqeqeq".into()),
///     severity: Severity::Warning,
///     message: "Expected '===' and instead saw '=='.".into(),
///     line: 3,
///     column: None,
///     end_line: None,
///     end_column: None,
/// }];
/// let result = FileResult::from_messages(PathBuf::from("src/app.ts"), messages);
/// assert_eq!(result.error_count, 0);
/// assert_eq!(result.warning_count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    /// Repo-relative path of the analyzed file.
    pub file_path: PathBuf,
    /// Diagnostics on added lines, in analyzer order.
    pub messages: Vec<Diagnostic>,
    /// Number of error-severity messages.
    pub error_count: usize,
    /// Number of warning-severity messages.
    pub warning_count: usize,
}

impl FileResult {
    /// Build a result from filtered messages, recomputing both counts.
    pub fn from_messages(file_path: PathBuf, messages: Vec<Diagnostic>) -> Self {
        let error_count = messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .count();
        let warning_count = messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
            .count();
        Self {
            file_path,
            messages,
            error_count,
            warning_count,
        }
    }
}

/// The final report for one gate run.
///
/// Constructed once per invocation, serialized to stdout when non-empty,
/// then discarded.
///
/// # Examples
///
/// ```
/// use freshlint_core::Report;
///
/// let report = Report {
///     source_branch: "feature/login".into(),
///     target_branch: "origin/develop".into(),
///     results: vec![],
/// };
/// assert_eq!(report.total_errors(), 0);
/// let json = report.to_json().unwrap();
/// assert!(json.contains("\"sourceBranch\":\"feature/login\""));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The feature branch that was linted.
    pub source_branch: String,
    /// The branch the diff was computed against.
    pub target_branch: String,
    /// Per-file results, sorted by path; only files with surviving
    /// diagnostics appear.
    pub results: Vec<FileResult>,
}

impl Report {
    /// Sum of `error_count` over all results.
    pub fn total_errors(&self) -> usize {
        self.results.iter().map(|r| r.error_count).sum()
    }

    /// Sum of `warning_count` over all results.
    pub fn total_warnings(&self) -> usize {
        self.results.iter().map(|r| r.warning_count).sum()
    }

    /// Serialize the report as a single JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`FreshlintError::Serialization`](crate::FreshlintError) if a
    /// data-model invariant was violated upstream.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
