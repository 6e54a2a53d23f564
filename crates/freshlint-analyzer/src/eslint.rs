//! ESLint subprocess adapter.
//!
//! Spawns the configured ESLint command with `--format json` and maps its
//! report onto the shared [`Diagnostic`] model. The adapter analyzes the
//! checked-out working copy; the diff precondition (HEAD == source branch)
//! guarantees that matches the committed source tree. Running the real
//! binary also lets ESLint resolve its own nested configs per directory.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::Deserialize;
use tokio::process::Command;

use freshlint_core::{Diagnostic, FreshlintConfig, FreshlintError, Result, Severity};

use crate::matcher::FileMatcher;
use crate::Analyzer;

/// [`Analyzer`] implementation backed by an external ESLint process.
///
/// Holds only immutable configuration, so one instance is safely shared by
/// all concurrent per-file invocations.
pub struct EslintAnalyzer {
    command: String,
    args: Vec<String>,
    root: PathBuf,
    matcher: FileMatcher,
    ignore: Option<Gitignore>,
}

impl EslintAnalyzer {
    /// Build the adapter for a repository root.
    ///
    /// Reads the configured ignore file (gitignore syntax, `.eslintignore`
    /// by default) from the root when present.
    ///
    /// # Errors
    ///
    /// Returns [`FreshlintError::Config`] if the ignore file exists but
    /// cannot be parsed.
    pub fn new(root: &Path, config: &FreshlintConfig) -> Result<Self> {
        let ignore_path = root.join(&config.analyzer.ignore_file);
        let ignore = if ignore_path.exists() {
            let mut builder = GitignoreBuilder::new(root);
            if let Some(err) = builder.add(&ignore_path) {
                return Err(FreshlintError::Config(format!(
                    "cannot read ignore file {}: {err}",
                    ignore_path.display()
                )));
            }
            let gitignore = builder.build().map_err(|err| {
                FreshlintError::Config(format!(
                    "cannot parse ignore file {}: {err}",
                    ignore_path.display()
                ))
            })?;
            Some(gitignore)
        } else {
            None
        };

        Ok(Self {
            command: config.analyzer.command.clone(),
            args: config.analyzer.args.clone(),
            root: root.to_path_buf(),
            matcher: FileMatcher::from_config(&config.files),
            ignore,
        })
    }
}

#[async_trait::async_trait]
impl Analyzer for EslintAnalyzer {
    fn is_applicable(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        match &self.ignore {
            Some(gitignore) => gitignore
                .matched_path_or_any_parents(path, false)
                .is_ignore(),
            None => false,
        }
    }

    async fn analyze(&self, path: &Path) -> Result<Vec<Diagnostic>> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg("--format")
            .arg("json")
            .arg(path)
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FreshlintError::AnalyzerUnavailable(format!(
                        "'{}' not found on PATH: {e}",
                        self.command
                    ))
                } else {
                    FreshlintError::Analyzer(format!("failed to spawn '{}': {e}", self.command))
                }
            })?;

        // ESLint exits 1 when it found problems; that is still a report.
        let status = output.status.code().unwrap_or(-1);
        if status != 0 && status != 1 {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FreshlintError::Analyzer(format!(
                "'{}' exited with status {status} on {}: {}",
                self.command,
                path.display(),
                stderr.trim()
            )));
        }

        parse_report(&output.stdout)
    }
}

#[derive(Deserialize)]
struct EslintFileReport {
    #[serde(default)]
    messages: Vec<EslintMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EslintMessage {
    rule_id: Option<String>,
    severity: u8,
    message: String,
    line: Option<u32>,
    column: Option<u32>,
    end_line: Option<u32>,
    end_column: Option<u32>,
}

/// Parse an ESLint `--format json` report for a single-file invocation.
///
/// Messages without a line anchor or with a severity outside warning/error
/// (rules set to `off` never report, but be safe) are dropped; they cannot
/// be correlated against added lines.
fn parse_report(stdout: &[u8]) -> Result<Vec<Diagnostic>> {
    let reports: Vec<EslintFileReport> = serde_json::from_slice(stdout)
        .map_err(|e| FreshlintError::Analyzer(format!("unparseable analyzer report: {e}")))?;

    let Some(report) = reports.into_iter().next() else {
        return Ok(Vec::new());
    };

    let diagnostics = report
        .messages
        .into_iter()
        .filter_map(|m| {
            let severity = Severity::try_from(m.severity).ok()?;
            let line = m.line?;
            Some(Diagnostic {
                rule_id: m.rule_id,
                severity,
                message: m.message,
                line,
                column: m.column,
                end_line: m.end_line,
                end_column: m.end_column,
            })
        })
        .collect();

    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_FILE_REPORT: &str = r#"[
      {
        "filePath": "/repo/src/app.ts",
        "messages": [
          {
            "ruleId": "no-unused-vars",
            "severity": 2,
            "message": "'x' is assigned a value but never used.",
            "line": 11,
            "column": 7,
            "nodeType": "Identifier",
            "endLine": 11,
            "endColumn": 8
          },
          {
            "ruleId": "eqeqeq",
            "severity": 1,
            "message": "Expected '===' and instead saw '=='.",
            "line": 40,
            "column": 5
          }
        ],
        "errorCount": 1,
        "warningCount": 1,
        "fixableErrorCount": 0,
        "fixableWarningCount": 0
      }
    ]"#;

    #[test]
    fn parse_report_maps_messages() {
        let diags = parse_report(SINGLE_FILE_REPORT.as_bytes()).unwrap();
        assert_eq!(diags.len(), 2);

        assert_eq!(diags[0].rule_id.as_deref(), Some("no-unused-vars"));
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].span(), (11, 11));
        assert_eq!(diags[0].end_column, Some(8));

        assert_eq!(diags[1].severity, Severity::Warning);
        assert_eq!(diags[1].end_line, None);
        assert_eq!(diags[1].span(), (40, 40));
    }

    #[test]
    fn parse_report_keeps_null_rule_id() {
        let json = r#"[{"filePath":"a.ts","messages":[
            {"ruleId":null,"severity":2,"fatal":true,
             "message":"Parsing error: Unexpected token","line":3,"column":1}
        ]}]"#;
        let diags = parse_report(json.as_bytes()).unwrap();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].rule_id.is_none());
    }

    #[test]
    fn parse_report_drops_unanchored_messages() {
        let json = r#"[{"filePath":"a.ts","messages":[
            {"ruleId":null,"severity":2,"message":"no line info"}
        ]}]"#;
        let diags = parse_report(json.as_bytes()).unwrap();
        assert!(diags.is_empty());
    }

    #[test]
    fn empty_report_array_yields_no_diagnostics() {
        assert!(parse_report(b"[]").unwrap().is_empty());
    }

    #[test]
    fn garbage_output_is_an_analyzer_error() {
        let err = parse_report(b"Oops, something crashed").unwrap_err();
        assert!(matches!(err, FreshlintError::Analyzer(_)), "{err}");
    }

    #[tokio::test]
    async fn missing_binary_is_fatal_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FreshlintConfig::default();
        config.analyzer.command = "freshlint-no-such-analyzer".into();

        let analyzer = EslintAnalyzer::new(dir.path(), &config).unwrap();
        let err = analyzer.analyze(Path::new("app.ts")).await.unwrap_err();
        assert!(matches!(err, FreshlintError::AnalyzerUnavailable(_)), "{err}");
    }

    #[cfg(unix)]
    fn write_stub(dir: &Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let script = dir.join(name);
        std::fs::write(&script, body).unwrap();
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();
        script.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_one_is_still_a_report() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!("#!/bin/sh\ncat <<'JSON'\n{SINGLE_FILE_REPORT}\nJSON\nexit 1\n");
        let mut config = FreshlintConfig::default();
        config.analyzer.command = write_stub(dir.path(), "fake-eslint", &body);

        let analyzer = EslintAnalyzer::new(dir.path(), &config).unwrap();
        let diags = analyzer.analyze(Path::new("src/app.ts")).await.unwrap();
        assert_eq!(diags.len(), 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_two_is_a_per_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let body = "#!/bin/sh\necho 'Oops' >&2\nexit 2\n";
        let mut config = FreshlintConfig::default();
        config.analyzer.command = write_stub(dir.path(), "fake-eslint", body);

        let analyzer = EslintAnalyzer::new(dir.path(), &config).unwrap();
        let err = analyzer.analyze(Path::new("src/app.ts")).await.unwrap_err();
        assert!(matches!(err, FreshlintError::Analyzer(_)), "{err}");
    }

    #[test]
    fn ignore_file_excludes_matching_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".eslintignore"), "dist/\nlegacy.js\n").unwrap();

        let analyzer = EslintAnalyzer::new(dir.path(), &FreshlintConfig::default()).unwrap();
        assert!(analyzer.is_ignored(Path::new("dist/bundle.js")));
        assert!(analyzer.is_ignored(Path::new("legacy.js")));
        assert!(!analyzer.is_ignored(Path::new("src/app.js")));
    }

    #[test]
    fn missing_ignore_file_ignores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = EslintAnalyzer::new(dir.path(), &FreshlintConfig::default()).unwrap();
        assert!(!analyzer.is_ignored(Path::new("anything.js")));
    }

    #[test]
    fn applicability_follows_file_filter() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = EslintAnalyzer::new(dir.path(), &FreshlintConfig::default()).unwrap();
        assert!(analyzer.is_applicable(Path::new("src/app.ts")));
        assert!(!analyzer.is_applicable(Path::new("README.md")));
    }
}
