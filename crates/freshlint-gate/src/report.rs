use freshlint_core::{FileResult, Report};

/// Derive the process exit code from the aggregate counts.
///
/// Pure function: errors win over warnings, warnings over a clean run.
///
/// # Examples
///
/// ```
/// use freshlint_gate::exit_code;
///
/// assert_eq!(exit_code(0, 0), 0);
/// assert_eq!(exit_code(0, 3), 1);
/// assert_eq!(exit_code(1, 3), 2);
/// ```
pub fn exit_code(total_errors: usize, total_warnings: usize) -> i32 {
    if total_errors > 0 {
        2
    } else if total_warnings > 0 {
        1
    } else {
        0
    }
}

/// Build the final report and its exit code from correlated results.
///
/// The caller serializes the report to stdout only when `results` is
/// non-empty; an empty run still yields exit code 0.
///
/// # Examples
///
/// ```
/// use freshlint_gate::assemble;
///
/// let (report, code) = assemble("feature", "origin/develop", vec![]);
/// assert!(report.results.is_empty());
/// assert_eq!(code, 0);
/// ```
pub fn assemble(
    source_branch: &str,
    target_branch: &str,
    results: Vec<FileResult>,
) -> (Report, i32) {
    let report = Report {
        source_branch: source_branch.to_string(),
        target_branch: target_branch.to_string(),
        results,
    };
    let code = exit_code(report.total_errors(), report.total_warnings());
    (report, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use freshlint_core::{Diagnostic, Severity};

    fn result_with(errors: usize, warnings: usize) -> FileResult {
        let mut messages = Vec::new();
        for i in 0..errors {
            messages.push(Diagnostic {
                rule_id: Some("no-undef".into()),
                severity: Severity::Error,
                message: "err".into(),
                line: i as u32 + 1,
                column: None,
                end_line: None,
                end_column: None,
            });
        }
        for i in 0..warnings {
            messages.push(Diagnostic {
                rule_id: Some("eqeqeq".into()),
                severity: Severity::Warning,
                message: "warn".into(),
                line: i as u32 + 100,
                column: None,
                end_line: None,
                end_column: None,
            });
        }
        FileResult::from_messages(PathBuf::from("a.ts"), messages)
    }

    #[test]
    fn exit_code_is_pure_in_the_totals() {
        assert_eq!(exit_code(0, 0), 0);
        assert_eq!(exit_code(0, 1), 1);
        assert_eq!(exit_code(0, 99), 1);
        assert_eq!(exit_code(1, 0), 2);
        assert_eq!(exit_code(1, 99), 2);
        assert_eq!(exit_code(42, 0), 2);
    }

    #[test]
    fn assemble_aggregates_across_files() {
        let (report, code) = assemble(
            "feature",
            "origin/develop",
            vec![result_with(0, 2), result_with(1, 0)],
        );
        assert_eq!(report.total_errors(), 1);
        assert_eq!(report.total_warnings(), 2);
        assert_eq!(code, 2);
    }

    #[test]
    fn warnings_only_yield_exit_one() {
        let (report, code) = assemble("feature", "origin/develop", vec![result_with(0, 1)]);
        assert_eq!(report.total_errors(), 0);
        assert_eq!(code, 1);
    }

    #[test]
    fn assemble_records_both_branch_names() {
        let (report, _) = assemble("feature/login", "origin/main", vec![]);
        assert_eq!(report.source_branch, "feature/login");
        assert_eq!(report.target_branch, "origin/main");
    }
}
