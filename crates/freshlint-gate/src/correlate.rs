use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use freshlint_analyzer::Analyzer;
use freshlint_core::{intersects, Diagnostic, FileResult, FreshlintError, LineRange, Result};
use freshlint_diff::BranchDiff;

/// Runs the analyzer over every touched file and prunes each file's
/// diagnostics to the added line ranges.
///
/// Per-file evaluations are independent: they share only the immutable
/// analyzer and the read-only range set, and run concurrently up to the
/// configured limit so the external analyzer is not oversubscribed. A
/// failure on one file is reported to stderr and skipped; only a missing
/// analyzer binary aborts the whole run.
pub struct Correlator<A> {
    analyzer: Arc<A>,
    root: PathBuf,
    max_concurrency: usize,
}

impl<A: Analyzer + 'static> Correlator<A> {
    /// Create a correlator for a repository root.
    pub fn new(analyzer: A, root: impl Into<PathBuf>, max_concurrency: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            root: root.into(),
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Evaluate every touched file and collect the surviving results,
    /// sorted by path for deterministic output.
    ///
    /// # Errors
    ///
    /// Returns [`FreshlintError::AnalyzerUnavailable`] if the analyzer
    /// binary is missing; per-file analyzer failures are swallowed here
    /// and never affect sibling files.
    pub async fn correlate(&self, diff: &BranchDiff) -> Result<Vec<FileResult>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for path in &diff.touched_paths {
            let analyzer = Arc::clone(&self.analyzer);
            let semaphore = Arc::clone(&semaphore);
            let ranges = diff.ranges.ranges(path).to_vec();
            let root = self.root.clone();
            let path = path.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    // The semaphore is never closed while tasks run.
                    return (path, Ok(None));
                };
                let outcome = evaluate_file(analyzer.as_ref(), &root, &path, &ranges).await;
                (path, outcome)
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (path, outcome) = joined
                .map_err(|e| FreshlintError::Analyzer(format!("analysis task failed: {e}")))?;
            match outcome {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(err @ FreshlintError::AnalyzerUnavailable(_)) => return Err(err),
                Err(err) => {
                    eprintln!("warning: skipping {}: {err}", path.display());
                }
            }
        }

        results.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        Ok(results)
    }
}

/// Evaluate one touched file; `Ok(None)` means "nothing to report".
async fn evaluate_file<A: Analyzer + ?Sized>(
    analyzer: &A,
    root: &Path,
    path: &Path,
    ranges: &[LineRange],
) -> Result<Option<FileResult>> {
    if !analyzer.is_applicable(path) || analyzer.is_ignored(path) {
        return Ok(None);
    }
    // Gone between diff resolution and analysis: not found, not an error.
    if !root.join(path).exists() {
        return Ok(None);
    }

    let diagnostics = analyzer.analyze(path).await?;
    if diagnostics.is_empty() {
        return Ok(None);
    }

    let kept: Vec<Diagnostic> = diagnostics
        .into_iter()
        .filter(|d| {
            let (from, to) = d.span();
            intersects(ranges, from, to)
        })
        .collect();

    if kept.is_empty() {
        return Ok(None);
    }
    // Counts are recomputed from the filtered list; the analyzer's own
    // totals cover the whole file and must not leak into the report.
    Ok(Some(FileResult::from_messages(path.to_path_buf(), kept)))
}
