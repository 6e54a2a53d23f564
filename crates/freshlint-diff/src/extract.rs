use std::path::{Path, PathBuf};

use git2::{Commit, DiffLineType, DiffOptions, Repository};

use freshlint_core::{FreshlintError, LineRange, RangeSet};

/// The added lines of a feature branch relative to its merge base.
///
/// `touched_paths` lists exactly the files that gained at least one line,
/// sorted by path so downstream output is deterministic. A file whose diff
/// is pure deletion has no added lines and therefore never appears here.
#[derive(Debug, Clone)]
pub struct BranchDiff {
    /// Added line ranges per file.
    pub ranges: RangeSet,
    /// Files with at least one added range, sorted.
    pub touched_paths: Vec<PathBuf>,
}

/// Extract per-file added line ranges for `source_ref` vs `target_ref`.
///
/// The diff runs from the merge base of the two refs to the source tree
/// with zero context lines and minimal hunks, so every reported line is a
/// genuine addition — context lines would otherwise pollute the ranges.
///
/// The working tree must have `source_ref` checked out: the analyzer later
/// reads file content from disk, and the precondition is what makes the
/// checked-out copy equivalent to the committed source tree.
///
/// # Errors
///
/// - [`FreshlintError::Precondition`] if HEAD is not `source_ref`.
/// - [`FreshlintError::RefResolution`] if either ref does not resolve to a
///   commit.
/// - [`FreshlintError::NoCommonAncestor`] if the refs share no ancestor.
/// - [`FreshlintError::Git`] for any other repository failure.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use freshlint_diff::extract_added_ranges;
///
/// let diff = extract_added_ranges(Path::new("."), "feature/login", "origin/develop").unwrap();
/// for path in &diff.touched_paths {
///     println!("{}: {} added ranges", path.display(), diff.ranges.ranges(path).len());
/// }
/// ```
pub fn extract_added_ranges(
    repo_path: &Path,
    source_ref: &str,
    target_ref: &str,
) -> Result<BranchDiff, FreshlintError> {
    let repo = Repository::open(repo_path)
        .map_err(|e| FreshlintError::Git(format!("failed to open repository: {e}")))?;

    let head = repo
        .head()
        .map_err(|e| FreshlintError::Git(format!("failed to read HEAD: {e}")))?;
    let head_name = head.shorthand().unwrap_or("");
    if head_name != source_ref {
        return Err(FreshlintError::Precondition(format!(
            "source branch '{source_ref}' must be checked out (HEAD is '{head_name}')"
        )));
    }

    let source_commit = resolve_commit(&repo, source_ref)?;
    let target_commit = resolve_commit(&repo, target_ref)?;

    let base_oid = repo
        .merge_base(source_commit.id(), target_commit.id())
        .map_err(|_| FreshlintError::NoCommonAncestor {
            source_ref: source_ref.to_string(),
            target: target_ref.to_string(),
        })?;
    let base_commit = repo
        .find_commit(base_oid)
        .map_err(|e| FreshlintError::Git(format!("failed to look up merge base: {e}")))?;

    let base_tree = base_commit
        .tree()
        .map_err(|e| FreshlintError::Git(format!("failed to get merge-base tree: {e}")))?;
    let source_tree = source_commit
        .tree()
        .map_err(|e| FreshlintError::Git(format!("failed to get source tree: {e}")))?;

    let mut diff_opts = DiffOptions::new();
    diff_opts.context_lines(0).minimal(true);
    let diff = repo
        .diff_tree_to_tree(Some(&base_tree), Some(&source_tree), Some(&mut diff_opts))
        .map_err(|e| FreshlintError::Git(format!("failed to compute diff: {e}")))?;

    let mut ranges = RangeSet::new();
    diff.foreach(
        &mut |_delta, _progress| true,
        None,
        None,
        Some(&mut |delta, _hunk, line| {
            if line.origin_value() == DiffLineType::Addition {
                if let (Some(path), Some(start)) = (delta.new_file().path(), line.new_lineno()) {
                    let end = start + line.num_lines().saturating_sub(1);
                    ranges.push(path, LineRange::new(start, end));
                }
            }
            true
        }),
    )
    .map_err(|e| FreshlintError::Git(format!("failed to iterate diff lines: {e}")))?;

    let mut touched_paths: Vec<PathBuf> = ranges.paths().map(Path::to_path_buf).collect();
    touched_paths.sort();

    Ok(BranchDiff {
        ranges,
        touched_paths,
    })
}

fn resolve_commit<'repo>(
    repo: &'repo Repository,
    refname: &str,
) -> Result<Commit<'repo>, FreshlintError> {
    repo.revparse_single(refname)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|e| FreshlintError::RefResolution(format!("'{refname}': {e}")))
}
