//! Added-line extraction via git2.
//!
//! Resolves the feature and target refs, computes their merge base, and
//! diffs the merge-base tree against the feature tree with zero context
//! lines to collect the exact line ranges each file gained.

pub mod extract;

pub use extract::{extract_added_ranges, BranchDiff};
