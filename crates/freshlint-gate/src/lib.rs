//! Diff-to-diagnostic correlation and report assembly.
//!
//! The correlator walks the touched files of a branch diff, runs the
//! analyzer on each (bounded concurrency), and keeps only diagnostics whose
//! span lands on added lines. The assembler turns the surviving results
//! into the final report and the process exit code.

mod correlate;
mod report;

pub use correlate::Correlator;
pub use report::{assemble, exit_code};
