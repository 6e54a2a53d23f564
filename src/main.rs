use std::path::PathBuf;

use clap::Parser;

use freshlint_analyzer::EslintAnalyzer;
use freshlint_core::{FreshlintConfig, FreshlintError};
use freshlint_diff::extract_added_ranges;
use freshlint_gate::{assemble, Correlator};

#[derive(Parser)]
#[command(
    name = "freshlint",
    version,
    about = "Diff-aware lint gate — fail CI only on lines your branch actually added",
    long_about = "freshlint diffs a feature branch against the merge base with a target branch,\n\
                   runs the analyzer over the touched files, and reports only diagnostics that\n\
                   land on added lines. Pre-existing issues in unrelated code never fail the\n\
                   build; new code is held to the bar.\n\n\
                   The feature branch must be checked out. The JSON report goes to stdout only\n\
                   when there is something to report; progress notes go to stderr.\n\n\
                   Exit codes:\n  \
                     0    no findings on added lines\n  \
                     1    warnings only\n  \
                     2    at least one error\n  \
                     666  unexpected runtime failure\n\n\
                   Examples:\n  \
                     freshlint feature/login\n  \
                     freshlint feature/login origin/main --repo ../webapp\n  \
                     freshlint feature/login --config ci/freshlint.toml --verbose"
)]
struct Cli {
    /// Feature branch to lint; must be the currently checked-out branch
    source_branch: String,

    /// Branch to diff against (default: config value, then origin/develop)
    target_branch: Option<String>,

    /// Repository path
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Path to configuration file (default: .freshlint.toml in the repo)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write progress notes to stderr
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Runtime error: {err}");
            std::process::exit(666);
        }
    }
}

async fn run(cli: Cli) -> Result<i32, FreshlintError> {
    let config = load_config(&cli)?;
    let target_branch = cli
        .target_branch
        .clone()
        .unwrap_or_else(|| config.diff.target_branch.clone());

    if cli.verbose {
        eprintln!(
            "diffing '{}' against merge base with '{target_branch}'",
            cli.source_branch
        );
    }

    let diff = extract_added_ranges(&cli.repo, &cli.source_branch, &target_branch)?;
    if cli.verbose {
        eprintln!("{} file(s) with added lines", diff.touched_paths.len());
    }

    let analyzer = EslintAnalyzer::new(&cli.repo, &config)?;
    let correlator = Correlator::new(analyzer, cli.repo.clone(), config.run.max_concurrency);
    let results = correlator.correlate(&diff).await?;

    let (report, code) = assemble(&cli.source_branch, &target_branch, results);
    if cli.verbose {
        eprintln!(
            "{} finding(s) on added lines ({} errors, {} warnings)",
            report.results.iter().map(|r| r.messages.len()).sum::<usize>(),
            report.total_errors(),
            report.total_warnings(),
        );
    }

    // stdout carries the JSON payload and nothing else; an empty result
    // set produces no output at all.
    if !report.results.is_empty() {
        println!("{}", report.to_json()?);
    }

    Ok(code)
}

fn load_config(cli: &Cli) -> Result<FreshlintConfig, FreshlintError> {
    match &cli.config {
        Some(path) => FreshlintConfig::from_file(path),
        None => {
            let default_path = cli.repo.join(".freshlint.toml");
            if default_path.exists() {
                FreshlintConfig::from_file(&default_path)
            } else {
                Ok(FreshlintConfig::default())
            }
        }
    }
}
