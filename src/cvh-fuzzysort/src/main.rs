//! CVH Fuzzysort - rank lines, files or directories against a query
//!
//! Prints the best matches first, one per line, with matched characters
//! wrapped in highlight markers.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::{
    env,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

use cvh_fuzzysort::{Fuzzysort, Options, Prepared, Results};

/// CVH Fuzzysort - Sublime-style fuzzy ranking
#[derive(Parser, Debug)]
#[command(name = "cvh-fuzzysort")]
#[command(author = "CVH Linux Team")]
#[command(version = "0.1.0")]
#[command(about = "Rank lines, files or directories by fuzzy match quality")]
struct Args {
    /// Search query
    query: String,

    /// Where candidates come from
    #[arg(short, long, value_enum, default_value = "stdin")]
    mode: Mode,

    /// How the candidates are matched
    #[arg(short, long, value_enum, default_value = "sequential")]
    strategy: Strategy,

    /// Directory to search (for files/dirs mode)
    #[arg(short = 'p', long)]
    path: Option<PathBuf>,

    /// Maximum number of results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print plain candidates without markers
    #[arg(long)]
    no_highlight: bool,

    /// Opening highlight marker
    #[arg(long)]
    open: Option<String>,

    /// Closing highlight marker
    #[arg(long)]
    close: Option<String>,

    /// Time budget per slice for the sliced strategy, in milliseconds
    #[arg(long)]
    slice_ms: Option<u64>,

    /// Prefix each result with its score
    #[arg(long)]
    scores: bool,

    /// Print results with null terminator
    #[arg(long)]
    print0: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Read candidates from stdin, one per line
    Stdin,
    /// Search files
    Files,
    /// Search directories
    Dirs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Single-threaded loop
    Sequential,
    /// Match on all cores
    Parallel,
    /// Time-sliced cooperative matching
    Sliced,
}

fn load_items(mode: Mode, path: Option<PathBuf>) -> Result<Vec<Prepared>> {
    match mode {
        Mode::Stdin => {
            let mut items = Vec::new();
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read stdin")?;
                if !line.is_empty() {
                    items.push(Prepared::new(line));
                }
            }
            Ok(items)
        }
        Mode::Files => walk(path, 10000, |entry| entry.file_type().is_file()),
        Mode::Dirs => walk(path, 5000, |entry| entry.file_type().is_dir()),
    }
}

fn walk(
    path: Option<PathBuf>,
    cap: usize,
    keep: impl Fn(&walkdir::DirEntry) -> bool,
) -> Result<Vec<Prepared>> {
    let base = match path {
        Some(p) => p,
        None => env::current_dir().context("failed to resolve current directory")?,
    };

    let items = WalkDir::new(&base)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| keep(e))
        .filter_map(|e| relative(&base, e.path()))
        .take(cap)
        .map(Prepared::new)
        .collect();
    Ok(items)
}

fn relative(base: &Path, path: &Path) -> Option<String> {
    let display = path.strip_prefix(base).unwrap_or(path).display().to_string();
    (!display.is_empty()).then_some(display)
}

fn apply_overrides(options: &mut Options, args: &Args) {
    if args.limit.is_some() {
        options.limit = args.limit;
    }
    if args.no_highlight {
        options.highlight = false;
    }
    if let Some(open) = &args.open {
        options.highlight_open = open.clone();
    }
    if let Some(close) = &args.close {
        options.highlight_close = close.clone();
    }
    if let Some(slice_ms) = args.slice_ms {
        options.slice_ms = slice_ms;
    }
}

fn print_results(results: &Results<'_, Prepared>, scores: bool, print0: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let terminator = if print0 { "\0" } else { "\n" };

    for ranked in results {
        let text = ranked
            .result
            .highlighted
            .as_deref()
            .unwrap_or(ranked.target.as_str());
        if scores {
            write!(out, "{}\t{}{}", ranked.result.score, text, terminator)?;
        } else {
            write!(out, "{}{}", text, terminator)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        "cvh_fuzzysort=debug,warn"
    } else {
        "cvh_fuzzysort=info,warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let mut options = Options::load(args.config.as_deref())?;
    apply_overrides(&mut options, &args);
    let engine = Fuzzysort::with_options(options)?;

    let items = load_items(args.mode, args.path.clone())?;
    debug!(count = items.len(), mode = ?args.mode, "loaded candidates");

    let results = match args.strategy {
        Strategy::Sequential => engine.match_all(&args.query, &items),
        Strategy::Parallel => engine.match_all_parallel(&args.query, &items),
        Strategy::Sliced => engine.match_all_async(&args.query, &items).run().await?,
    };

    info!(
        matched = results.total(),
        shown = results.len(),
        candidates = items.len(),
        "search finished"
    );

    print_results(&results, args.scores, args.print0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::parse_from(["cvh-fuzzysort", "fs"]);
        assert_eq!(args.query, "fs");
        assert_eq!(args.mode, Mode::Stdin);
        assert_eq!(args.strategy, Strategy::Sequential);
        assert!(!args.no_highlight);
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "cvh-fuzzysort",
            "--limit",
            "3",
            "--no-highlight",
            "--open",
            "[",
            "--slice-ms",
            "5",
            "query",
        ]);
        let mut options = Options::default();
        apply_overrides(&mut options, &args);

        assert_eq!(options.limit, Some(3));
        assert!(!options.highlight);
        assert_eq!(options.highlight_open, "[");
        assert_eq!(options.highlight_close, "</b>");
        assert_eq!(options.slice_ms, 5);
    }

    #[test]
    fn test_walk_lists_relative_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/FuzzySearch.rs"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "").unwrap();

        let files = walk(Some(dir.path().to_path_buf()), 100, |e| e.file_type().is_file()).unwrap();
        let mut names: Vec<&str> = files.iter().map(Prepared::as_str).collect();
        names.sort();
        let nested = format!("src{}FuzzySearch.rs", std::path::MAIN_SEPARATOR);
        assert_eq!(names, vec!["README.md", nested.as_str()]);

        let dirs = walk(Some(dir.path().to_path_buf()), 100, |e| e.file_type().is_dir()).unwrap();
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].as_str(), "src");
    }
}
