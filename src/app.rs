//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves which CSV file to load
//! - runs ingest + aggregation
//! - prints tables or launches the TUI
//! - writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Command, DataArgs, RankArgs, SummaryArgs};
use crate::domain::AppConfig;
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the dataset CSV, read via dotenvy so a local
/// `.env` file works too.
pub const CSV_PATH_ENV: &str = "YT_STATS_CSV";

/// Entry point for the `ytt` binary.
pub fn run() -> Result<(), AppError> {
    // We want `ytt` and `ytt -f stats.csv` to behave like `ytt tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Summary(args) => handle_summary(args),
        Command::Trend(args) => handle_trend(args),
        Command::Rank(args) => handle_rank(args),
    }
}

fn handle_tui(args: DataArgs) -> Result<(), AppError> {
    let csv_path = resolve_csv_path(args.file, true)?;
    let dataset = crate::io::ingest::load_dataset(&csv_path)?;
    let config = AppConfig {
        csv_path,
        ..AppConfig::default()
    };
    crate::tui::run(dataset, config)
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let csv_path = resolve_csv_path(args.data.file, false)?;
    let dataset = crate::io::ingest::load_dataset(&csv_path)?;
    let summaries = crate::stats::dataset_summary(&dataset.records);

    println!("{}", crate::report::format_summary(&dataset, &summaries));

    if let Some(path) = &args.export_json {
        crate::io::export::write_summary_json(path, &summaries)?;
    }

    Ok(())
}

fn handle_trend(args: DataArgs) -> Result<(), AppError> {
    let csv_path = resolve_csv_path(args.file, false)?;
    let dataset = crate::io::ingest::load_dataset(&csv_path)?;
    let rows = crate::stats::year_trend(&dataset.records);

    println!("{}", crate::report::format_year_trend(&rows));
    Ok(())
}

fn handle_rank(args: RankArgs) -> Result<(), AppError> {
    let csv_path = resolve_csv_path(args.data.file, false)?;
    let dataset = crate::io::ingest::load_dataset(&csv_path)?;

    let offered = crate::query::ranking_categories(&dataset);
    let Some(request) =
        crate::query::ranking_request(Some(args.category.as_str()), args.by, &offered)
    else {
        return Err(AppError::new(
            3,
            format!(
                "Unknown category '{}'. Available: {}",
                args.category,
                offered.join(", ")
            ),
        ));
    };
    // The request round-trips through the query layer so the CLI and the TUI
    // share one vocabulary; only Ranking can come back here.
    let crate::domain::ChartRequest::Ranking { category, by } = request else {
        return Err(AppError::new(3, "Internal error: expected a ranking request."));
    };

    let top = crate::stats::top_channels(&dataset.records, &category, by, args.top);
    println!("{}", crate::report::format_rankings(&top, &category, by));

    if let Some(path) = &args.export {
        crate::io::export::write_rankings_csv(path, &top, &category, by)?;
    }

    Ok(())
}

/// Resolve which CSV file to load.
///
/// Precedence: `-f` flag, then `$YT_STATS_CSV` (via dotenvy), then the
/// default filename in the working directory. In interactive mode a missing
/// default falls through to the picker prompt; batch subcommands fail
/// instead.
fn resolve_csv_path(flag: Option<PathBuf>, interactive: bool) -> Result<PathBuf, AppError> {
    if let Some(path) = flag {
        return crate::cli::picker::validate_csv_path(&path);
    }

    dotenvy::dotenv().ok();
    if let Ok(path) = std::env::var(CSV_PATH_ENV) {
        return crate::cli::picker::validate_csv_path(Path::new(&path));
    }

    let default = PathBuf::from(crate::io::ingest::DEFAULT_DATA_FILE);
    if default.exists() {
        return Ok(default);
    }

    if interactive {
        return crate::cli::picker::prompt_for_csv_path();
    }

    Err(AppError::new(
        2,
        format!(
            "No dataset found: '{}' does not exist. Use -f or set {CSV_PATH_ENV}.",
            default.display()
        ),
    ))
}

/// Rewrite argv so `ytt` defaults to `ytt tui`.
///
/// Rules:
/// - `ytt`                      -> `ytt tui`
/// - `ytt -f stats.csv`         -> `ytt tui -f stats.csv`
/// - `ytt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary" | "trend" | "rank");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_tui() {
        assert_eq!(rewrite_args(argv(&["ytt"])), argv(&["ytt", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["ytt", "-f", "stats.csv"])),
            argv(&["ytt", "tui", "-f", "stats.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["ytt", "summary"])),
            argv(&["ytt", "summary"])
        );
        assert_eq!(
            rewrite_args(argv(&["ytt", "--help"])),
            argv(&["ytt", "--help"])
        );
        assert_eq!(
            rewrite_args(argv(&["ytt", "rank", "-c", "Music"])),
            argv(&["ytt", "rank", "-c", "Music"])
        );
    }
}
