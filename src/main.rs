use anyhow::{bail, Context};
use bulletin_catalog::Catalog;
use bulletin_core::types::{Combine, Matching, NumberRange, Scope, SearchConfig, LIMIT_OPTIONS};
use bulletin_core::TermSet;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bulletin", about = "bulletin — course catalog search")]
struct Cli {
    /// Catalog file (.csv or .jsonl) with the course view columns.
    #[arg(long)]
    catalog: PathBuf,

    /// Write debug logs to /tmp/bulletin-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Run one search without the TUI: comma or | separated terms.
    #[arg(long)]
    terms: Option<String>,

    /// Headless: require ALL terms to match (default: any).
    #[arg(long)]
    all: bool,

    /// Headless: treat terms as raw case-insensitive patterns.
    #[arg(long)]
    pattern: bool,

    /// Headless: where terms match — title, desc, or both.
    #[arg(long, default_value = "both")]
    scope: String,

    /// Headless: course-number range as LOW:HIGH.
    #[arg(long)]
    range: Option<String>,

    /// Headless: row cap — one of 50, 100, 200, 500, 1000.
    #[arg(long, default_value_t = 200)]
    limit: usize,

    /// Headless: write the results to a CSV file instead of stdout.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/bulletin-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("bulletin debug log started — tail -f /tmp/bulletin-debug.log");
    }

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;

    if cli.terms.is_some() || cli.export.is_some() {
        return run_headless(cli, catalog);
    }

    bulletin_tui::run(catalog)
}

/// One-shot mode: run a single search and print or export the results.
fn run_headless(cli: Cli, catalog: Catalog) -> anyhow::Result<()> {
    if !LIMIT_OPTIONS.contains(&cli.limit) {
        bail!("--limit must be one of {LIMIT_OPTIONS:?}");
    }
    let scope = match cli.scope.as_str() {
        "title" => Scope::Title,
        "desc" | "description" => Scope::Description,
        "both" => Scope::Both,
        other => bail!("--scope must be title, desc, or both (got {other:?})"),
    };
    let range = match cli.range.as_deref() {
        Some(raw) => {
            let (low, high) = raw
                .split_once(':')
                .and_then(|(a, b)| Some((a.parse::<i64>().ok()?, b.parse::<i64>().ok()?)))
                .with_context(|| format!("--range must be LOW:HIGH (got {raw:?})"))?;
            NumberRange::new(low, high)
        }
        None => catalog.number_domain(),
    };

    let mut terms = TermSet::new();
    if let Some(raw) = &cli.terms {
        terms.add_terms(raw);
    }

    let config = SearchConfig {
        terms,
        combine: if cli.all { Combine::All } else { Combine::Any },
        matching: if cli.pattern { Matching::Pattern } else { Matching::Smart },
        scope,
        levels: Vec::new(),
        colleges: Vec::new(),
        subjects: Vec::new(),
        range,
        limit: cli.limit,
    };

    let rows = catalog.query(&config).context("running search")?;

    match cli.export {
        Some(path) => {
            let count = bulletin_core::export::export_csv(&path, &rows)
                .with_context(|| format!("exporting to {}", path.display()))?;
            eprintln!("exported {count} rows to {}", path.display());
        }
        None => {
            for row in &rows {
                println!(
                    "{:<6} {:<6} {:<50} {}",
                    row.subject, row.number, row.title, row.college
                );
            }
            eprintln!("{} rows", rows.len());
        }
    }
    Ok(())
}
