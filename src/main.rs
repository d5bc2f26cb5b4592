// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Run the crawl pipeline for the query
// 4. Print the report as a table or JSON
// 5. Exit with proper code (0 = report produced, 2 = run failed)
//
// The crawl itself lives in the script_scout library; this file only hosts it.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use script_scout::scan::classify;
use script_scout::{CrawlOutcome, LibraryUsage, Pipeline};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            // No report exists for a failed run; say so explicitly
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays machine-readable.
// RUST_LOG overrides the default filter.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "script_scout=debug"
    } else {
        "script_scout=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let pipeline = Pipeline::with_http(cli.to_config())?;

    if !cli.json {
        println!("🔍 Searching for: {}", cli.query);
    }

    let outcome = pipeline.run_with_outcome(&cli.query).await?;
    let libraries = cli.libraries.then(|| classify(&outcome.report));

    print_results(&outcome, libraries.as_deref(), cli.json)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    outcome: &'a CrawlOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    libraries: Option<&'a [LibraryUsage]>,
}

// Prints the outcome either as a table or JSON
fn print_results(outcome: &CrawlOutcome, libraries: Option<&[LibraryUsage]>, json: bool) -> Result<()> {
    if json {
        let output = JsonOutput { outcome, libraries };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(outcome, libraries);
    }
    Ok(())
}

fn print_table(outcome: &CrawlOutcome, libraries: Option<&[LibraryUsage]>) {
    println!();
    println!("{:<6} {:<99}", "#", "SCRIPT");
    println!("{}", "=".repeat(105));

    for (i, reference) in outcome.report.iter().enumerate() {
        println!("{:<6} {:<99}", i + 1, truncate(reference, 99));
    }

    if !outcome.failures.is_empty() {
        println!();
        println!("{:<60} {:<45}", "UNREACHABLE SITE", "REASON");
        println!("{}", "=".repeat(105));
        for failure in &outcome.failures {
            println!(
                "{:<60} {:<45}",
                truncate(failure.url.as_str(), 60),
                failure.error.to_string()
            );
        }
    }

    if let Some(libraries) = libraries {
        println!();
        println!("{:<30} {:<10}", "LIBRARY", "SCRIPTS");
        println!("{}", "=".repeat(40));
        for usage in libraries {
            println!("{:<30} {:<10}", usage.name, usage.references);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   🌐 Sites found: {}", outcome.candidates);
    println!("   ✅ Fetched: {}", outcome.pages_fetched);
    println!("   ❌ Failed: {}", outcome.failures.len());
    println!("   📜 Scripts: {}", outcome.report.len());
}

// Shortens long values for the fixed-width table
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let kept: String = value.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        value.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does main() not return Result?
//    - We want to choose the exit code ourselves (0 or 2)
//    - Returning Err from main would always exit with 1
//
// 2. What is {:#} in eprintln!?
//    - For anyhow errors, the alternate format prints the whole cause chain
//      on one line: "search request failed: request timed out"
//
// 3. Why bool::then?
//    - cli.libraries.then(|| ...) gives Some(value) when the flag is set and
//      None otherwise, without an if/else
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("/a.js", 10), "/a.js");
    }

    #[test]
    fn truncate_shortens_long_values() {
        assert_eq!(truncate("https://cdn.example.com/x.js", 10), "https:/...");
    }
}
