//! CLI entrypoint for the boundcheck conformance harness.

use std::path::PathBuf;

use boundcheck_harness::fixtures::fixture_paths;
use boundcheck_harness::{
    ConformanceReport, FixtureDigest, FixtureSet, TestRunner, VerificationSummary,
    execute::execute_case,
};
use clap::{Parser, Subcommand};

/// Conformance tooling for boundcheck.
#[derive(Debug, Parser)]
#[command(name = "boundcheck-harness")]
#[command(about = "Fixture-driven conformance harness for boundcheck")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the wrappers against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path. Printed to stdout when omitted.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Emit JSON instead of markdown.
        #[arg(long)]
        json: bool,
    },
    /// Execute one abort-family case in this process (used by `verify`).
    #[command(hide = true)]
    RunAbortCase {
        /// Fixture JSON file holding the case.
        #[arg(long)]
        fixture: PathBuf,
        /// Case name.
        #[arg(long)]
        case: String,
    },
    /// List fixture cases.
    List {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            json,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let runner = TestRunner::new("fixture-verify")
                .with_child_executable(std::env::current_exe()?);

            let mut digests = Vec::new();
            let mut results = Vec::new();
            for path in fixture_paths(&fixture)? {
                match FixtureDigest::load(&path) {
                    Ok((digest, set)) => {
                        results.extend(runner.run(&set, &path));
                        digests.push(digest);
                    }
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if digests.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let summary = VerificationSummary::from_results(results);
            let all_passed = summary.all_passed();
            let failed = summary.failed;
            let doc = ConformanceReport {
                title: format!("boundcheck conformance ({})", runner.campaign),
                fixtures: digests,
                summary,
            };
            let rendered = if json {
                doc.to_json()
            } else {
                doc.to_markdown()
            };
            match report {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    eprintln!("Report written to {}", path.display());
                }
                None => println!("{rendered}"),
            }
            if !all_passed {
                return Err(format!("{failed} fixture case(s) failed").into());
            }
        }
        Command::RunAbortCase { fixture, case } => {
            let set = FixtureSet::from_file(&fixture)?;
            let output = execute_case(set.case(&case)?)?;
            println!("{output}");
        }
        Command::List { fixture } => {
            for path in fixture_paths(&fixture)? {
                let set = FixtureSet::from_file(&path)?;
                println!("{} ({}, {})", path.display(), set.family, set.version);
                for case in &set.cases {
                    println!("  {:<40} {}", case.name, case.symbol());
                }
            }
        }
    }

    Ok(())
}
