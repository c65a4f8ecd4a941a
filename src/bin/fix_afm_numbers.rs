//! Replace invalid test AFMs with valid ones.
//!
//! Usage:
//!   fix-afm-numbers [--dir <DIR>] [--dry-run] [--json]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mydata_fixtures::batch::{self, FileReport, Outcome};
use mydata_fixtures::cli::{self, CommonArgs};
use mydata_fixtures::fix::AfmNormalizer;
use mydata_fixtures::{FixtureError, VALID_COUNTERPART_AFM, VALID_ISSUER_AFM};

/// Replace the AFMs of Greek issuers and counterparts with valid test values
#[derive(Parser)]
#[command(name = "fix-afm-numbers", version, about)]
struct Cli {
    /// Directory holding the fixture XML files
    #[arg(long, short, default_value = ".")]
    dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<ExitCode> {
    cli::init_tracing();
    let args = Cli::parse();
    let quiet = args.common.json;

    if !quiet {
        println!("🔧 Fixing AFM numbers in all XMLs...");
        println!("   Using valid test AFMs:");
        println!("   - Issuer: {VALID_ISSUER_AFM}");
        println!("   - Counterpart: {VALID_COUNTERPART_AFM}");
        println!();
    }

    let result = batch::run_with(&args.dir, &AfmNormalizer, args.common.options(), |f| {
        if !quiet {
            print_file(f);
        }
    });

    let report = match result {
        Ok(report) => report,
        // An absent directory has no XML files either; neither is an error here.
        Err(FixtureError::NoXmlFiles(_) | FixtureError::MissingDirectory(_)) => {
            println!("No XML files found!");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Err(e.into()),
    };

    if quiet {
        cli::print_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!("✅ Fixed {} files", report.rewritten);
    if report.dry_run {
        println!("   (dry run, nothing was written)");
    }
    println!();
    println!("🔄 Re-upload to validator now!");
    Ok(ExitCode::SUCCESS)
}

fn print_file(f: &FileReport) {
    println!("Processing: {}", f.file);
    for change in &f.changes {
        println!("  ✓ {change}");
    }
    match &f.outcome {
        Outcome::Rewritten => {}
        Outcome::Unchanged => println!("  → No changes needed"),
        Outcome::ParseError { message } | Outcome::Failed { message } => {
            println!("  ✗ Error: {message}")
        }
    }
}
