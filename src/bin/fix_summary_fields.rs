//! Add missing myDATA summary fields to all test XMLs.
//!
//! Usage:
//!   fix-summary-fields [DIR] [--dry-run] [--json]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mydata_fixtures::batch::{self, FileReport, Outcome};
use mydata_fixtures::cli::{self, CommonArgs};
use mydata_fixtures::FixtureError;
use mydata_fixtures::fix::{Change, SummaryFiller};

/// Insert missing totalWithheldAmount, totalFeesAmount, totalStampDutyAmount
/// and totalDeductionsAmount into every invoiceSummary
#[derive(Parser)]
#[command(name = "fix-summary-fields", version, about)]
struct Cli {
    /// Directory holding the fixture XML files
    #[arg(default_value = ".")]
    dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<ExitCode> {
    cli::init_tracing();
    let args = Cli::parse();
    let quiet = args.common.json;

    if !args.dir.exists() {
        println!("Error: Directory {} does not exist", args.dir.display());
        return Ok(ExitCode::FAILURE);
    }

    if !quiet {
        let absolute = std::path::absolute(&args.dir).unwrap_or_else(|_| args.dir.clone());
        println!("🔧 Fixing all XML files...");
        println!("📁 Directory: {}", absolute.display());
        println!();
    }

    // A path that cannot be listed (such as a regular file) holds no XML files.
    let files = match batch::collect_xml_files(&args.dir) {
        Ok(files) => files,
        Err(FixtureError::Io(e)) => {
            tracing::debug!(error = %e, "cannot list directory");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    if files.is_empty() {
        println!("No XML files found!");
        return Ok(ExitCode::FAILURE);
    }

    if !quiet {
        println!("Found {} XML files", files.len());
        println!();
    }

    let report = batch::run_files(
        &args.dir,
        &files,
        &SummaryFiller,
        args.common.options(),
        |f| {
            if !quiet {
                print_file(f);
            }
        },
    );

    if quiet {
        cli::print_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!("{}", "━".repeat(50));
    println!("✅ Fixed: {}", report.rewritten);
    println!("❌ Errors: {}", report.failed);
    println!();

    if report.failed == 0 {
        println!("🎉 All XMLs fixed successfully!");
        println!("   Re-run validation now.");
    } else {
        println!("⚠️  Some files had errors. Check output above.");
    }
    if report.dry_run {
        println!("   (dry run, nothing was written)");
    }
    Ok(ExitCode::SUCCESS)
}

fn print_file(f: &FileReport) {
    println!("Processing: {}", f.file);
    for change in &f.changes {
        if let Change::SummaryField { field, .. } = change {
            println!("  ✓ Added {field} to {}", f.file);
        }
    }
    match &f.outcome {
        Outcome::ParseError { message } => println!("  ✗ Parse error in {}: {message}", f.file),
        Outcome::Failed { message } => println!("  ✗ Error processing {}: {message}", f.file),
        Outcome::Rewritten | Outcome::Unchanged => {}
    }
}
