//! Directory scanning and per-file processing.
//!
//! Files are processed one at a time in file-name order. A failure in one
//! file is recorded in its [`FileReport`] and never stops the batch.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::FixtureError;
use crate::fix::{Change, Fixer, WritePolicy};
use crate::xml::Document;

/// Options shared by both tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Compute and report changes without writing any file.
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The file was (or, in a dry run, would have been) written back.
    Rewritten,
    /// Nothing to write.
    Unchanged,
    /// The file is not well-formed XML; it was left as is.
    ParseError { message: String },
    /// Any other failure, typically I/O.
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<Change>,
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::ParseError { .. } | Outcome::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub dry_run: bool,
    pub rewritten: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    fn push(&mut self, report: FileReport) {
        match report.outcome {
            Outcome::Rewritten => self.rewritten += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::ParseError { .. } | Outcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(report);
    }
}

/// Regular `*.xml` files directly inside `dir`, sorted by file name.
pub fn collect_xml_files(dir: &Path) -> Result<Vec<PathBuf>, FixtureError> {
    if !dir.exists() {
        return Err(FixtureError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "xml") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Parse `path`, apply `fixer`, and write the result back according to the
/// fixer's [`WritePolicy`].
///
/// Returns the applied changes and whether the file was (or would be)
/// rewritten. On error the file on disk is untouched.
pub fn fix_file(
    path: &Path,
    fixer: &dyn Fixer,
    options: BatchOptions,
) -> Result<(Vec<Change>, bool), FixtureError> {
    let bytes = fs::read(path)?;
    let mut doc = Document::from_bytes(&bytes)?;
    let changes = fixer.fix(&mut doc);

    let rewrite = match fixer.write_policy() {
        WritePolicy::Always => true,
        WritePolicy::OnChange => !changes.is_empty(),
    };
    if rewrite && !options.dry_run {
        let out = doc.to_bytes()?;
        fs::write(path, out)?;
        info!(file = %path.display(), changes = changes.len(), "rewrote fixture");
    }
    Ok((changes, rewrite))
}

/// Run `fixer` over every XML file in `dir`, calling `on_file` after each one.
///
/// Fails only if the directory is missing, unreadable, or holds no XML files;
/// per-file failures are recorded in the report.
pub fn run_with<F>(
    dir: &Path,
    fixer: &dyn Fixer,
    options: BatchOptions,
    on_file: F,
) -> Result<BatchReport, FixtureError>
where
    F: FnMut(&FileReport),
{
    let files = collect_xml_files(dir)?;
    if files.is_empty() {
        return Err(FixtureError::NoXmlFiles(dir.to_path_buf()));
    }
    Ok(run_files(dir, &files, fixer, options, on_file))
}

/// Run `fixer` over an already collected file list.
pub fn run_files<F>(
    dir: &Path,
    files: &[PathBuf],
    fixer: &dyn Fixer,
    options: BatchOptions,
    mut on_file: F,
) -> BatchReport
where
    F: FnMut(&FileReport),
{
    let mut report = BatchReport {
        directory: dir.to_path_buf(),
        dry_run: options.dry_run,
        ..Default::default()
    };

    for path in files {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file_report = match fix_file(path, fixer, options) {
            Ok((changes, rewritten)) => FileReport {
                file,
                outcome: if rewritten {
                    Outcome::Rewritten
                } else {
                    Outcome::Unchanged
                },
                changes,
            },
            Err(e) => {
                warn!(fixer = fixer.name(), file = %file, error = %e, "fixture skipped");
                let outcome = match e {
                    FixtureError::Parse(message) => Outcome::ParseError { message },
                    other => Outcome::Failed {
                        message: other.to_string(),
                    },
                };
                FileReport {
                    file,
                    outcome,
                    changes: Vec::new(),
                }
            }
        };

        on_file(&file_report);
        report.push(file_report);
    }

    report
}

/// [`run_with`] without a progress callback.
pub fn run(
    dir: &Path,
    fixer: &dyn Fixer,
    options: BatchOptions,
) -> Result<BatchReport, FixtureError> {
    run_with(dir, fixer, options, |_| {})
}
