//! The batch loop: resolve inputs, process each file, print the summary.

use std::path::{Path, PathBuf};

use spritecrop_core::{inspect, process_one};

use crate::cli::{Args, Mode};
use crate::config::Settings;
use crate::error::CliError;
use crate::report::{self, BatchSummary};
use crate::walk::find_sprite_files;

const RULE_WIDTH: usize = 60;

/// Files to process and the directory output paths are relative to.
#[derive(Debug, PartialEq, Eq)]
pub struct Inputs {
    pub files: Vec<PathBuf>,
    pub base: PathBuf,
}

/// Expand the path argument into a list of sprite files.
pub fn resolve_inputs(path: &Path, settings: &Settings) -> Result<Inputs, CliError> {
    if path.is_file() {
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Inputs {
            files: vec![path.to_path_buf()],
            base,
        })
    } else if path.is_dir() {
        Ok(Inputs {
            files: find_sprite_files(path, &settings.extensions),
            base: path.to_path_buf(),
        })
    } else {
        Err(CliError::MissingPath(path.to_path_buf()))
    }
}

pub fn run(args: &Args) -> Result<BatchSummary, CliError> {
    let settings = Settings::resolve(args)?;
    let inputs = resolve_inputs(&args.path, &settings)?;
    let mode = args.mode();

    if inputs.files.is_empty() {
        println!("No sprite files found in '{}'", args.path.display());
        return Ok(BatchSummary::default());
    }

    log::info!(
        "Alpha threshold {}, backups {}",
        settings.alpha_threshold.0,
        if settings.backup { "on" } else { "off" }
    );
    println!("Found {} sprite files to process...", inputs.files.len());
    println!("{}", "-".repeat(RULE_WIDTH));

    let mut summary = BatchSummary::default();
    for file in &inputs.files {
        match mode {
            Mode::Inspect => match inspect(file, settings.alpha_threshold) {
                Ok(inspection) => {
                    for line in report::format_inspection(&inspection) {
                        println!("{line}");
                    }
                    summary.record_inspection(Some(&inspection));
                }
                Err(err) => {
                    println!("{}", report::format_inspection_error(file, &err));
                    summary.record_inspection(None);
                }
            },
            Mode::Crop | Mode::DryRun => {
                let options = settings.crop_options(file, &inputs.base, mode == Mode::DryRun);
                let result = process_one(file, &options);
                println!("{}", report::format_result(&result));
                summary.record(&result);
            }
        }
    }

    println!("{}", "-".repeat(RULE_WIDTH));
    let lines = match mode {
        Mode::Inspect => summary.inspection_lines(),
        Mode::DryRun => summary.dry_run_lines(),
        Mode::Crop => summary.crop_lines(settings.backup && settings.output_dir.is_none()),
    };
    for line in lines {
        println!("{line}");
    }

    Ok(summary)
}
