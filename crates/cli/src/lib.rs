//! fontslim command line.

pub mod cli;
pub mod report;

use std::process::ExitCode;

use anyhow::Result;
use fontslim_core::{BatchFontGenerator, CollectionRegistry, Transcoder, minify};
use log::warn;

use crate::cli::Cli;

/// Runs one minification and prints the report.
///
/// Fatal errors are returned; per-format failures only affect the exit code
/// under `--strict`.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let strict = cli.strict;
    let request = cli.into_request();
    let registry = CollectionRegistry::builtin();
    let generator = BatchFontGenerator::new(Transcoder);

    let report = minify(&request, &registry, &generator)?;
    print!("{}", report::render(&report));

    if report.batch.all_succeeded() {
        return Ok(ExitCode::SUCCESS);
    }
    warn!("{} format(s) failed", report.batch.failed());
    Ok(if strict { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
