use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info_span;

use refx_compare::{Comparison, compare_exports};
use refx_export::{ExportOptions, ExportOutcome, export_library};
use refx_normalize::NormalizerConfig;

use crate::cli::{CompareArgs, ExportArgs};

/// Result of one export run, for the summary printer.
pub struct ExportSummary {
    pub library: PathBuf,
    pub outcome: ExportOutcome,
}

pub fn run_export(args: &ExportArgs) -> Result<ExportSummary> {
    let span = info_span!("export", library = %args.library.display());
    let _guard = span.enter();
    let config = NormalizerConfig::default();
    let options = ExportOptions {
        output_path: args.output.clone(),
        audit_path: args.audit.clone(),
    };
    let outcome = export_library(&args.library, &config, &options)?;
    Ok(ExportSummary {
        library: args.library.clone(),
        outcome,
    })
}

pub fn run_compare(args: &CompareArgs) -> Result<Comparison> {
    let span = info_span!(
        "compare",
        reference = %args.reference.display(),
        candidate = %args.candidate.display()
    );
    let _guard = span.enter();
    let comparison = compare_exports(&args.reference, &args.candidate)?;
    if let Some(path) = &args.json {
        let encoded =
            serde_json::to_string_pretty(&comparison).context("encode comparison result")?;
        fs::write(path, encoded).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(comparison)
}
