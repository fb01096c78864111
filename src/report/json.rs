use crate::core::metrics::CoverageReport;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize the whole report, tables and plot hints alike, for machine
/// consumers.
pub fn write(path: &Path, report: &CoverageReport) -> Result<()> {
    let mut w = BufWriter::new(
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
    );
    serde_json::to_writer_pretty(&mut w, report)
        .with_context(|| format!("failed to serialize report to {}", path.display()))?;
    writeln!(w)?;
    Ok(())
}
