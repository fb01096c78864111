use crate::core::metrics::CoverageReport;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write every non-empty derived table as TSV into `out_dir`.
pub fn write(out_dir: &Path, report: &CoverageReport) -> Result<()> {
    if !report.cumulative_dist.is_empty() {
        write_dist(
            &out_dir.join("depthqc_cumcov_dist.txt"),
            &report.cumulative_dist,
        )?;
    }
    if !report.absolute_dist.is_empty() {
        write_dist(&out_dir.join("depthqc_cov_dist.txt"), &report.absolute_dist)?;
    }
    if !report.perchrom_avg.is_empty() {
        write_perchrom(&out_dir.join("depthqc_perchrom.txt"), report)?;
    }
    if !report.xy_coverage.is_empty() {
        write_xy(&out_dir.join("depthqc_xy.txt"), report)?;
    }
    if !report.stats.is_empty() {
        write_general_stats(&out_dir.join("depthqc_general_stats.txt"), report)?;
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path).with_context(|| {
        format!("failed to create {}", path.display())
    })?))
}

fn write_dist(path: &Path, table: &BTreeMap<String, BTreeMap<u32, f64>>) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "sample\tdepth\tpercent")?;
    for (sample, series) in table {
        for (depth, percent) in series {
            writeln!(w, "{}\t{}\t{}", sample, depth, percent)?;
        }
    }
    Ok(())
}

fn write_perchrom(path: &Path, report: &CoverageReport) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "sample\tcontig\tavg_coverage")?;
    for (sample, contigs) in &report.perchrom_avg {
        for (contig, avg) in contigs {
            writeln!(w, "{}\t{}\t{}", sample, contig, avg)?;
        }
    }
    Ok(())
}

fn write_xy(path: &Path, report: &CoverageReport) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "sample\tx_coverage\ty_coverage")?;
    for (sample, pair) in &report.xy_coverage {
        writeln!(w, "{}\t{}\t{}", sample, pair.x, pair.y)?;
    }
    Ok(())
}

fn write_general_stats(path: &Path, report: &CoverageReport) -> Result<()> {
    let mut w = create(path)?;
    write!(w, "sample\tmean_coverage\tmedian_coverage")?;
    for t in &report.coverage_thresholds {
        write!(w, "\t{}x_pct", t)?;
    }
    writeln!(w)?;

    for (sample, stats) in &report.stats {
        write!(w, "{}", sample)?;
        match stats.mean_coverage {
            Some(mean) => write!(w, "\t{}", mean)?,
            None => write!(w, "\t")?,
        }
        match stats.median_coverage {
            Some(median) => write!(w, "\t{}", median)?,
            None => write!(w, "\t")?,
        }
        for t in &report.coverage_thresholds {
            let pct = stats.threshold_pcts.get(t).copied().unwrap_or(0.0);
            write!(w, "\t{}", pct)?;
        }
        writeln!(w)?;
    }
    Ok(())
}
