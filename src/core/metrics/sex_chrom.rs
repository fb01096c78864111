use crate::core::config::CoverageConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// Paired X/Y average coverage for one sample. Only emitted when both
/// chromosomes resolve to a nonzero value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SexCoverage {
    pub x: f64,
    pub y: f64,
}

/// Scan a sample's filtered per-contig averages for the sex chromosomes.
/// A configured name is matched exactly; otherwise the usual spellings are
/// matched case-insensitively.
pub fn extract(averages: &BTreeMap<String, f64>, config: &CoverageConfig) -> Option<SexCoverage> {
    let mut x_cov = None;
    let mut y_cov = None;
    for (contig, &cov) in averages {
        if matches_chrom(contig, config.xchr.as_deref(), &["x", "chrx"]) {
            x_cov = Some(cov);
        }
        if matches_chrom(contig, config.ychr.as_deref(), &["y", "chry"]) {
            y_cov = Some(cov);
        }
    }
    match (x_cov, y_cov) {
        (Some(x), Some(y)) if x != 0.0 && y != 0.0 => Some(SexCoverage { x, y }),
        _ => None,
    }
}

fn matches_chrom(contig: &str, configured: Option<&str>, fallbacks: &[&str]) -> bool {
    match configured {
        Some(name) => contig == name,
        None => fallbacks.iter().any(|f| contig.eq_ignore_ascii_case(f)),
    }
}
