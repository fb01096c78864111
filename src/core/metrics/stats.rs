use super::distribution::CumulativeSeries;
use serde::Serialize;
use std::collections::BTreeMap;

/// Scalar per-sample metrics for the general stats table. The three fields
/// are derived independently; a sample can carry any subset.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SampleStats {
    /// Mean coverage from the summary report, never recomputed from the
    /// distribution.
    pub mean_coverage: Option<f64>,
    /// First depth whose cumulative percent reaches 50, scanning the
    /// series in its natural (file) order.
    pub median_coverage: Option<u32>,
    /// threshold depth -> percent of bases covered at or above it; 0.0
    /// when the depth never appears in the sample's series.
    pub threshold_pcts: BTreeMap<u32, f64>,
}

pub fn collect(
    series: Option<&CumulativeSeries>,
    mean_coverage: Option<f64>,
    thresholds: &[u32],
) -> SampleStats {
    SampleStats {
        mean_coverage,
        median_coverage: series.and_then(median_coverage),
        threshold_pcts: threshold_pcts(series, thresholds),
    }
}

pub fn median_coverage(series: &CumulativeSeries) -> Option<u32> {
    series
        .entries()
        .iter()
        .find(|&&(_, percent)| percent >= 50.0)
        .map(|&(depth, _)| depth)
}

pub fn threshold_pcts(series: Option<&CumulativeSeries>, thresholds: &[u32]) -> BTreeMap<u32, f64> {
    thresholds
        .iter()
        .map(|&t| (t, series.and_then(|s| s.percent_at(t)).unwrap_or(0.0)))
        .collect()
}
