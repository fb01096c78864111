use serde::Serialize;
use std::collections::BTreeMap;

pub mod contig_filter;
pub mod distribution;
pub mod sex_chrom;
pub mod stats;

pub use contig_filter::{FilterOutcome, RawContigSums};
pub use distribution::CumulativeSeries;
pub use sex_chrom::SexCoverage;
pub use stats::SampleStats;

/// Everything one aggregation run derives, keyed by sample name. Handed
/// read-only to the table/JSON writers.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CoverageReport {
    /// sample -> depth -> percent of bases covered at >= depth.
    pub cumulative_dist: BTreeMap<String, BTreeMap<u32, f64>>,
    /// sample -> depth -> percent of bases covered at exactly depth.
    pub absolute_dist: BTreeMap<String, BTreeMap<u32, f64>>,
    /// sample -> contig -> cutoff-corrected average coverage.
    pub perchrom_avg: BTreeMap<String, BTreeMap<String, f64>>,
    /// sample -> paired X/Y coverage, present only when both resolved.
    pub xy_coverage: BTreeMap<String, SexCoverage>,
    pub stats: BTreeMap<String, SampleStats>,
    /// Suggested x-axis ceiling for distribution plots: the highest depth
    /// at which any sample still exceeds 1%.
    pub depth_axis_max: u32,
    pub coverage_thresholds: Vec<u32>,
    /// Thresholds renderers should hide by default; still computed and
    /// written.
    pub hidden_thresholds: Vec<u32>,
}

impl CoverageReport {
    /// Number of distinct samples contributing to any derived table.
    pub fn sample_count(&self) -> usize {
        self.cumulative_dist
            .len()
            .max(self.absolute_dist.len())
            .max(self.perchrom_avg.len())
            .max(self.xy_coverage.len())
            .max(self.stats.len())
    }
}
