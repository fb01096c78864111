use crate::core::config::CoverageConfig;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Phase-1 product of the contig cutoff: uncorrected per-contig sums of
/// cumulative fractions for every sample, with the glob rules already
/// applied. The cutoff itself is a global decision, so this structure must
/// have seen every sample before `apply` runs.
#[derive(Clone, Debug, Default)]
pub struct RawContigSums {
    sums: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Surviving, cutoff-corrected averages plus the contigs the cutoff
/// rejected across all samples.
#[derive(Clone, Debug, Default)]
pub struct FilterOutcome {
    pub averages: BTreeMap<String, BTreeMap<String, f64>>,
    pub rejected: BTreeSet<String>,
}

impl RawContigSums {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Accumulate one sample's parsed per-contig pairs. Exclusion patterns
    /// are tested before inclusion patterns, so a contig matching both is
    /// dropped.
    pub fn add_sample(
        &mut self,
        sample: &str,
        contigs: &HashMap<String, Vec<(u32, f64)>>,
        config: &CoverageConfig,
    ) {
        for (contig, pairs) in contigs {
            if !contig_allowed(contig, config) {
                continue;
            }
            let sum: f64 = pairs.iter().map(|&(_, fraction)| fraction).sum();
            self.insert(sample, contig, sum);
        }
    }

    pub fn insert(&mut self, sample: &str, contig: &str, sum: f64) {
        *self
            .sums
            .entry(sample.to_string())
            .or_default()
            .entry(contig.to_string())
            .or_insert(0.0) += sum;
    }

    /// Phase 2: reject every contig whose coverage share across all samples
    /// is at or below `grand_total * fraction_cutoff`, then subtract the
    /// always-present 0x bucket (1.0) from the survivors. A degenerate run
    /// with no coverage at all rejects nothing.
    pub fn apply(&self, fraction_cutoff: f64) -> FilterOutcome {
        let mut total_per_contig: BTreeMap<&str, f64> = BTreeMap::new();
        let mut grand_total = 0.0;
        for contigs in self.sums.values() {
            for (contig, &sum) in contigs {
                *total_per_contig.entry(contig).or_insert(0.0) += sum;
                grand_total += sum;
            }
        }

        let required = grand_total * fraction_cutoff;
        let mut outcome = FilterOutcome::default();
        for (sample, contigs) in &self.sums {
            for (contig, &sum) in contigs {
                if grand_total > 0.0 && total_per_contig[contig.as_str()] <= required {
                    outcome.rejected.insert(contig.clone());
                    continue;
                }
                outcome
                    .averages
                    .entry(sample.clone())
                    .or_default()
                    .insert(contig.clone(), sum - 1.0);
            }
        }
        outcome
    }
}

fn contig_allowed(contig: &str, config: &CoverageConfig) -> bool {
    if config.exclude_contigs.iter().any(|p| p.matches(contig)) {
        return false;
    }
    if !config.include_contigs.is_empty()
        && !config.include_contigs.iter().any(|p| p.matches(contig))
    {
        return false;
    }
    true
}
