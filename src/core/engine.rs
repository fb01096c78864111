use crate::core::config::CoverageConfig;
use crate::core::metrics::{
    CoverageReport, CumulativeSeries, RawContigSums, distribution, sex_chrom, stats,
};
use crate::core::parse::{self, DistReport};
use anyhow::{Result, bail};
use crossbeam_channel as channel;
use std::collections::BTreeMap;
use std::thread;

/// Raw text of every discovered report for one sample. `region_dist` and
/// `global_dist` are the two slots of the variant pair; when both exist the
/// region variant is used and the global variant ignored entirely.
#[derive(Clone, Debug, Default)]
pub struct SampleInput {
    pub name: String,
    pub summary: Option<String>,
    pub region_dist: Option<String>,
    pub global_dist: Option<String>,
}

#[derive(Clone, Debug)]
struct ParsedSample {
    name: String,
    mean_coverage: Option<f64>,
    dist: Option<DistReport>,
}

/// Run one aggregation pass over the discovered samples. Parsing fans out
/// to worker threads; every sample is collected before aggregation begins,
/// which keeps the hard barrier between the contig cutoff's two phases.
pub fn run(
    inputs: Vec<SampleInput>,
    config: &CoverageConfig,
    threads: usize,
) -> Result<CoverageReport> {
    if inputs.is_empty() {
        bail!("no mosdepth reports to aggregate");
    }
    let threads = threads.clamp(1, inputs.len());
    let parsed = parse_samples(inputs, threads);
    let report = aggregate(&parsed, config);
    if report.sample_count() == 0 {
        bail!("no usable mosdepth data found in any report");
    }
    Ok(report)
}

fn parse_samples(inputs: Vec<SampleInput>, threads: usize) -> Vec<ParsedSample> {
    let (input_tx, input_rx) = channel::bounded::<SampleInput>(threads * 2);
    let (result_tx, result_rx) = channel::unbounded::<ParsedSample>();

    let mut workers = Vec::with_capacity(threads);
    for _ in 0..threads {
        let rx = input_rx.clone();
        let tx = result_tx.clone();
        workers.push(thread::spawn(move || {
            for input in rx.iter() {
                if tx.send(parse_sample(input)).is_err() {
                    break;
                }
            }
        }));
    }
    drop(result_tx);

    for input in inputs {
        if input_tx.send(input).is_err() {
            break;
        }
    }
    drop(input_tx);

    let mut parsed: Vec<ParsedSample> = result_rx.iter().collect();
    for worker in workers {
        let _ = worker.join();
    }
    // Worker completion order is nondeterministic; aggregation is not.
    parsed.sort_by(|a, b| a.name.cmp(&b.name));
    parsed
}

fn parse_sample(input: SampleInput) -> ParsedSample {
    let mean_coverage = input.summary.as_deref().and_then(parse::parse_summary_mean);
    let dist = match (&input.region_dist, &input.global_dist) {
        (Some(text), _) => Some(parse::parse_dist(text)),
        (None, Some(text)) => Some(parse::parse_dist(text)),
        (None, None) => None,
    };
    ParsedSample {
        name: input.name,
        mean_coverage,
        dist,
    }
}

fn aggregate(parsed: &[ParsedSample], config: &CoverageConfig) -> CoverageReport {
    // Phase 1: raw per-contig sums and cumulative series for every sample.
    let mut raw_sums = RawContigSums::new();
    let mut cumulative: BTreeMap<String, CumulativeSeries> = BTreeMap::new();
    let mut means: BTreeMap<String, f64> = BTreeMap::new();
    for sample in parsed {
        if let Some(mean) = sample.mean_coverage {
            means.insert(sample.name.clone(), mean);
        }
        let Some(dist) = &sample.dist else {
            continue;
        };
        raw_sums.add_sample(&sample.name, &dist.contigs, config);
        let series = CumulativeSeries::from_fractions(&dist.total);
        if !series.is_empty() {
            cumulative.insert(sample.name.clone(), series);
        }
    }

    // Phase 2: the cutoff needs the aggregate over all samples.
    let outcome = raw_sums.apply(config.fraction_cutoff);
    if !outcome.rejected.is_empty() && stats_enabled() {
        eprintln!(
            "DEPTHQC_STATS filter.rejected_contigs={} cutoff={}",
            outcome.rejected.len(),
            config.fraction_cutoff
        );
    }

    let mut report = CoverageReport {
        perchrom_avg: outcome.averages,
        coverage_thresholds: config.coverage_thresholds.clone(),
        hidden_thresholds: config.hidden_thresholds.clone(),
        ..CoverageReport::default()
    };

    for (name, series) in &cumulative {
        report.depth_axis_max = report.depth_axis_max.max(series.axis_hint());
        let absolute = distribution::absolute_from_cumulative(series);
        if !absolute.is_empty() {
            report.absolute_dist.insert(name.clone(), absolute);
        }
        report
            .cumulative_dist
            .insert(name.clone(), series.to_sorted());
    }

    for (name, contigs) in &report.perchrom_avg {
        if let Some(pair) = sex_chrom::extract(contigs, config) {
            report.xy_coverage.insert(name.clone(), pair);
        }
    }

    let stat_samples: Vec<&String> = cumulative.keys().chain(means.keys()).collect();
    for name in stat_samples {
        if report.stats.contains_key(name.as_str()) {
            continue;
        }
        let entry = stats::collect(
            cumulative.get(name),
            means.get(name).copied(),
            &config.coverage_thresholds,
        );
        report.stats.insert(name.clone(), entry);
    }

    report
}

fn stats_enabled() -> bool {
    matches!(std::env::var("DEPTHQC_STATS").as_deref(), Ok("1"))
}
