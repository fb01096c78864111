use depthqc::core::config::{CoverageConfig, RawConfig};
use depthqc::core::engine::{self, SampleInput};

fn sample(name: &str, dist: &str) -> SampleInput {
    SampleInput {
        name: name.to_string(),
        global_dist: Some(dist.to_string()),
        ..SampleInput::default()
    }
}

fn config(raw: RawConfig) -> CoverageConfig {
    CoverageConfig::resolve(raw)
}

#[test]
fn cumulative_and_absolute_derivation() {
    let dist = "total\t2\t0.00\ntotal\t1\t0.40\ntotal\t0\t1.00\n";
    let report = engine::run(vec![sample("S1", dist)], &CoverageConfig::default(), 1).unwrap();

    let cum = &report.cumulative_dist["S1"];
    assert_eq!(cum.len(), 2, "zero-fraction row must be dropped");
    assert!((cum[&1] - 40.0).abs() < 1e-9);
    assert!((cum[&0] - 100.0).abs() < 1e-9);

    // Differencing the cumulative series: only depth 0 gains an absolute
    // entry (100 - 40), and the series sums to the cumulative range.
    let abs = &report.absolute_dist["S1"];
    assert_eq!(abs.len(), 1);
    assert!((abs[&0] - 60.0).abs() < 1e-9);
    let sum: f64 = abs.values().sum();
    assert!((sum - (100.0 - 40.0)).abs() < 1e-6);
}

#[test]
fn cumulative_series_is_monotonic() {
    let dist = "total\t50\t0.01\ntotal\t30\t0.40\ntotal\t10\t0.80\n\
                total\t5\t0.95\ntotal\t1\t0.99\ntotal\t0\t1.00\n";
    let report = engine::run(vec![sample("S1", dist)], &CoverageConfig::default(), 1).unwrap();

    let cum: Vec<(u32, f64)> = report.cumulative_dist["S1"]
        .iter()
        .map(|(&d, &p)| (d, p))
        .collect();
    for pair in cum.windows(2) {
        assert!(
            pair[0].1 >= pair[1].1,
            "percent at depth {} below percent at deeper {}",
            pair[0].0,
            pair[1].0
        );
    }

    let abs_sum: f64 = report.absolute_dist["S1"].values().sum();
    assert!((abs_sum - (100.0 - 1.0)).abs() < 1e-6);
}

#[test]
fn perchrom_average_is_cutoff_corrected() {
    let dist = "1\t1\t1.00\n1\t0\t1.00\ntotal\t0\t1.00\n";
    let report = engine::run(vec![sample("S1", dist)], &CoverageConfig::default(), 1).unwrap();
    assert!((report.perchrom_avg["S1"]["1"] - 1.0).abs() < 1e-9);
}

#[test]
fn fraction_cutoff_drops_weak_contigs() {
    // chrA carries 10.0 of the 10.1 grand total, chrB only 0.1; with a 0.5
    // cutoff the required share is 5.05.
    let dist = "chrA\t1\t9.00\nchrA\t0\t1.00\nchrB\t0\t0.10\ntotal\t0\t1.00\n";
    let cfg = config(RawConfig {
        fraction_cutoff: Some("0.5".to_string()),
        ..RawConfig::default()
    });
    let report = engine::run(vec![sample("S1", dist)], &cfg, 1).unwrap();
    assert!(report.perchrom_avg["S1"].contains_key("chrA"));
    assert!(!report.perchrom_avg["S1"].contains_key("chrB"));
}

#[test]
fn exclude_pattern_beats_include_pattern() {
    let dist = "chr1\t1\t1.00\nchr1\t0\t1.00\nchrM\t1\t1.00\nchrM\t0\t1.00\ntotal\t0\t1.00\n";
    let cfg = config(RawConfig {
        include_contigs: vec!["chr*".to_string()],
        exclude_contigs: vec!["chrM".to_string()],
        ..RawConfig::default()
    });
    let report = engine::run(vec![sample("S1", dist)], &cfg, 1).unwrap();
    assert!(report.perchrom_avg["S1"].contains_key("chr1"));
    assert!(!report.perchrom_avg["S1"].contains_key("chrM"));
}

#[test]
fn sex_pair_requires_both_chromosomes() {
    let with_both = "chrX\t1\t15.00\nchrX\t0\t1.00\nchrY\t1\t7.00\nchrY\t0\t1.00\ntotal\t0\t1.00\n";
    let x_only = "chrX\t1\t15.00\nchrX\t0\t1.00\ntotal\t0\t1.00\n";
    let report = engine::run(
        vec![sample("paired", with_both), sample("x_only", x_only)],
        &CoverageConfig::default(),
        2,
    )
    .unwrap();

    let pair = &report.xy_coverage["paired"];
    assert!((pair.x - 15.0).abs() < 1e-9);
    assert!((pair.y - 7.0).abs() < 1e-9);
    assert!(!report.xy_coverage.contains_key("x_only"));
}

#[test]
fn general_stats_from_summary_and_distribution() {
    let dist = "total\t50\t0.02\ntotal\t30\t0.52\ntotal\t10\t0.97\n\
                total\t5\t0.99\ntotal\t1\t1.00\ntotal\t0\t1.00\n";
    let summary = "total\t3088269832\t102531373926\t33.20\t0\t902\n";
    let input = SampleInput {
        name: "S1".to_string(),
        summary: Some(summary.to_string()),
        global_dist: Some(dist.to_string()),
        ..SampleInput::default()
    };
    let report = engine::run(vec![input], &CoverageConfig::default(), 1).unwrap();

    let stats = &report.stats["S1"];
    assert_eq!(stats.mean_coverage, Some(33.20));
    // First depth reaching 50% in file order (high to low) is 30.
    assert_eq!(stats.median_coverage, Some(30));
    assert!((stats.threshold_pcts[&1] - 100.0).abs() < 1e-9);
    assert!((stats.threshold_pcts[&5] - 99.0).abs() < 1e-9);
    assert!((stats.threshold_pcts[&10] - 97.0).abs() < 1e-9);
    assert!((stats.threshold_pcts[&30] - 52.0).abs() < 1e-9);
    assert!((stats.threshold_pcts[&50] - 2.0).abs() < 1e-9);
}

#[test]
fn depth_axis_hint_spans_samples() {
    let shallow = "total\t8\t0.02\ntotal\t0\t1.00\n";
    let deep = "total\t90\t0.005\ntotal\t60\t0.02\ntotal\t0\t1.00\n";
    let report = engine::run(
        vec![sample("shallow", shallow), sample("deep", deep)],
        &CoverageConfig::default(),
        2,
    )
    .unwrap();
    // 90 stays below 1% everywhere, so 60 is the hint.
    assert_eq!(report.depth_axis_max, 60);
}

#[test]
fn thresholds_echoed_into_report() {
    let cfg = config(RawConfig {
        coverage_thresholds: Some("1,20".to_string()),
        ..RawConfig::default()
    });
    let report = engine::run(
        vec![sample("S1", "total\t1\t0.40\ntotal\t0\t1.00\n")],
        &cfg,
        1,
    )
    .unwrap();
    assert_eq!(report.coverage_thresholds, vec![1, 20]);
    assert_eq!(report.hidden_thresholds, vec![1, 20]);
    assert_eq!(report.stats["S1"].threshold_pcts[&20], 0.0);
}
