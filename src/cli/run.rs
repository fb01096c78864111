use crate::cli::args::{Cli, Commands, RunArgs};
use crate::core::config::{CoverageConfig, RawConfig};
use crate::core::{engine, io};
use crate::report;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;
use std::fs;
use std::time::{Duration, Instant};

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    stage(stats, "preflight", || {
        for input in &args.inputs {
            if !input.exists() {
                bail!("input path not found: {}", input.display());
            }
        }
        if args.threads == 0 {
            bail!("--threads must be >= 1");
        }
        Ok(())
    })?;

    let t_config = Instant::now();
    let config = CoverageConfig::resolve(RawConfig {
        include_contigs: args.include_contigs,
        exclude_contigs: args.exclude_contigs,
        xchr: args.xchr,
        ychr: args.ychr,
        fraction_cutoff: Some(args.fraction_cutoff),
        coverage_thresholds: args.coverage_thresholds,
        hidden_thresholds: args.hidden_thresholds,
        ignore_samples: args.ignore_samples,
    });
    stage_done(stats, "config", t_config);

    let t_discover = Instant::now();
    let inputs = io::discover(&args.inputs, &config.ignore_samples)?;
    stage_done(stats, "discover", t_discover);
    if inputs.is_empty() {
        bail!("no mosdepth reports found under the given inputs");
    }
    if stats {
        eprintln!("DEPTHQC_STATS discovered_samples={}", inputs.len());
    }

    let t_engine = Instant::now();
    let report = engine::run(inputs, &config, args.threads)?;
    stage_done(stats, "engine", t_engine);
    eprintln!("depthqc: found {} samples", report.sample_count());

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output dir {}", args.out.display()))?;

    let t_tables = Instant::now();
    report::tables::write(&args.out, &report)?;
    stage_done(stats, "tables", t_tables);

    if args.json {
        let json_path = args.out.join("depthqc_data.json");
        let t_json = Instant::now();
        report::json::write(&json_path, &report)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        stage_done(stats, "json", t_json);
        if stats {
            let size = fs::metadata(&json_path).map(|m| m.len()).unwrap_or(0);
            eprintln!(
                "DEPTHQC_STATS output json={} bytes={}",
                json_path.display(),
                size
            );
        }
    }

    if stats {
        eprintln!("DEPTHQC_STATS output_dir={}", args.out.display());
        eprintln!("DEPTHQC_STATS total={}", fmt_dur(t0.elapsed()));
    }

    Ok(())
}

fn stats_enabled() -> bool {
    matches!(env::var("DEPTHQC_STATS").as_deref(), Ok("1"))
}

fn stage<F>(stats: bool, name: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let t = Instant::now();
    let res = f();
    if stats {
        eprintln!("DEPTHQC_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
    res
}

fn stage_done(stats: bool, name: &str, t: Instant) {
    if stats {
        eprintln!("DEPTHQC_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
