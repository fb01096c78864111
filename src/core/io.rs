use crate::core::engine::SampleInput;
use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use glob::Pattern;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportKind {
    Summary,
    RegionDist,
    GlobalDist,
}

const SUFFIXES: [(&str, ReportKind); 3] = [
    (".mosdepth.summary.txt", ReportKind::Summary),
    (".mosdepth.region.dist.txt", ReportKind::RegionDist),
    (".mosdepth.global.dist.txt", ReportKind::GlobalDist),
];

/// Classify a file name, tolerating a trailing `.gz`. Returns the cleaned
/// sample name (file name minus the report suffix) and the report kind.
pub fn classify(file_name: &str) -> Option<(String, ReportKind)> {
    let base = file_name.strip_suffix(".gz").unwrap_or(file_name);
    for (suffix, kind) in SUFFIXES {
        if let Some(sample) = base.strip_suffix(suffix) {
            if sample.is_empty() {
                return None;
            }
            return Some((sample.to_string(), kind));
        }
    }
    None
}

pub fn read_text(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut text = String::new();
    if path.extension().is_some_and(|e| e == "gz") {
        MultiGzDecoder::new(file)
            .read_to_string(&mut text)
            .with_context(|| format!("failed to decompress {}", path.display()))?;
    } else {
        file.read_to_string(&mut text)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(text)
}

/// Walk the input paths and group every recognized report by sample.
/// Unreadable files are skipped with a warning; a broken report must not
/// take the whole run down. Samples matching an ignore pattern are dropped
/// before the engine ever sees them.
pub fn discover(inputs: &[PathBuf], ignore_samples: &[Pattern]) -> Result<Vec<SampleInput>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            walk(input, &mut files)?;
        } else {
            files.push(input.clone());
        }
    }
    files.sort();

    let mut samples: BTreeMap<String, SampleInput> = BTreeMap::new();
    for path in files {
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some((sample, kind)) = classify(file_name) else {
            continue;
        };
        if ignore_samples.iter().any(|p| p.matches(&sample)) {
            continue;
        }
        let text = match read_text(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("depthqc: skipping {}: {e:#}", path.display());
                continue;
            }
        };
        let entry = samples
            .entry(sample.clone())
            .or_insert_with(|| SampleInput {
                name: sample,
                ..SampleInput::default()
            });
        let slot = match kind {
            ReportKind::Summary => &mut entry.summary,
            ReportKind::RegionDist => &mut entry.region_dist,
            ReportKind::GlobalDist => &mut entry.global_dist,
        };
        // First discovered report of a kind wins.
        if slot.is_none() {
            *slot = Some(text);
        }
    }
    Ok(samples.into_values().collect())
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read dir {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read dir entry in {}", dir.display()))?
            .path();
        if path.is_dir() {
            walk(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
