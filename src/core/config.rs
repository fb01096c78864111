use glob::Pattern;

pub const DEFAULT_FRACTION_CUTOFF: f64 = 0.001;
pub const DEFAULT_THRESHOLDS: [u32; 5] = [1, 5, 10, 30, 50];

/// Unvalidated option values as they arrive from the CLI (or any other
/// front end). Everything is raw text so that a bad value can fall back to
/// its default with a diagnostic instead of aborting the run.
#[derive(Clone, Debug, Default)]
pub struct RawConfig {
    pub include_contigs: Vec<String>,
    pub exclude_contigs: Vec<String>,
    pub xchr: Option<String>,
    pub ychr: Option<String>,
    pub fraction_cutoff: Option<String>,
    pub coverage_thresholds: Option<String>,
    pub hidden_thresholds: Option<String>,
    pub ignore_samples: Vec<String>,
}

/// Resolved configuration, validated once at the boundary and immutable for
/// the rest of the run.
#[derive(Clone, Debug)]
pub struct CoverageConfig {
    pub include_contigs: Vec<Pattern>,
    pub exclude_contigs: Vec<Pattern>,
    pub xchr: Option<String>,
    pub ychr: Option<String>,
    pub fraction_cutoff: f64,
    pub coverage_thresholds: Vec<u32>,
    pub hidden_thresholds: Vec<u32>,
    pub ignore_samples: Vec<Pattern>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            include_contigs: Vec::new(),
            exclude_contigs: Vec::new(),
            xchr: None,
            ychr: None,
            fraction_cutoff: DEFAULT_FRACTION_CUTOFF,
            coverage_thresholds: DEFAULT_THRESHOLDS.to_vec(),
            hidden_thresholds: default_hidden(&DEFAULT_THRESHOLDS),
            ignore_samples: Vec::new(),
        }
    }
}

impl CoverageConfig {
    pub fn resolve(raw: RawConfig) -> Self {
        let coverage_thresholds = resolve_thresholds(raw.coverage_thresholds.as_deref());
        let hidden_thresholds =
            resolve_hidden(raw.hidden_thresholds.as_deref(), &coverage_thresholds);
        Self {
            include_contigs: compile_patterns(&raw.include_contigs, "--include-contigs"),
            exclude_contigs: compile_patterns(&raw.exclude_contigs, "--exclude-contigs"),
            xchr: raw.xchr,
            ychr: raw.ychr,
            fraction_cutoff: resolve_cutoff(raw.fraction_cutoff.as_deref()),
            coverage_thresholds,
            hidden_thresholds,
            ignore_samples: compile_patterns(&raw.ignore_samples, "--ignore-samples"),
        }
    }
}

fn compile_patterns(raw: &[String], option: &str) -> Vec<Pattern> {
    let mut patterns = Vec::with_capacity(raw.len());
    for text in raw {
        match Pattern::new(text) {
            Ok(p) => patterns.push(p),
            Err(e) => eprintln!("depthqc: ignoring invalid {option} pattern '{text}': {e}"),
        }
    }
    patterns
}

fn resolve_cutoff(raw: Option<&str>) -> f64 {
    let Some(text) = raw else {
        return DEFAULT_FRACTION_CUTOFF;
    };
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            eprintln!(
                "depthqc: invalid --fraction-cutoff '{text}', using default {DEFAULT_FRACTION_CUTOFF}"
            );
            DEFAULT_FRACTION_CUTOFF
        }
    }
}

fn resolve_thresholds(raw: Option<&str>) -> Vec<u32> {
    let Some(text) = raw else {
        return DEFAULT_THRESHOLDS.to_vec();
    };
    match parse_threshold_list(text) {
        Some(list) if !list.is_empty() => list,
        _ => {
            eprintln!(
                "depthqc: invalid --coverage-thresholds '{text}', using default {DEFAULT_THRESHOLDS:?}"
            );
            DEFAULT_THRESHOLDS.to_vec()
        }
    }
}

fn resolve_hidden(raw: Option<&str>, thresholds: &[u32]) -> Vec<u32> {
    let Some(text) = raw else {
        return default_hidden(thresholds);
    };
    match parse_threshold_list(text) {
        // Hidden-ness only makes sense for thresholds that exist.
        Some(list) => list
            .into_iter()
            .filter(|t| thresholds.contains(t))
            .collect(),
        None => {
            eprintln!("depthqc: invalid --hidden-thresholds '{text}', hiding all but 30X");
            default_hidden(thresholds)
        }
    }
}

fn parse_threshold_list(text: &str) -> Option<Vec<u32>> {
    text.split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect()
}

fn default_hidden(thresholds: &[u32]) -> Vec<u32> {
    thresholds.iter().copied().filter(|&t| t != 30).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawConfig {
        RawConfig::default()
    }

    #[test]
    fn defaults() {
        let config = CoverageConfig::resolve(raw());
        assert_eq!(config.fraction_cutoff, DEFAULT_FRACTION_CUTOFF);
        assert_eq!(config.coverage_thresholds, vec![1, 5, 10, 30, 50]);
        assert_eq!(config.hidden_thresholds, vec![1, 5, 10, 50]);
        assert!(config.include_contigs.is_empty());
    }

    #[test]
    fn bad_cutoff_falls_back() {
        let config = CoverageConfig::resolve(RawConfig {
            fraction_cutoff: Some("lots".to_string()),
            ..raw()
        });
        assert_eq!(config.fraction_cutoff, DEFAULT_FRACTION_CUTOFF);
    }

    #[test]
    fn negative_cutoff_falls_back() {
        let config = CoverageConfig::resolve(RawConfig {
            fraction_cutoff: Some("-0.5".to_string()),
            ..raw()
        });
        assert_eq!(config.fraction_cutoff, DEFAULT_FRACTION_CUTOFF);
    }

    #[test]
    fn custom_thresholds() {
        let config = CoverageConfig::resolve(RawConfig {
            coverage_thresholds: Some("5, 20, 100".to_string()),
            ..raw()
        });
        assert_eq!(config.coverage_thresholds, vec![5, 20, 100]);
        // No 30X in the list, so nothing is un-hidden by default.
        assert_eq!(config.hidden_thresholds, vec![5, 20, 100]);
    }

    #[test]
    fn bad_thresholds_fall_back() {
        let config = CoverageConfig::resolve(RawConfig {
            coverage_thresholds: Some("1,five,10".to_string()),
            ..raw()
        });
        assert_eq!(config.coverage_thresholds, vec![1, 5, 10, 30, 50]);
    }

    #[test]
    fn hidden_restricted_to_known_thresholds() {
        let config = CoverageConfig::resolve(RawConfig {
            hidden_thresholds: Some("1,7,50".to_string()),
            ..raw()
        });
        assert_eq!(config.hidden_thresholds, vec![1, 50]);
    }

    #[test]
    fn invalid_glob_is_dropped() {
        let config = CoverageConfig::resolve(RawConfig {
            exclude_contigs: vec!["chrUn_*".to_string(), "[".to_string()],
            ..raw()
        });
        assert_eq!(config.exclude_contigs.len(), 1);
        assert!(config.exclude_contigs[0].matches("chrUn_KI270302v1"));
    }
}
