use memchr::memchr;
use std::collections::HashMap;

/// One parsed `*.dist.txt` report: the genome-wide `total` series plus the
/// per-contig cumulative-fraction pairs, each in file order.
#[derive(Clone, Debug, Default)]
pub struct DistReport {
    /// (depth, cumulative fraction) pairs for the `total` pseudo-contig.
    pub total: Vec<(u32, f64)>,
    pub contigs: HashMap<String, Vec<(u32, f64)>>,
}

impl DistReport {
    pub fn is_empty(&self) -> bool {
        self.total.is_empty() && self.contigs.is_empty()
    }
}

/// Parse `contig<TAB>depth<TAB>cumulative_fraction` lines. Malformed lines
/// (missing tabs, extra fields, unparsable numbers) are skipped, as are
/// zero-fraction rows, which carry no signal.
pub fn parse_dist(text: &str) -> DistReport {
    let mut report = DistReport::default();
    for line in text.lines() {
        let bytes = line.as_bytes();
        let Some(tab1) = memchr(b'\t', bytes) else {
            continue;
        };
        let rest = &bytes[tab1 + 1..];
        let Some(tab2) = memchr(b'\t', rest) else {
            continue;
        };
        let depth_end = tab1 + 1 + tab2;
        if memchr(b'\t', &bytes[depth_end + 1..]).is_some() {
            continue;
        }
        let contig = &line[..tab1];
        let Ok(depth) = line[tab1 + 1..depth_end].trim().parse::<u32>() else {
            continue;
        };
        let Ok(fraction) = line[depth_end + 1..].trim().parse::<f64>() else {
            continue;
        };
        if fraction == 0.0 {
            continue;
        }
        if contig == "total" {
            report.total.push((depth, fraction));
        } else {
            report
                .contigs
                .entry(contig.to_string())
                .or_default()
                .push((depth, fraction));
        }
    }
    report
}

/// Pull the mean coverage out of a `*.mosdepth.summary.txt` report:
/// `contig<TAB>length<TAB>bases<TAB>mean<TAB>min<TAB>max`, keeping the last
/// row whose contig starts with `total` (a region summary lists `total`
/// followed by `total_region`).
pub fn parse_summary_mean(text: &str) -> Option<f64> {
    let mut mean = None;
    for line in text.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 6 || !fields[0].starts_with("total") {
            continue;
        }
        if let Ok(value) = fields[3].trim().parse::<f64>() {
            mean = Some(value);
        }
    }
    mean
}
