use std::collections::BTreeMap;

/// A sample's genome-wide cumulative series in percent, kept in the order
/// the source file emitted it (mosdepth writes thresholds high to low).
/// Values are non-increasing as depth grows; depth 0 is conceptually 100%.
#[derive(Clone, Debug, Default)]
pub struct CumulativeSeries {
    entries: Vec<(u32, f64)>,
}

impl CumulativeSeries {
    /// Scale (depth, fraction) pairs to percent. A repeated depth
    /// overwrites the earlier value in place, keeping its position.
    pub fn from_fractions(pairs: &[(u32, f64)]) -> Self {
        let mut entries: Vec<(u32, f64)> = Vec::with_capacity(pairs.len());
        for &(depth, fraction) in pairs {
            let percent = 100.0 * fraction;
            match entries.iter_mut().find(|(d, _)| *d == depth) {
                Some(entry) => entry.1 = percent,
                None => entries.push((depth, percent)),
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (depth, percent) pairs in file order.
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn percent_at(&self, depth: u32) -> Option<f64> {
        self.entries
            .iter()
            .find(|&&(d, _)| d == depth)
            .map(|&(_, p)| p)
    }

    /// Highest depth still above 1%, used as the x-axis ceiling hint for
    /// distribution plots (prevents a long flat tail).
    pub fn axis_hint(&self) -> u32 {
        self.entries
            .iter()
            .filter(|&&(_, p)| p > 1.0)
            .map(|&(d, _)| d)
            .max()
            .unwrap_or(0)
    }

    /// Sorted copy for rendering.
    pub fn to_sorted(&self) -> BTreeMap<u32, f64> {
        self.entries.iter().copied().collect()
    }
}

/// Derive the percent-at-exactly-depth series by differencing the
/// cumulative series from the highest depth downwards:
/// `abs[x] = percent(x) - percent(next higher depth)`. The highest depth
/// has no successor and yields no entry, so the result sums to
/// `percent(lowest) - percent(highest)`; a single-entry series yields an
/// empty map.
pub fn absolute_from_cumulative(series: &CumulativeSeries) -> BTreeMap<u32, f64> {
    let mut sorted: Vec<(u32, f64)> = series.entries().to_vec();
    sorted.sort_by_key(|&(depth, _)| depth);

    let mut absolute = BTreeMap::new();
    let mut walk = sorted.into_iter().rev();
    let Some((_, mut above)) = walk.next() else {
        return absolute;
    };
    for (depth, percent) in walk {
        absolute.insert(depth, percent - above);
        above = percent;
    }
    absolute
}
