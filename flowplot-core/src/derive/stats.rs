//! Small statistics shared by the derivers.

/// Copy and sort ascending. NaN sorts last.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Linear-interpolation percentile on an ascending slice, `pct` in 0..=100.
///
/// `idx = pct/100 · (n-1)`, interpolating between the neighbouring ranks.
/// Returns 0.0 for an empty slice.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    let frac = idx - lo as f64;

    if hi >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Final-vs-initial return in percent. A non-positive initial value yields 0.
pub fn return_pct(initial: f64, last: f64) -> f64 {
    if initial > 0.0 {
        (last / initial - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Equal-width histogram over `[min, max]`; the last bin is closed on the right.
///
/// A degenerate range (all values equal) is widened by ±0.5. Non-finite values
/// are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(left, right, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 50.0), 3.0);
        assert_eq!(percentile(&values, 100.0), 5.0);
        assert!((percentile(&values, 5.0) - 1.2).abs() < 1e-12);
        assert!((percentile(&values, 95.0) - 4.8).abs() < 1e-12);
    }

    #[test]
    fn percentile_edge_cases() {
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[7.0], 5.0), 7.0);
    }

    #[test]
    fn return_pct_guards_non_positive_initial() {
        assert!((return_pct(100.0, 112.0) - 12.0).abs() < 1e-9);
        assert_eq!(return_pct(0.0, 50.0), 0.0);
        assert_eq!(return_pct(-10.0, 50.0), 0.0);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let hist = Histogram::from_values(&values, 10);
        assert_eq!(hist.edges.len(), 11);
        assert_eq!(hist.total(), 100);
        assert!(hist.counts.iter().all(|&c| c == 10));
        // max lands in the closed last bin
        assert!((hist.edges[10] - 99.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_degenerate_range_is_widened() {
        let hist = Histogram::from_values(&[2.0, 2.0, 2.0], 4);
        assert_eq!(hist.edges.first(), Some(&1.5));
        assert_eq!(hist.edges.last(), Some(&2.5));
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn histogram_ignores_non_finite() {
        let hist = Histogram::from_values(&[1.0, f64::NAN, 3.0, f64::INFINITY], 2);
        assert_eq!(hist.total(), 2);
        assert!(Histogram::from_values(&[f64::NAN], 2).is_empty());
    }
}
