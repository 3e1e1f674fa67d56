use crate::error::BenchError;
use crate::recorder::CounterSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Finalized summary of one benchmark run. All latency fields are in
/// milliseconds, kept at full precision internally and rounded to
/// three decimal places at display and file boundaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub url: String,
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub fastest: f64,
    pub slowest: f64,
    pub mean: f64,
}

impl Stats {
    /// Computes the summary from a snapshot of the latency samples.
    /// Fails with [`BenchError::NoTimeRecorded`] when no sample was
    /// recorded, rather than returning a zero-value record.
    pub fn from_samples(
        url: impl Into<String>,
        counts: CounterSnapshot,
        samples: &[f64],
    ) -> Result<Self, BenchError> {
        if samples.is_empty() {
            return Err(BenchError::NoTimeRecorded);
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        Ok(Self {
            url: url.into(),
            requests: counts.requests,
            successes: counts.successes,
            failures: counts.failures,
            p50: percentile(&sorted, 0.50),
            p90: percentile(&sorted, 0.90),
            p99: percentile(&sorted, 0.99),
            fastest: sorted[0],
            slowest: sorted[sorted.len() - 1],
            mean,
        })
    }

    /// True for the all-zero record, which comparisons reject
    pub fn is_empty(&self) -> bool {
        *self == Stats::default()
    }
}

/// Nearest-rank percentile over an ascending-sorted, non-empty
/// sample set: the value at rank round(n * p), without interpolation.
///
/// For the fixed percentiles used here (p <= 0.99) and n >= 1 the
/// index never leaves the valid range; the saturation and clamp keep
/// that an invariant rather than an assumption.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&p));
    let rank = (sorted.len() as f64 * p).round() as usize;
    let idx = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Site: {}\n\
             Requests: {}\n\
             Successes: {}\n\
             Failures: {}\n\
             P50(ms): {:.3}\n\
             P90(ms): {:.3}\n\
             P99(ms): {:.3}\n\
             Fastest(ms): {:.3}\n\
             Slowest(ms): {:.3}\n\
             Mean(ms): {:.3}",
            self.url,
            self.requests,
            self.successes,
            self.failures,
            self.p50,
            self.p90,
            self.p99,
            self.fastest,
            self.slowest,
            self.mean,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(requests: u64, successes: u64, failures: u64) -> CounterSnapshot {
        CounterSnapshot {
            requests,
            successes,
            failures,
        }
    }

    #[test]
    fn test_percentiles_known_sample_set() {
        let samples = [5.0, 6.0, 7.0, 8.0, 10.0, 11.0, 13.0];
        let stats =
            Stats::from_samples("http://fake.url", counts(7, 7, 0), &samples).unwrap();
        assert_eq!(stats.p50, 8.0);
        assert_eq!(stats.p90, 11.0);
        assert_eq!(stats.p99, 13.0);
        assert_eq!(stats.fastest, 5.0);
        assert_eq!(stats.slowest, 13.0);
        assert_eq!(stats.mean, 60.0 / 7.0);
    }

    #[test]
    fn test_percentiles_unsorted_input() {
        let samples = [13.0, 5.0, 10.0, 6.0, 11.0, 7.0, 8.0];
        let stats =
            Stats::from_samples("http://fake.url", counts(7, 7, 0), &samples).unwrap();
        assert_eq!(stats.p50, 8.0);
        assert_eq!(stats.p90, 11.0);
        assert_eq!(stats.p99, 13.0);
    }

    #[test]
    fn test_percentiles_single_sample() {
        // round(1 * 0.5) - 1 resolves to index 0 for every tracked percentile
        let stats = Stats::from_samples("http://fake.url", counts(1, 1, 0), &[42.0]).unwrap();
        assert_eq!(stats.p50, 42.0);
        assert_eq!(stats.p90, 42.0);
        assert_eq!(stats.p99, 42.0);
        assert_eq!(stats.fastest, 42.0);
        assert_eq!(stats.slowest, 42.0);
        assert_eq!(stats.mean, 42.0);
    }

    #[test]
    fn test_percentiles_small_n_boundaries() {
        let stats = Stats::from_samples("http://fake.url", counts(2, 2, 0), &[1.0, 2.0]).unwrap();
        assert_eq!(stats.p50, 1.0);
        assert_eq!(stats.p90, 2.0);
        assert_eq!(stats.p99, 2.0);

        let stats =
            Stats::from_samples("http://fake.url", counts(3, 3, 0), &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.p50, 2.0);
        assert_eq!(stats.p90, 3.0);
        assert_eq!(stats.p99, 3.0);
    }

    #[test]
    fn test_empty_samples_is_an_error() {
        let err = Stats::from_samples("http://fake.url", counts(0, 0, 0), &[]).unwrap_err();
        assert!(matches!(err, BenchError::NoTimeRecorded));
        assert_eq!(err.to_string(), "no time recorded");
    }

    #[test]
    fn test_display_rounds_to_three_decimals() {
        let stats = Stats {
            url: "http://fake.url".to_string(),
            requests: 2,
            successes: 2,
            failures: 0,
            p50: 1.23456,
            p90: 2.0,
            p99: 3.9999,
            fastest: 1.23456,
            slowest: 3.9999,
            mean: 2.61723,
        };
        let text = stats.to_string();
        assert!(text.contains("P50(ms): 1.235"));
        assert!(text.contains("P90(ms): 2.000"));
        assert!(text.contains("P99(ms): 4.000"));
        assert!(text.contains("Mean(ms): 2.617"));
        assert!(text.starts_with("Site: http://fake.url\nRequests: 2\n"));
    }

    #[test]
    fn test_is_empty() {
        assert!(Stats::default().is_empty());
        let stats = Stats {
            p99: 1.0,
            ..Stats::default()
        };
        assert!(!stats.is_empty());
    }
}
