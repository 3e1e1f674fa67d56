use crate::error::BenchError;
use crate::stats::Stats;
use std::fmt;

/// Old/new view of one latency metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDelta {
    pub metric: &'static str,
    pub old: f64,
    pub new: f64,
    pub delta: f64,
    /// delta / old * 100; `None` when the old value is zero
    pub percentage: Option<f64>,
}

impl MetricDelta {
    fn new(metric: &'static str, old: f64, new: f64) -> Self {
        let delta = new - old;
        let percentage = (old != 0.0).then(|| delta / old * 100.0);
        Self {
            metric,
            old,
            new,
            delta,
            percentage,
        }
    }
}

/// Per-metric comparison of two stats records for the same target.
/// Transient, produced for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub url: String,
    pub metrics: Vec<MetricDelta>,
}

impl Comparison {
    pub fn new(old: &Stats, new: &Stats) -> Result<Self, BenchError> {
        if old.is_empty() || new.is_empty() {
            return Err(BenchError::EmptyStats);
        }
        Ok(Self {
            url: old.url.clone(),
            metrics: vec![
                MetricDelta::new("P50(ms)", old.p50, new.p50),
                MetricDelta::new("P90(ms)", old.p90, new.p90),
                MetricDelta::new("P99(ms)", old.p99, new.p99),
            ],
        })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Site {}", self.url)?;
        writeln!(
            f,
            "{:<10} {:>12} {:>12} {:>12} {:>12}",
            "Metric", "Old", "New", "Delta", "Percentage"
        )?;
        for m in &self.metrics {
            let percentage = match m.percentage {
                Some(p) => format!("{p:.2}"),
                None => "n/a".to_string(),
            };
            writeln!(
                f,
                "{:<10} {:>12.3} {:>12.3} {:>12.3} {:>12}",
                m.metric, m.old, m.new, m.delta, percentage
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(p50: f64, p90: f64, p99: f64) -> Stats {
        Stats {
            url: "http://fake.url".to_string(),
            requests: 10,
            successes: 10,
            failures: 0,
            p50,
            p90,
            p99,
            fastest: p50,
            slowest: p99,
            mean: p90,
        }
    }

    fn assert_close(got: f64, want: f64) {
        assert!((got - want).abs() < 0.005, "want {want}, got {got}");
    }

    #[test]
    fn test_deltas_and_percentages() {
        let old = stats(100.0, 110.0, 120.0);
        let new = stats(99.0, 100.0, 101.0);
        let comparison = Comparison::new(&old, &new).unwrap();

        let p50 = &comparison.metrics[0];
        assert_eq!(p50.delta, -1.0);
        assert_close(p50.percentage.unwrap(), -1.00);

        let p90 = &comparison.metrics[1];
        assert_eq!(p90.delta, -10.0);
        assert_close(p90.percentage.unwrap(), -9.09);

        let p99 = &comparison.metrics[2];
        assert_eq!(p99.delta, -19.0);
        assert_close(p99.percentage.unwrap(), -15.83);
    }

    #[test]
    fn test_zero_old_value_has_no_percentage() {
        let old = stats(0.0, 110.0, 120.0);
        let new = stats(99.0, 100.0, 101.0);
        let comparison = Comparison::new(&old, &new).unwrap();
        assert_eq!(comparison.metrics[0].percentage, None);
        assert!(comparison.to_string().contains("n/a"));
    }

    #[test]
    fn test_empty_stats_rejected() {
        let old = Stats::default();
        let new = stats(1.0, 2.0, 3.0);
        let err = Comparison::new(&old, &new).unwrap_err();
        assert!(matches!(err, BenchError::EmptyStats));

        let err = Comparison::new(&new, &old).unwrap_err();
        assert!(matches!(err, BenchError::EmptyStats));
    }

    #[test]
    fn test_display_layout() {
        let old = stats(100.0, 110.0, 120.0);
        let new = stats(99.0, 100.0, 101.0);
        let text = Comparison::new(&old, &new).unwrap().to_string();
        assert!(text.starts_with("Site http://fake.url\n"));
        assert!(text.contains("Metric"));
        assert!(text.contains("P90(ms)"));
        assert!(text.contains("-9.09"));
        assert!(text.contains("-15.83"));
    }
}
