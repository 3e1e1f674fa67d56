use crate::error::BenchError;
use crate::stats::Stats;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Writes a stats record in the line-oriented `Field: value` format.
/// Latency values are written with three decimal places, so a
/// write-then-read round trip reproduces them exactly at that
/// precision.
pub fn write_stats<W: Write>(w: &mut W, stats: &Stats) -> Result<(), BenchError> {
    writeln!(w, "{stats}")?;
    Ok(())
}

pub fn write_stats_file(path: impl AsRef<Path>, stats: &Stats) -> Result<(), BenchError> {
    let mut file = File::create(path)?;
    write_stats(&mut file, stats)
}

/// Reads a stats record from its textual encoding. Blank lines are
/// skipped; `Fastest/Slowest/Mean` are optional for compatibility
/// with older files; any other unrecognized field is an error
/// carrying the offending line.
pub fn read_stats<R: Read>(r: R) -> Result<Stats, BenchError> {
    let reader = BufReader::new(r);
    let mut stats = Stats::default();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((field, value)) = line.split_once(' ') else {
            return Err(BenchError::MalformedStatsFile(line.to_string()));
        };
        let value = value.trim();
        match field {
            "Site:" => stats.url = value.to_string(),
            "Requests:" => stats.requests = parse_u64(value, line)?,
            "Successes:" => stats.successes = parse_u64(value, line)?,
            "Failures:" => stats.failures = parse_u64(value, line)?,
            "P50(ms):" => stats.p50 = parse_f64(value, line)?,
            "P90(ms):" => stats.p90 = parse_f64(value, line)?,
            "P99(ms):" => stats.p99 = parse_f64(value, line)?,
            "Fastest(ms):" => stats.fastest = parse_f64(value, line)?,
            "Slowest(ms):" => stats.slowest = parse_f64(value, line)?,
            "Mean(ms):" => stats.mean = parse_f64(value, line)?,
            _ => return Err(BenchError::MalformedStatsFile(line.to_string())),
        }
    }
    Ok(stats)
}

pub fn read_stats_file(path: impl AsRef<Path>) -> Result<Stats, BenchError> {
    let file = File::open(path)?;
    read_stats(file)
}

fn parse_u64(value: &str, line: &str) -> Result<u64, BenchError> {
    value
        .parse()
        .map_err(|_| BenchError::MalformedStatsFile(line.to_string()))
}

fn parse_f64(value: &str, line: &str) -> Result<f64, BenchError> {
    value
        .parse()
        .map_err(|_| BenchError::MalformedStatsFile(line.to_string()))
}
