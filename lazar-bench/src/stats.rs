//! Result records and CSV formatting for the benchmark suite.

use lazar_core::Counters;

/// CSV header for benchmark output.
///
/// `init_time_ns_if_recorded` is only meaningful for `INIT_ONLY` runs and
/// is zero elsewhere.
pub const CSV_HEADER: &str = "timestamp_iso,impl_name,scenario,N,seed,rep_id,\
ops_in_run,total_time_ns,ns_per_op,init_time_ns_if_recorded,\
relocations_count,conversions_count";

/// One benchmark run: a (implementation, scenario, N, seed, rep) point.
#[derive(Debug, Clone)]
pub struct RunRecord {
    /// UTC timestamp of the run.
    pub timestamp_iso: String,
    /// Implementation label (`flat`, `block2`, `block4`, `flat_direct`).
    pub impl_name: String,
    /// Scenario label.
    pub scenario: String,
    /// Array size in cells.
    pub n: usize,
    /// RNG seed driving the op stream.
    pub seed: u64,
    /// Repetition id, 1-based.
    pub rep_id: u32,
    /// Operations inside the timed region.
    pub ops_in_run: usize,
    /// Wall time of the timed region in nanoseconds.
    pub total_time_ns: u128,
    /// Init phase time, recorded only by `INIT_ONLY`.
    pub init_time_ns: u128,
    /// Counters captured after the run.
    pub counters: Counters,
}

impl RunRecord {
    /// Mean cost per operation in nanoseconds.
    pub fn ns_per_op(&self) -> f64 {
        if self.ops_in_run == 0 {
            0.0
        } else {
            self.total_time_ns as f64 / self.ops_in_run as f64
        }
    }

    /// Format as CSV row matching [`CSV_HEADER`].
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{:.4},{},{},{}",
            self.timestamp_iso,
            self.impl_name,
            self.scenario,
            self.n,
            self.seed,
            self.rep_id,
            self.ops_in_run,
            self.total_time_ns,
            self.ns_per_op(),
            self.init_time_ns,
            self.counters.relocations,
            self.counters.conversions,
        )
    }
}

/// Format a large number with K/M/G suffixes for console output.
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}G", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        format!("{}", n)
    }
}

/// Parse a size like `10000`, `10k`, `1.5m`, or `2g` (case-insensitive).
pub fn parse_size(s: &str) -> Result<usize, String> {
    let t = s.trim();
    if t.is_empty() {
        return Err("empty size".into());
    }
    let (digits, mult) = match t.chars().last().unwrap().to_ascii_lowercase() {
        'k' => (&t[..t.len() - 1], 1e3),
        'm' => (&t[..t.len() - 1], 1e6),
        'g' => (&t[..t.len() - 1], 1e9),
        _ => (t, 1.0),
    };
    let v: f64 = digits
        .parse()
        .map_err(|_| format!("invalid size: {s}"))?;
    if v < 0.0 {
        return Err(format!("negative size: {s}"));
    }
    Ok((v * mult) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("10000").unwrap(), 10_000);
        assert_eq!(parse_size("10k").unwrap(), 10_000);
        assert_eq!(parse_size("1.5M").unwrap(), 1_500_000);
        assert_eq!(parse_size("2g").unwrap(), 2_000_000_000);
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(500), "500");
        assert_eq!(format_number(1500), "1.5K");
        assert_eq!(format_number(1_500_000), "1.5M");
        assert_eq!(format_number(1_500_000_000), "1.5G");
    }

    #[test]
    fn test_csv_row_shape() {
        let rec = RunRecord {
            timestamp_iso: "2026-01-01T00:00:00Z".into(),
            impl_name: "block2".into(),
            scenario: "WRITE_RANDOM".into(),
            n: 1000,
            seed: 42,
            rep_id: 1,
            ops_in_run: 1000,
            total_time_ns: 5000,
            init_time_ns: 0,
            counters: Counters::default(),
        };
        let row = rec.to_csv();
        assert_eq!(row.split(',').count(), CSV_HEADER.split(',').count());
        assert!(row.contains(",5.0000,"));
    }
}
