//! Workload scenarios and the drivers that time them.
//!
//! Each scenario seeds its own RNG, performs its init phase outside the
//! timed region (except `INIT_ONLY`, whose init *is* the timed region), and
//! reports the op count and elapsed nanoseconds. Index and op streams are
//! pregenerated where the scenario allows it so the timed loop measures the
//! array, not the RNG.

use std::hint::black_box;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use lazar_core::{ArrayError, Block2Array, Block4Array, DynArray, FlatArray, InitArray, Word};

/// Cap on the number of timed operations per run.
const MAX_OPS: usize = 1_000_000;

/// Benchmark workload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// A single `init` call, timed.
    InitOnly,
    /// Random reads of a freshly initialized array.
    ReadUnwritten,
    /// `write(i, i)` over the whole array in order.
    WriteSequential,
    /// Uniform random writes.
    WriteRandom,
    /// Random mix with the given read percentage.
    Mixed {
        /// Percentage of reads, the rest are writes.
        read_pct: u32,
    },
    /// Half the writes hammer the first N/10 cells.
    AdversarialHotspot,
}

impl Scenario {
    /// The full default suite, in run order.
    pub fn default_suite() -> Vec<Scenario> {
        let mut suite = vec![
            Scenario::InitOnly,
            Scenario::ReadUnwritten,
            Scenario::WriteSequential,
            Scenario::WriteRandom,
        ];
        for read_pct in [90, 80, 70, 50, 30, 10] {
            suite.push(Scenario::Mixed { read_pct });
        }
        suite.push(Scenario::AdversarialHotspot);
        suite
    }

    /// Label used in CSV rows and progress lines.
    pub fn label(&self) -> String {
        match self {
            Scenario::InitOnly => "INIT_ONLY".into(),
            Scenario::ReadUnwritten => "READ_UNWRITTEN".into(),
            Scenario::WriteSequential => "WRITE_SEQUENTIAL".into(),
            Scenario::WriteRandom => "WRITE_RANDOM".into(),
            Scenario::Mixed { read_pct } => {
                format!("MIXED_R{}W{}", read_pct, 100 - read_pct)
            }
            Scenario::AdversarialHotspot => "ADVERSARIAL_HOTSPOT".into(),
        }
    }
}

/// Timed portion of one benchmark run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioOutcome {
    /// Operations inside the timed region.
    pub ops_in_run: usize,
    /// Elapsed nanoseconds of the timed region.
    pub total_time_ns: u128,
    /// Init time, only recorded by `INIT_ONLY`.
    pub init_time_ns: u128,
}

/// Selectable implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplKind {
    /// O(N)-init reference through the common contract.
    Flat,
    /// Block-size-2 in-place variant.
    Block2,
    /// Block-size-4 in-place variant.
    Block4,
    /// Raw `Vec<i64>` loops without any dispatch, as a floor baseline.
    FlatDirect,
}

impl ImplKind {
    /// Every implementation, default run order.
    pub const ALL: [ImplKind; 4] = [
        ImplKind::Flat,
        ImplKind::Block2,
        ImplKind::Block4,
        ImplKind::FlatDirect,
    ];

    /// CSV/CLI label.
    pub fn label(&self) -> &'static str {
        match self {
            ImplKind::Flat => "flat",
            ImplKind::Block2 => "block2",
            ImplKind::Block4 => "block4",
            ImplKind::FlatDirect => "flat_direct",
        }
    }

    /// Parse a CLI label.
    pub fn parse(s: &str) -> Result<ImplKind, String> {
        match s {
            "flat" => Ok(ImplKind::Flat),
            "block2" => Ok(ImplKind::Block2),
            "block4" => Ok(ImplKind::Block4),
            "flat_direct" => Ok(ImplKind::FlatDirect),
            other => Err(format!(
                "unknown implementation '{other}' (expected flat, block2, block4 or flat_direct)"
            )),
        }
    }

    /// Whether `n` satisfies this implementation's block alignment.
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            ImplKind::Flat | ImplKind::FlatDirect => n > 0,
            ImplKind::Block2 => n > 0 && n % 2 == 0,
            ImplKind::Block4 => n > 0 && n % 4 == 0,
        }
    }

    /// Build the contract-backed container; `FlatDirect` has none.
    pub fn build(&self, n: usize) -> Result<Option<DynArray>, ArrayError> {
        Ok(match self {
            ImplKind::Flat => Some(DynArray::Flat(FlatArray::new(n)?)),
            ImplKind::Block2 => Some(DynArray::Block2(Block2Array::new(n)?)),
            ImplKind::Block4 => Some(DynArray::Block4(Block4Array::new(n)?)),
            ImplKind::FlatDirect => None,
        })
    }
}

fn rand_value(rng: &mut Xoshiro256PlusPlus) -> Word {
    rng.gen_range(-1000i64..=1000)
}

fn rand_indices(rng: &mut Xoshiro256PlusPlus, m: usize, n: usize) -> Vec<usize> {
    (0..m).map(|_| rng.gen_range(0..n)).collect()
}

/// Runs `scenario` against a contract-backed array.
///
/// Reads/writes inside the timed loops unwrap: every generated index is in
/// range by construction.
pub fn run_scenario(arr: &mut DynArray, scenario: Scenario, n: usize, seed: u64) -> ScenarioOutcome {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    arr.reset_counters();

    match scenario {
        Scenario::InitOnly => {
            let t0 = Instant::now();
            arr.init(42);
            let el = t0.elapsed().as_nanos();
            ScenarioOutcome {
                ops_in_run: 1,
                total_time_ns: el,
                init_time_ns: el,
            }
        }
        Scenario::ReadUnwritten => {
            arr.init(123);
            let m = MAX_OPS.min(10 * n);
            let idx = rand_indices(&mut rng, m, n);
            let t0 = Instant::now();
            let mut sink: Word = 0;
            for &i in &idx {
                sink ^= arr.read(black_box(i)).unwrap();
            }
            let el = t0.elapsed().as_nanos();
            black_box(sink);
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::WriteSequential => {
            arr.init(0);
            let t0 = Instant::now();
            for i in 0..n {
                arr.write(i, i as Word).unwrap();
            }
            let el = t0.elapsed().as_nanos();
            ScenarioOutcome {
                ops_in_run: n,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::WriteRandom => {
            arr.init(0);
            let m = MAX_OPS.min(n);
            let idx = rand_indices(&mut rng, m, n);
            let t0 = Instant::now();
            for &i in &idx {
                arr.write(black_box(i), rand_value(&mut rng)).unwrap();
            }
            let el = t0.elapsed().as_nanos();
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::Mixed { read_pct } => {
            arr.init(42);
            let m = MAX_OPS.min(n);
            let idx = rand_indices(&mut rng, m, n);
            let ops: Vec<bool> = (0..m).map(|_| rng.gen_range(0..100) < read_pct).collect();
            let t0 = Instant::now();
            let mut sink: Word = 0;
            for t in 0..m {
                if ops[t] {
                    sink ^= arr.read(black_box(idx[t])).unwrap();
                } else {
                    arr.write(black_box(idx[t]), rand_value(&mut rng)).unwrap();
                }
            }
            let el = t0.elapsed().as_nanos();
            black_box(sink);
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::AdversarialHotspot => {
            arr.init(0);
            let m = MAX_OPS.min(n);
            let hot = (n / 10).max(1);
            let t0 = Instant::now();
            for _ in 0..m {
                let i = if rng.gen_range(0..2) == 0 {
                    rng.gen_range(0..hot)
                } else {
                    rng.gen_range(0..n)
                };
                arr.write(black_box(i), rand_value(&mut rng)).unwrap();
            }
            let el = t0.elapsed().as_nanos();
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
    }
}

/// Same scenarios over a bare `Vec<i64>`, with no trait or enum in the way.
/// This is the absolute baseline the in-place variants are compared to.
pub fn run_scenario_direct(scenario: Scenario, n: usize, seed: u64) -> ScenarioOutcome {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut a: Vec<Word> = vec![0; n];

    match scenario {
        Scenario::InitOnly => {
            let t0 = Instant::now();
            a.fill(42);
            let el = t0.elapsed().as_nanos();
            black_box(&a);
            ScenarioOutcome {
                ops_in_run: 1,
                total_time_ns: el,
                init_time_ns: el,
            }
        }
        Scenario::ReadUnwritten => {
            a.fill(123);
            let m = MAX_OPS.min(10 * n);
            let idx = rand_indices(&mut rng, m, n);
            let t0 = Instant::now();
            let mut sink: Word = 0;
            for &i in &idx {
                sink ^= a[black_box(i)];
            }
            let el = t0.elapsed().as_nanos();
            black_box(sink);
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::WriteSequential => {
            a.fill(0);
            let t0 = Instant::now();
            for i in 0..n {
                a[i] = i as Word;
            }
            let el = t0.elapsed().as_nanos();
            black_box(&a);
            ScenarioOutcome {
                ops_in_run: n,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::WriteRandom => {
            a.fill(0);
            let m = MAX_OPS.min(n);
            let idx = rand_indices(&mut rng, m, n);
            let t0 = Instant::now();
            for &i in &idx {
                a[black_box(i)] = rand_value(&mut rng);
            }
            let el = t0.elapsed().as_nanos();
            black_box(&a);
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::Mixed { read_pct } => {
            a.fill(42);
            let m = MAX_OPS.min(n);
            let idx = rand_indices(&mut rng, m, n);
            let ops: Vec<bool> = (0..m).map(|_| rng.gen_range(0..100) < read_pct).collect();
            let t0 = Instant::now();
            let mut sink: Word = 0;
            for t in 0..m {
                if ops[t] {
                    sink ^= a[black_box(idx[t])];
                } else {
                    a[black_box(idx[t])] = rand_value(&mut rng);
                }
            }
            let el = t0.elapsed().as_nanos();
            black_box(sink);
            black_box(&a);
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
        Scenario::AdversarialHotspot => {
            a.fill(0);
            let m = MAX_OPS.min(n);
            let hot = (n / 10).max(1);
            let t0 = Instant::now();
            for _ in 0..m {
                let i = if rng.gen_range(0..2) == 0 {
                    rng.gen_range(0..hot)
                } else {
                    rng.gen_range(0..n)
                };
                a[black_box(i)] = rand_value(&mut rng);
            }
            let el = t0.elapsed().as_nanos();
            black_box(&a);
            ScenarioOutcome {
                ops_in_run: m,
                total_time_ns: el,
                init_time_ns: 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_has_eleven_scenarios() {
        let suite = Scenario::default_suite();
        assert_eq!(suite.len(), 11);
        assert_eq!(suite[0].label(), "INIT_ONLY");
        assert_eq!(suite[4].label(), "MIXED_R90W10");
        assert_eq!(suite[10].label(), "ADVERSARIAL_HOTSPOT");
    }

    #[test]
    fn impl_parsing_round_trips() {
        for kind in ImplKind::ALL {
            assert_eq!(ImplKind::parse(kind.label()).unwrap(), kind);
        }
        assert!(ImplKind::parse("vec").is_err());
    }

    #[test]
    fn alignment_gating() {
        assert!(ImplKind::Block2.accepts(10));
        assert!(!ImplKind::Block2.accepts(9));
        assert!(ImplKind::Block4.accepts(12));
        assert!(!ImplKind::Block4.accepts(10));
        assert!(ImplKind::Flat.accepts(1));
    }

    #[test]
    fn scenarios_run_on_small_arrays() {
        for kind in [ImplKind::Flat, ImplKind::Block2, ImplKind::Block4] {
            let mut arr = kind.build(400).unwrap().unwrap();
            for scenario in Scenario::default_suite() {
                let out = run_scenario(&mut arr, scenario, 400, 7);
                assert!(out.ops_in_run > 0, "{}", scenario.label());
            }
        }
        for scenario in Scenario::default_suite() {
            let out = run_scenario_direct(scenario, 400, 7);
            assert!(out.ops_in_run > 0);
        }
    }
}
