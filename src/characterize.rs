//! Exhaustive error characterization of an adder
//!
//! Enumerates every operand pair in the adder's domain, compares against the
//! exact truncated sum, and folds the signed residuals into an [`ErrorSummary`].
//! The fold is expressed as merge-able partial accumulators so the parallel
//! path shards rows of `a` across workers and combines them exactly.

use crate::adder::Adder;
use crate::stats::GammaAccumulator;

/// Aggregate error distribution of an adder over its full input domain.
///
/// Invariants: `min <= mean <= max`, `std >= 0`, `samples == 2^(2 * width_bits)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSummary {
    /// Mean of the signed error (approx - exact).
    pub mean: f64,
    /// Population standard deviation of the signed error.
    pub std: f64,
    /// Smallest observed error.
    pub min: i64,
    /// Largest observed error.
    pub max: i64,
    /// Number of enumerated pairs.
    pub samples: u64,
}

impl ErrorSummary {
    /// Build a synthetic summary from pre-computed moments, e.g. when replaying
    /// a characterization persisted by an earlier run. `min`/`max` bracket the
    /// mean and `samples` is zero to mark the summary as synthetic.
    pub fn from_mean_std(mean: f64, std: f64) -> Self {
        Self {
            mean,
            std,
            min: mean.floor() as i64,
            max: mean.ceil() as i64,
            samples: 0,
        }
    }

    fn from_accumulator(acc: &GammaAccumulator) -> Self {
        Self {
            mean: acc.mean(),
            std: acc.std(),
            min: acc.min(),
            max: acc.max(),
            samples: acc.count(),
        }
    }
}

/// Signed residual of two masked `width_bits`-wide values, centered into
/// `[-2^(width_bits-1), 2^(width_bits-1))`.
///
/// The centering matters at wraparound: a +1-bias adder maps `15 + 0 -> 0` at
/// width 4, and the residual must come out as +1, not -15, or the wrap pairs
/// would poison the distribution's sign.
fn signed_residual(approx: u64, exact: u64, width_bits: u32) -> i64 {
    let mask = (1u64 << width_bits) - 1;
    let diff = approx.wrapping_sub(exact) & mask;
    let half = 1u64 << (width_bits - 1);
    if diff >= half {
        diff as i64 - (1i64 << width_bits)
    } else {
        diff as i64
    }
}

/// Fold the rows `a in rows` of the domain into a partial accumulator.
fn fold_rows<A: Adder + ?Sized>(
    adder: &A,
    width_bits: u32,
    rows: std::ops::Range<u64>,
) -> GammaAccumulator {
    let mask = (1u64 << width_bits) - 1;
    let domain = 1u64 << width_bits;
    let mut acc = GammaAccumulator::new();
    for a in rows {
        for b in 0..domain {
            let exact = a.wrapping_add(b) & mask;
            // External pinout order: b first, a second.
            let approx = adder.add(b, a) & mask;
            acc.record(signed_residual(approx, exact, width_bits));
        }
    }
    acc
}

/// Characterize the adder's error distribution over its entire domain.
///
/// `width_bits` must already be validated (see
/// [`AnalysisConfig::validate`](crate::config::AnalysisConfig::validate));
/// width 16 means 2^32 adder evaluations.
pub fn characterize<A: Adder + ?Sized>(adder: &A, width_bits: u32) -> ErrorSummary {
    let domain = 1u64 << width_bits;
    tracing::info!(width_bits, pairs = domain * domain, "characterizing adder");
    let acc = fold_rows(adder, width_bits, 0..domain);
    let summary = ErrorSummary::from_accumulator(&acc);
    tracing::info!(
        mean = summary.mean,
        std = summary.std,
        min = summary.min,
        max = summary.max,
        "characterization complete"
    );
    summary
}

/// Parallel characterization: contiguous shards of `a` rows per worker, merged
/// with exact integer addition, so the result is bit-identical to
/// [`characterize`] for any worker count.
pub fn characterize_parallel<A: Adder + Sync + ?Sized>(
    adder: &A,
    width_bits: u32,
    threads: usize,
) -> ErrorSummary {
    let domain = 1u64 << width_bits;
    let workers = threads.clamp(1, domain as usize);
    if workers == 1 {
        return characterize(adder, width_bits);
    }
    tracing::info!(
        width_bits,
        pairs = domain * domain,
        workers,
        "characterizing adder (parallel)"
    );

    let rows_per_worker = domain / workers as u64;
    let remainder = domain % workers as u64;

    let acc = std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        let mut start = 0u64;
        for w in 0..workers as u64 {
            // Spread the remainder over the first shards so row coverage is exact.
            let len = rows_per_worker + u64::from(w < remainder);
            let rows = start..start + len;
            start += len;
            handles.push(scope.spawn(move || fold_rows(adder, width_bits, rows)));
        }
        let mut total = GammaAccumulator::new();
        for handle in handles {
            let partial = handle.join().expect("characterization worker panicked");
            total.merge(&partial);
        }
        total
    });

    let summary = ErrorSummary::from_accumulator(&acc);
    tracing::info!(
        mean = summary.mean,
        std = summary.std,
        min = summary.min,
        max = summary.max,
        "characterization complete"
    );
    summary
}
