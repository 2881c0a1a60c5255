//! Moment accumulation for the two analyses
//!
//! The characterization fold runs over up to 2^32 integer error samples, where
//! naive f64 accumulation loses digits. [`GammaAccumulator`] therefore keeps the
//! running sums in exact integer arithmetic (i128 / u128): the sums are bounded
//! by 2^48 and 2^64 at the 16-bit width cap, so nothing is rounded until the
//! final division. Accumulators are merge-able, which is what makes the parallel
//! partial-fold path bit-identical to the sequential one.
//!
//! Monte-Carlo aggregation works on f64 trial values, so [`Moments`] uses
//! Neumaier-compensated summation for sum and sum-of-squares instead.

/// Exact integer accumulator for signed integer error samples.
#[derive(Debug, Clone)]
pub struct GammaAccumulator {
    sum: i128,
    sum2: u128,
    min: i64,
    max: i64,
    count: u64,
}

impl Default for GammaAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl GammaAccumulator {
    pub fn new() -> Self {
        Self {
            sum: 0,
            sum2: 0,
            min: i64::MAX,
            max: i64::MIN,
            count: 0,
        }
    }

    /// Fold one signed error sample into the accumulator.
    pub fn record(&mut self, gamma: i64) {
        self.sum += gamma as i128;
        self.sum2 += (gamma as i128 * gamma as i128) as u128;
        self.min = self.min.min(gamma);
        self.max = self.max.max(gamma);
        self.count += 1;
    }

    /// Merge a partial fold produced by another worker. Integer addition is
    /// exact, so merge order cannot change the result.
    pub fn merge(&mut self, other: &GammaAccumulator) {
        self.sum += other.sum;
        self.sum2 += other.sum2;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.count += other.count;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / self.count as f64
    }

    /// Population variance via `sum2/N - mean^2`, clamped at zero: the identity
    /// holds exactly in integer arithmetic but the final f64 divisions can push
    /// a zero-variance result a few ulps negative.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let raw = self.sum2 as f64 / self.count as f64 - mean * mean;
        raw.max(0.0)
    }

    pub fn std(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> i64 {
        if self.count == 0 {
            0
        } else {
            self.min
        }
    }

    pub fn max(&self) -> i64 {
        if self.count == 0 {
            0
        } else {
            self.max
        }
    }
}

/// One Neumaier step: add `value` into `(sum, comp)`.
fn neumaier_add(sum: &mut f64, comp: &mut f64, value: f64) {
    let t = *sum + value;
    if sum.abs() >= value.abs() {
        *comp += (*sum - t) + value;
    } else {
        *comp += (value - t) + *sum;
    }
    *sum = t;
}

/// Neumaier-compensated running moments for f64 samples.
#[derive(Debug, Clone)]
pub struct Moments {
    sum: f64,
    sum_c: f64,
    sum2: f64,
    sum2_c: f64,
    min: f64,
    max: f64,
    count: u64,
}

impl Default for Moments {
    fn default() -> Self {
        Self::new()
    }
}

impl Moments {
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            sum_c: 0.0,
            sum2: 0.0,
            sum2_c: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }

    pub fn record(&mut self, x: f64) {
        neumaier_add(&mut self.sum, &mut self.sum_c, x);
        neumaier_add(&mut self.sum2, &mut self.sum2_c, x * x);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum + self.sum_c) / self.count as f64
    }

    /// Population variance with the same non-negative clamp as the integer path.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let raw = (self.sum2 + self.sum2_c) / self.count as f64 - mean * mean;
        raw.max(0.0)
    }

    pub fn std(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.min
        }
    }

    pub fn max(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.max
        }
    }
}
