//! Adder capability and built-in synthetic adder models
//!
//! The adder under test is injected as a capability so the characterizer can run
//! against hardware simulator shims, bit-accurate circuit models, or the synthetic
//! models below without any external dependency.

/// An adder under test.
///
/// The argument order is `(b, a)`, matching the pinout order of the external
/// hardware models this tool was built to characterize. Exact reference addition
/// is commutative so the order is unobservable for the built-in models, but an
/// external approximate adder may not be symmetric; callers must preserve it.
///
/// Only the low `width_bits` bits of the returned value are meaningful; the
/// characterizer masks the result. Width agreement between the adder and the
/// configured `width_bits` is the adder provider's responsibility and is not
/// checked beyond masking.
pub trait Adder {
    /// Return the (possibly approximate) sum of `b` and `a`.
    fn add(&self, b: u64, a: u64) -> u64;
}

/// The exact reference adder: `(a + b) mod 2^width`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactAdder;

impl Adder for ExactAdder {
    fn add(&self, b: u64, a: u64) -> u64 {
        a.wrapping_add(b)
    }
}

/// An adder with a constant additive bias, useful as a deterministic-error model.
#[derive(Debug, Clone, Copy)]
pub struct BiasedAdder {
    pub bias: u64,
}

impl BiasedAdder {
    pub fn new(bias: u64) -> Self {
        Self { bias }
    }
}

impl Adder for BiasedAdder {
    fn add(&self, b: u64, a: u64) -> u64 {
        a.wrapping_add(b).wrapping_add(self.bias)
    }
}

/// Lower-part OR adder (LOA): the low `approx_bits` columns are computed as a
/// bitwise OR with no carry chain, the upper columns are added exactly.
///
/// This is the classic approximate-adder family the EvoApprox-style models
/// belong to; it underestimates whenever both low parts have a set bit.
#[derive(Debug, Clone, Copy)]
pub struct LowerOrAdder {
    pub approx_bits: u32,
}

impl LowerOrAdder {
    pub fn new(approx_bits: u32) -> Self {
        Self { approx_bits }
    }

    fn low_mask(&self) -> u64 {
        if self.approx_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.approx_bits) - 1
        }
    }
}

impl Adder for LowerOrAdder {
    fn add(&self, b: u64, a: u64) -> u64 {
        let lo = self.low_mask();
        let upper = (a & !lo).wrapping_add(b & !lo);
        upper | ((a | b) & lo)
    }
}

/// Carry-truncated adder: the low `approx_bits` columns of both operands are
/// zeroed before an exact add, so no carries ever propagate out of the low part.
#[derive(Debug, Clone, Copy)]
pub struct TruncatedAdder {
    pub approx_bits: u32,
}

impl TruncatedAdder {
    pub fn new(approx_bits: u32) -> Self {
        Self { approx_bits }
    }
}

impl Adder for TruncatedAdder {
    fn add(&self, b: u64, a: u64) -> u64 {
        let lo = if self.approx_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.approx_bits) - 1
        };
        (a & !lo).wrapping_add(b & !lo)
    }
}

/// Wraps a closure as an [`Adder`], mainly for tests and embedding.
pub struct FnAdder<F: Fn(u64, u64) -> u64> {
    f: F,
}

impl<F: Fn(u64, u64) -> u64> FnAdder<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: Fn(u64, u64) -> u64> Adder for FnAdder<F> {
    fn add(&self, b: u64, a: u64) -> u64 {
        (self.f)(b, a)
    }
}
