//! Analysis configuration and upfront validation
//!
//! All parameter checks happen here before any enumeration or simulation work
//! starts, so a bad configuration can never leave partial output behind.

use thiserror::Error;

/// Widest supported adder domain. 16 bits means 2^32 adder evaluations for a
/// full characterization, which is the documented tractability cap.
pub const MAX_WIDTH_BITS: u32 = 16;

/// Upper bound on the stage count, bounding the per-trial weight table.
pub const MAX_STAGES: u32 = 32;

/// Default Monte-Carlo trials per K.
pub const DEFAULT_TRIALS: u64 = 200_000;

/// Default RNG seed, kept from the original analysis harness so published
/// results stay reproducible.
pub const DEFAULT_SEED: u64 = 123_456;

/// Errors for invalid analysis parameters
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("characterization: invalid width {0} bits (supported range is 1..={MAX_WIDTH_BITS})")]
    InvalidWidth(u32),

    #[error("accumulation: invalid stage range k_min={k_min}, k_max={k_max} (need 1 <= k_min <= k_max <= {MAX_STAGES})")]
    InvalidStageRange { k_min: u32, k_max: u32 },

    #[error("accumulation: invalid trial count {0} (must be >= 1)")]
    InvalidTrialCount(u64),

    #[error("accumulation: invalid error summary mean={mean}, std={std} (both must be finite, std >= 0)")]
    InvalidSummary { mean: String, std: String },

    #[error("characterization: --mean-gamma and --std-gamma must be supplied together")]
    PartialSummaryOverride,
}

/// Parameters for one characterize-then-simulate run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Adder operand width in bits; the domain is `[0, 2^width_bits)^2`.
    pub width_bits: u32,
    /// Inclusive lower bound on the stage count K.
    pub k_min: u32,
    /// Inclusive upper bound on the stage count K.
    pub k_max: u32,
    /// Monte-Carlo trials per K.
    pub trials: u64,
    /// Seed for the per-K random streams.
    pub seed: u64,
    /// Worker threads; 0 means use the available parallelism.
    pub threads: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            width_bits: MAX_WIDTH_BITS,
            k_min: 4,
            k_max: 16,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            threads: 0,
        }
    }
}

impl AnalysisConfig {
    /// Validate every parameter before any work begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width_bits == 0 || self.width_bits > MAX_WIDTH_BITS {
            return Err(ConfigError::InvalidWidth(self.width_bits));
        }
        if self.k_min < 1 || self.k_max < self.k_min || self.k_max > MAX_STAGES {
            return Err(ConfigError::InvalidStageRange {
                k_min: self.k_min,
                k_max: self.k_max,
            });
        }
        if self.trials < 1 {
            return Err(ConfigError::InvalidTrialCount(self.trials));
        }
        Ok(())
    }

    /// Resolve the effective worker count (`threads == 0` means auto).
    pub fn effective_threads(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width_bits, 16);
        assert_eq!(config.k_min, 4);
        assert_eq!(config.k_max, 16);
        assert_eq!(config.trials, 200_000);
        assert_eq!(config.seed, 123_456);
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = AnalysisConfig {
            width_bits: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWidth(0)));
    }

    #[test]
    fn test_oversized_width_rejected() {
        let config = AnalysisConfig {
            width_bits: 17,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWidth(17)));
    }

    #[test]
    fn test_inverted_k_range_rejected() {
        let config = AnalysisConfig {
            k_min: 8,
            k_max: 4,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStageRange { k_min: 8, k_max: 4 })
        );
    }

    #[test]
    fn test_zero_k_min_rejected() {
        let config = AnalysisConfig {
            k_min: 0,
            k_max: 4,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_k_max_above_stage_cap_rejected() {
        let config = AnalysisConfig {
            k_min: 1,
            k_max: MAX_STAGES + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = AnalysisConfig {
            trials: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTrialCount(0)));
    }

    #[test]
    fn test_single_k_single_trial_is_valid() {
        let config = AnalysisConfig {
            width_bits: 4,
            k_min: 1,
            k_max: 1,
            trials: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_threads_explicit() {
        let config = AnalysisConfig {
            threads: 3,
            ..Default::default()
        };
        assert_eq!(config.effective_threads(), 3);
    }

    #[test]
    fn test_effective_threads_auto_nonzero() {
        let config = AnalysisConfig::default();
        assert!(config.effective_threads() >= 1);
    }

    #[test]
    fn test_error_messages_name_the_stage() {
        let err = ConfigError::InvalidWidth(20).to_string();
        assert!(err.contains("characterization"));
        let err = ConfigError::InvalidTrialCount(0).to_string();
        assert!(err.contains("accumulation"));
    }
}
