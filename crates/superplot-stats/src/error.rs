//! Error types for superplot-stats
//!
//! Every failure here is fatal for the call that raised it: the inputs are
//! malformed or the requested quantity cannot be resolved at the chosen
//! binning. Advisory conditions (tied modes, coarse bins) are not errors and
//! are reported through [`crate::diagnostics::Advisory`] instead.

use thiserror::Error;

/// Errors that can occur while computing one-dimensional statistics
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("Number of bins must be positive")]
    InvalidBinCount,

    #[error("Degenerate bin range: min {min}, max {max} (need finite min < max)")]
    DegenerateRange { min: f64, max: f64 },

    #[error("Distribution is empty: no positive mass to normalise")]
    EmptyDistribution,

    #[error("Could not find credible region: cumulative mass never exceeds {target}")]
    RegionNotFound { target: f64 },

    #[error("Sample is empty")]
    EmptySample,

    #[error("Length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid weight {value} at index {index}: weights must be finite and non-negative")]
    InvalidWeight { index: usize, value: f64 },

    #[error("Invalid probability for {name}: {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Degrees of freedom must be positive")]
    InvalidDegreesOfFreedom,

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Input validation shared by the statistics modules
pub mod validation {
    use super::*;

    /// Ensure a paired column has the same length as the parameter column
    pub fn validate_paired(parameter: &[f64], other: &[f64]) -> StatsResult<()> {
        if parameter.is_empty() {
            return Err(StatsError::EmptySample);
        }
        if parameter.len() != other.len() {
            return Err(StatsError::LengthMismatch {
                expected: parameter.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }

    /// Ensure every posterior weight is finite and non-negative
    pub fn validate_weights(weight: &[f64]) -> StatsResult<()> {
        match weight.iter().position(|w| !(w.is_finite() && *w >= 0.0)) {
            Some(index) => Err(StatsError::InvalidWeight {
                index,
                value: weight[index],
            }),
            None => Ok(()),
        }
    }

    /// Ensure `value` lies in the open interval (0, 1), or (0, 1] when
    /// `allow_one` is set
    pub fn validate_probability(name: &'static str, value: f64, allow_one: bool) -> StatsResult<()> {
        let upper_ok = if allow_one { value <= 1.0 } else { value < 1.0 };
        if value > 0.0 && upper_ok {
            Ok(())
        } else {
            Err(StatsError::InvalidProbability { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatsError::DegenerateRange { min: 1.0, max: 1.0 };
        assert!(err.to_string().contains("min 1"));

        let err = StatsError::LengthMismatch {
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_validate_paired() {
        assert!(validation::validate_paired(&[1.0, 2.0], &[0.5, 0.5]).is_ok());
        assert_eq!(
            validation::validate_paired(&[], &[]),
            Err(StatsError::EmptySample)
        );
        assert_eq!(
            validation::validate_paired(&[1.0, 2.0], &[0.5]),
            Err(StatsError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_validate_weights() {
        assert!(validation::validate_weights(&[0.0, 0.3, 0.7]).is_ok());
        assert!(validation::validate_weights(&[0.5, f64::NAN]).is_err());
        assert_eq!(
            validation::validate_weights(&[0.1, -0.2]),
            Err(StatsError::InvalidWeight {
                index: 1,
                value: -0.2
            })
        );
    }

    #[test]
    fn test_validate_probability() {
        assert!(validation::validate_probability("alpha", 0.32, false).is_ok());
        assert!(validation::validate_probability("alpha", 1.0, true).is_ok());
        assert!(validation::validate_probability("alpha", 1.0, false).is_err());
        assert!(validation::validate_probability("alpha", 0.0, true).is_err());
        assert!(validation::validate_probability("alpha", f64::NAN, true).is_err());
    }
}
