//! Credible regions and confidence intervals
//!
//! Credible regions are Bayesian: integrate the binned posterior PDF until a
//! target mass is passed. Confidence intervals are frequentist: keep every
//! bin whose profile chi-squared lies within a critical delta of the best
//! fit. The latter need not be contiguous, so membership is reported per bin.

use crate::diagnostics::{Advisory, CREDIBLE_MASS_TOLERANCE};
use crate::error::{validation, StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;
use std::str::FromStr;

/// Which edge of a two-sided credible region to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Lower,
    Upper,
}

impl Region {
    /// Cumulative mass the bound must pass, `alpha / 2` or `1 - alpha / 2`
    pub fn target_mass(&self, alpha: f64) -> f64 {
        match self {
            Region::Lower => 0.5 * alpha,
            Region::Upper => 1.0 - 0.5 * alpha,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Lower => write!(f, "lower"),
            Region::Upper => write!(f, "upper"),
        }
    }
}

impl FromStr for Region {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lower" => Ok(Region::Lower),
            "upper" => Ok(Region::Upper),
            other => Err(StatsError::Config(format!(
                "region must be \"lower\" or \"upper\", got \"{}\"",
                other
            ))),
        }
    }
}

/// One edge of a credible region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct CredibleBound {
    /// Bin center where the cumulative mass first exceeds the target
    pub value: f64,
    pub target_mass: f64,
    /// Cumulative mass up to and including the returned bin
    pub achieved_mass: f64,
    pub advisories: Vec<Advisory>,
}

/// Find one edge of a credible region of a binned PDF
///
/// The PDF is treated as a discrete mass over bins (normalised to sum to
/// one). `alpha` must lie in `(0, 1]`; `alpha == 1` targets the median from
/// either side.
///
/// # Errors
///
/// [`StatsError::RegionNotFound`] if the cumulative mass never exceeds the
/// target, which happens for an all-zero PDF.
pub fn credible_region(
    pdf: &[f64],
    bin_centers: &[f64],
    alpha: f64,
    region: Region,
) -> StatsResult<CredibleBound> {
    validation::validate_paired(pdf, bin_centers)?;
    validation::validate_probability("alpha", alpha, true)?;

    let target_mass = region.target_mass(alpha);
    let total: f64 = pdf.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(StatsError::RegionNotFound {
            target: target_mass,
        });
    }

    let mut cumulative = 0.0;
    for (p, &center) in pdf.iter().zip(bin_centers) {
        cumulative += p / total;
        if cumulative > target_mass {
            let mut advisories = Vec::new();
            if (cumulative - target_mass).abs() > CREDIBLE_MASS_TOLERANCE {
                advisories.push(Advisory::LowBinResolution {
                    target: target_mass,
                    achieved: cumulative,
                });
            }
            return Ok(CredibleBound {
                value: center,
                target_mass,
                achieved_mass: cumulative,
                advisories,
            });
        }
    }

    Err(StatsError::RegionNotFound {
        target: target_mass,
    })
}

/// Critical delta chi-squared for a confidence level `1 - alpha`, from the
/// inverse CDF of a chi-squared distribution with one degree of freedom
pub fn critical_chi_sq(alpha: f64) -> StatsResult<f64> {
    validation::validate_probability("alpha", alpha, false)?;
    // chi2(1) is the square of a standard normal
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution(e.to_string()))?;
    let z = normal.inverse_cdf(1.0 - 0.5 * alpha);
    Ok(z * z)
}

/// Per-bin confidence-interval membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ConfidenceInterval {
    /// Bin center for bins inside the interval, `None` for excluded bins
    pub bins: Vec<Option<f64>>,
    pub critical_chi_sq: f64,
}

impl ConfidenceInterval {
    /// Parallel inclusion mask
    pub fn mask(&self) -> Vec<bool> {
        self.bins.iter().map(Option::is_some).collect()
    }

    /// Number of bins inside the interval
    pub fn included(&self) -> usize {
        self.bins.iter().filter(|b| b.is_some()).count()
    }

    /// Contiguous runs of included bins as (first center, last center)
    pub fn segments(&self) -> Vec<(f64, f64)> {
        let mut segments = Vec::new();
        let mut current: Option<(f64, f64)> = None;
        for bin in &self.bins {
            current = match (bin, current) {
                (Some(c), None) => Some((*c, *c)),
                (Some(c), Some((start, _))) => Some((start, *c)),
                (None, Some(segment)) => {
                    segments.push(segment);
                    None
                }
                (None, None) => None,
            };
        }
        segments.extend(current);
        segments
    }
}

/// Confidence interval from a profile chi-squared
///
/// A bin is included iff `prof_chi_sq - min(prof_chi_sq)` is strictly below
/// the critical value for `alpha`. Intervals may be disjoint; they are never
/// coalesced into a single range.
pub fn confidence_interval(
    prof_chi_sq: &[f64],
    bin_centers: &[f64],
    alpha: f64,
) -> StatsResult<ConfidenceInterval> {
    validation::validate_paired(prof_chi_sq, bin_centers)?;
    let critical = critical_chi_sq(alpha)?;

    let min = prof_chi_sq
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return Err(StatsError::EmptyDistribution);
    }

    let bins = prof_chi_sq
        .iter()
        .zip(bin_centers)
        .map(|(c, center)| (c - min < critical).then_some(*center))
        .collect();

    Ok(ConfidenceInterval {
        bins,
        critical_chi_sq: critical,
    })
}
