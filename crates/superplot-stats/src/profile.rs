//! Profile likelihood
//!
//! For each bin of the parameter of interest, keep the smallest chi-squared
//! of any sample falling into it. This profiles out every other dimension of
//! the chain. Samples outside the bin limits are folded into the nearest
//! edge bin rather than dropped.

use crate::binning::{BinLimits, Binning};
use crate::error::{validation, StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// Profile chi-squared and profile likelihood per bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ProfileLikelihood {
    /// Minimum chi-squared per bin, shifted so the best bin is zero.
    /// Bins without samples hold `+inf`.
    pub prof_chi_sq: Vec<f64>,
    /// `exp(-0.5 * prof_chi_sq)`; zero for bins without samples
    pub prof_like: Vec<f64>,
    /// Parameter value at each bin center
    pub bin_centers: Vec<f64>,
}

impl ProfileLikelihood {
    /// Number of bins that received at least one sample
    pub fn populated_bins(&self) -> usize {
        self.prof_chi_sq.iter().filter(|c| c.is_finite()).count()
    }

    /// Bin center of the best-fitting bin
    pub fn best_bin_center(&self) -> Option<f64> {
        self.prof_chi_sq
            .iter()
            .position(|&c| c == 0.0)
            .map(|i| self.bin_centers[i])
    }
}

/// Compute the profile likelihood of a parameter
///
/// Single pass over the samples with one running minimum per bin.
///
/// # Errors
///
/// [`StatsError::EmptyDistribution`] if no sample carries a finite
/// chi-squared, plus the binning and input validation errors.
pub fn profile_likelihood(
    parameter: &[f64],
    chi_sq: &[f64],
    nbins: usize,
    bin_limits: Option<BinLimits>,
) -> StatsResult<ProfileLikelihood> {
    tracing::debug!(samples = parameter.len(), nbins, "computing profile likelihood");

    validation::validate_paired(parameter, chi_sq)?;
    let binning = Binning::new(parameter, nbins, bin_limits)?;

    let mut prof_chi_sq = vec![f64::INFINITY; binning.nbins()];
    for (&x, &c) in parameter.iter().zip(chi_sq) {
        if let Some(idx) = binning.locate_clamped(x) {
            if c < prof_chi_sq[idx] {
                prof_chi_sq[idx] = c;
            }
        }
    }

    let global_min = prof_chi_sq.iter().copied().fold(f64::INFINITY, f64::min);
    if !global_min.is_finite() {
        return Err(StatsError::EmptyDistribution);
    }

    for c in prof_chi_sq.iter_mut() {
        *c -= global_min;
    }
    let prof_like = prof_chi_sq.iter().map(|c| (-0.5 * c).exp()).collect();

    Ok(ProfileLikelihood {
        prof_chi_sq,
        prof_like,
        bin_centers: binning.centers,
    })
}
