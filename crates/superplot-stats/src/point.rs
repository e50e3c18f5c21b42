//! Point statistics of a chain
//!
//! - Posterior median from the cumulative posterior weight
//! - Posterior mode(s) from a binned PDF
//! - Posterior mean, best-fit point and chain p-value

use crate::diagnostics::Advisory;
use crate::error::{validation, StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Order in which the cumulative posterior weight is accumulated for the
/// median
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum MedianOrdering {
    /// Sort samples by parameter value before accumulating
    #[default]
    SortByParameter,
    /// Accumulate in the order the samples are given. Only meaningful when
    /// the caller has already sorted the chain by this parameter.
    ChainOrder,
}

/// Posterior mode(s) of a binned PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct PosteriorMode {
    /// Bin centers of every bin attaining the maximum
    pub modes: Vec<f64>,
    pub advisories: Vec<Advisory>,
}

impl PosteriorMode {
    /// Check if the maximum is shared by several bins
    pub fn is_multimodal(&self) -> bool {
        self.modes.len() > 1
    }
}

/// Posterior median of a parameter
///
/// The median is the parameter value where the normalised cumulative weight
/// first reaches one half, averaged with the value at the last point where
/// it is still at most one half when the two differ.
pub fn posterior_median(
    parameter: &[f64],
    weight: &[f64],
    ordering: MedianOrdering,
) -> StatsResult<f64> {
    validation::validate_paired(parameter, weight)?;
    validation::validate_weights(weight)?;

    let mut order: Vec<usize> = (0..parameter.len()).collect();
    if ordering == MedianOrdering::SortByParameter {
        order.sort_by(|&a, &b| parameter[a].total_cmp(&parameter[b]));
    }

    let cumulative: Vec<f64> = order
        .iter()
        .scan(0.0, |acc, &i| {
            *acc += weight[i];
            Some(*acc)
        })
        .collect();
    let total = cumulative[cumulative.len() - 1];
    if !(total > 0.0) {
        return Err(StatsError::EmptyDistribution);
    }

    let lower = cumulative.iter().rposition(|c| c / total <= 0.5);
    let upper = cumulative
        .iter()
        .position(|c| c / total >= 0.5)
        .ok_or(StatsError::EmptyDistribution)?;

    let median = match lower {
        Some(lower) if lower != upper => {
            (parameter[order[lower]] + parameter[order[upper]]) / 2.0
        }
        _ => parameter[order[upper]],
    };
    Ok(median)
}

/// Posterior mode(s) of a binned PDF
///
/// Every bin sharing the maximum value is returned; a tie also yields an
/// [`Advisory::MultimodalTie`].
pub fn posterior_mode(pdf: &[f64], bin_centers: &[f64]) -> StatsResult<PosteriorMode> {
    validation::validate_paired(pdf, bin_centers)?;

    let max_count = pdf.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max_count == f64::NEG_INFINITY {
        return Err(StatsError::EmptyDistribution);
    }

    let modes: Vec<f64> = pdf
        .iter()
        .zip(bin_centers)
        .filter(|(p, _)| **p == max_count)
        .map(|(_, c)| *c)
        .collect();

    let mut advisories = Vec::new();
    if modes.len() > 1 {
        advisories.push(Advisory::MultimodalTie {
            count: modes.len() as u32,
        });
    }

    Ok(PosteriorMode { modes, advisories })
}

/// Posterior mean, `sum(w * x) / sum(w)`
pub fn posterior_mean(parameter: &[f64], weight: &[f64]) -> StatsResult<f64> {
    validation::validate_paired(parameter, weight)?;
    validation::validate_weights(weight)?;

    let total: f64 = weight.iter().sum();
    if !(total > 0.0) {
        return Err(StatsError::EmptyDistribution);
    }
    let weighted: f64 = parameter.iter().zip(weight).map(|(x, w)| x * w).sum();
    Ok(weighted / total)
}

/// Parameter value of the sample with the smallest chi-squared
///
/// The first sample wins a tie.
pub fn best_fit(parameter: &[f64], chi_sq: &[f64]) -> StatsResult<f64> {
    validation::validate_paired(parameter, chi_sq)?;

    let mut best: Option<(usize, f64)> = None;
    for (i, &c) in chi_sq.iter().enumerate() {
        if c.is_finite() && best.map_or(true, |(_, b)| c < b) {
            best = Some((i, c));
        }
    }
    best.map(|(i, _)| parameter[i])
        .ok_or(StatsError::EmptyDistribution)
}

/// Smallest finite chi-squared in the chain
pub fn min_chi_sq(chi_sq: &[f64]) -> StatsResult<f64> {
    if chi_sq.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let min = chi_sq
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold(f64::INFINITY, f64::min);
    if min.is_finite() {
        Ok(min)
    } else {
        Err(StatsError::EmptyDistribution)
    }
}

/// p-value of the best fit, `1 - CDF(min chi_sq)` for a chi-squared
/// distribution with `dof` degrees of freedom
pub fn p_value(chi_sq: &[f64], dof: u32) -> StatsResult<f64> {
    if dof == 0 {
        return Err(StatsError::InvalidDegreesOfFreedom);
    }
    let min = min_chi_sq(chi_sq)?;
    let dist =
        ChiSquared::new(dof as f64).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(1.0 - dist.cdf(min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posterior_median_averages_straddling_points() {
        // Cumulative weights 0.25, 0.5, 0.75, 1.0: the half point is hit
        // exactly at index 1, so lower and upper coincide.
        let parameter = vec![1.0, 2.0, 3.0, 4.0];
        let weight = vec![1.0, 1.0, 1.0, 1.0];
        let median = posterior_median(&parameter, &weight, MedianOrdering::ChainOrder).unwrap();
        assert_eq!(median, 2.0);

        // Cumulative weights 0.4, 0.6: last <= 0.5 is index 0, first >= 0.5
        // is index 1.
        let median =
            posterior_median(&[10.0, 20.0], &[0.4, 0.6], MedianOrdering::ChainOrder).unwrap();
        assert_eq!(median, 15.0);
    }

    #[test]
    fn test_posterior_median_heavy_first_sample() {
        let median =
            posterior_median(&[7.0, 8.0, 9.0], &[0.9, 0.05, 0.05], MedianOrdering::ChainOrder)
                .unwrap();
        assert_eq!(median, 7.0);
    }

    #[test]
    fn test_posterior_median_ordering_matters() {
        let parameter = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        let weight = vec![1.0, 1.0, 1.0, 1.0, 4.0];
        // Sorted: cumulative 1/8, 2/8, 6/8, ... straddles between 2 and 3
        let sorted =
            posterior_median(&parameter, &weight, MedianOrdering::SortByParameter).unwrap();
        // Chain order: cumulative reaches exactly 4/8 at the fourth sample
        let chain = posterior_median(&parameter, &weight, MedianOrdering::ChainOrder).unwrap();
        assert_eq!(sorted, 2.5);
        assert_eq!(chain, 2.0);
    }

    #[test]
    fn test_posterior_median_unnormalised_weights() {
        let median =
            posterior_median(&[1.0, 2.0, 3.0], &[2.0, 6.0, 2.0], MedianOrdering::default())
                .unwrap();
        // Cumulative 0.2, 0.8: last <= 0.5 is 1.0, first >= 0.5 is 2.0
        assert_eq!(median, 1.5);
    }

    #[test]
    fn test_posterior_median_zero_weights() {
        assert_eq!(
            posterior_median(&[1.0, 2.0], &[0.0, 0.0], MedianOrdering::default()),
            Err(StatsError::EmptyDistribution)
        );
    }

    #[test]
    fn test_posterior_mode_single() {
        let pdf = vec![0.1, 1.0, 0.3];
        let centers = vec![0.5, 1.5, 2.5];
        let mode = posterior_mode(&pdf, &centers).unwrap();
        assert_eq!(mode.modes, vec![1.5]);
        assert!(mode.advisories.is_empty());
        assert!(!mode.is_multimodal());
    }

    #[test]
    fn test_posterior_mode_tie() {
        let pdf = vec![1.0, 0.2, 1.0, 1.0];
        let centers = vec![0.5, 1.5, 2.5, 3.5];
        let mode = posterior_mode(&pdf, &centers).unwrap();
        assert_eq!(mode.modes, vec![0.5, 2.5, 3.5]);
        assert_eq!(mode.advisories, vec![Advisory::MultimodalTie { count: 3 }]);
    }

    #[test]
    fn test_posterior_mode_errors() {
        assert_eq!(posterior_mode(&[], &[]), Err(StatsError::EmptySample));
        assert!(matches!(
            posterior_mode(&[1.0], &[0.5, 1.5]),
            Err(StatsError::LengthMismatch { .. })
        ));
        assert_eq!(
            posterior_mode(&[f64::NAN], &[0.5]),
            Err(StatsError::EmptyDistribution)
        );
    }

    #[test]
    fn test_posterior_mean() {
        let mean = posterior_mean(&[1.0, 2.0, 3.0], &[1.0, 2.0, 1.0]).unwrap();
        assert!((mean - 2.0).abs() < 1e-12);
        assert_eq!(
            posterior_mean(&[1.0], &[0.0]),
            Err(StatsError::EmptyDistribution)
        );
    }

    #[test]
    fn test_best_fit() {
        let parameter = vec![1.0, 2.0, 3.0, 4.0];
        let chi_sq = vec![5.0, 0.5, f64::NAN, 0.5];
        assert_eq!(best_fit(&parameter, &chi_sq).unwrap(), 2.0);
        assert_eq!(
            best_fit(&[1.0], &[f64::NAN]),
            Err(StatsError::EmptyDistribution)
        );
    }

    #[test]
    fn test_p_value() {
        // chi2(1) survival at 3.841 is ~0.05
        let p = p_value(&[10.0, 3.841_458_820_694_124], 1).unwrap();
        assert!((p - 0.05).abs() < 1e-6);

        // Zero chi-squared is a perfect fit
        assert!((p_value(&[0.0], 4).unwrap() - 1.0).abs() < 1e-12);

        assert_eq!(p_value(&[1.0], 0), Err(StatsError::InvalidDegreesOfFreedom));
    }
}
