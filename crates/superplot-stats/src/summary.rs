//! Per-parameter and per-chain summaries
//!
//! Runs every one-dimensional statistic for a parameter with one
//! [`StatsConfig`] and gathers the advisories they raise.

use crate::config::StatsConfig;
use crate::diagnostics::Advisory;
use crate::error::StatsResult;
use crate::interval::{confidence_interval, credible_region, ConfidenceInterval, Region};
use crate::point::{best_fit, min_chi_sq, p_value, posterior_mean, posterior_median, posterior_mode};
use crate::posterior::posterior_pdf;
use crate::profile::profile_likelihood;
use serde::{Deserialize, Serialize};

/// Summary statistics for one parameter of a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ParameterSummary {
    pub name: String,
    /// Parameter at the minimum chi-squared
    pub best_fit: f64,
    pub posterior_mean: f64,
    pub posterior_median: f64,
    /// Bin center(s) of the marginal PDF maximum
    pub posterior_modes: Vec<f64>,
    /// Lower edge of the credible region at `alpha`
    pub credible_lower: f64,
    /// Upper edge of the credible region at `alpha`
    pub credible_upper: f64,
    /// Profile-likelihood confidence interval at `alpha`
    pub confidence_interval: ConfidenceInterval,
    pub advisories: Vec<Advisory>,
}

impl ParameterSummary {
    /// Compute every statistic for one parameter column
    pub fn compute(
        name: &str,
        parameter: &[f64],
        weight: &[f64],
        chi_sq: &[f64],
        config: &StatsConfig,
    ) -> StatsResult<Self> {
        config.validate()?;
        let nbins = config.nbins();

        let pdf = posterior_pdf(parameter, weight, nbins, config.bin_limits, config.norm_area)?;
        let mode = posterior_mode(&pdf.pdf, &pdf.bin_centers)?;
        let lower = credible_region(&pdf.pdf, &pdf.bin_centers, config.alpha, Region::Lower)?;
        let upper = credible_region(&pdf.pdf, &pdf.bin_centers, config.alpha, Region::Upper)?;

        let profile = profile_likelihood(parameter, chi_sq, nbins, config.bin_limits)?;
        let interval = confidence_interval(&profile.prof_chi_sq, &profile.bin_centers, config.alpha)?;

        let advisories: Vec<Advisory> = mode
            .advisories
            .into_iter()
            .chain(lower.advisories)
            .chain(upper.advisories)
            .collect();
        for advisory in &advisories {
            tracing::warn!(parameter = name, code = advisory.code(), "{}", advisory);
        }

        Ok(Self {
            name: name.to_string(),
            best_fit: best_fit(parameter, chi_sq)?,
            posterior_mean: posterior_mean(parameter, weight)?,
            posterior_median: posterior_median(parameter, weight, config.median_ordering)?,
            posterior_modes: mode.modes,
            credible_lower: lower.value,
            credible_upper: upper.value,
            confidence_interval: interval,
            advisories,
        })
    }
}

/// Summary of every parameter in a chain plus best-fit goodness of fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ChainSummary {
    pub parameters: Vec<ParameterSummary>,
    pub min_chi_sq: f64,
    /// p-value of the best fit, when degrees of freedom are configured
    pub p_value: Option<f64>,
}

impl ChainSummary {
    /// Summarise named parameter columns sharing one weight and chi-squared
    /// column
    pub fn compute<'a, I>(
        parameters: I,
        weight: &[f64],
        chi_sq: &[f64],
        config: &StatsConfig,
    ) -> StatsResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [f64])>,
    {
        let parameters = parameters
            .into_iter()
            .map(|(name, column)| ParameterSummary::compute(name, column, weight, chi_sq, config))
            .collect::<StatsResult<Vec<_>>>()?;

        let p_value = config.dof.map(|dof| p_value(chi_sq, dof)).transpose()?;

        Ok(Self {
            parameters,
            min_chi_sq: min_chi_sq(chi_sq)?,
            p_value,
        })
    }

    /// Total number of advisories across all parameters
    pub fn advisory_count(&self) -> usize {
        self.parameters.iter().map(|p| p.advisories.len()).sum()
    }
}
