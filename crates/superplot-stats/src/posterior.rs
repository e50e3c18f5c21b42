//! Marginalised posterior PDF
//!
//! A weighted histogram of the parameter column, where each sample adds its
//! posterior weight to the bin containing it. Samples outside the bin limits
//! are dropped.
//!
//! # Normalisation
//!
//! - Peak (default): divide by the largest bin so the maximum is one.
//! - Area: divide by `sum * bin_width` so the PDF integrates to one.

use crate::binning::{BinLimits, Binning};
use crate::error::{validation, StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// One-dimensional marginal posterior PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct PosteriorPdf {
    /// Normalised weight per bin
    pub pdf: Vec<f64>,
    /// Parameter value at each bin center
    pub bin_centers: Vec<f64>,
    /// Width shared by every bin
    pub bin_width: f64,
}

impl PosteriorPdf {
    /// Integral of the PDF over the binned range
    pub fn area(&self) -> f64 {
        self.pdf.iter().sum::<f64>() * self.bin_width
    }

    /// Get points for plotting (bin center, pdf) pairs
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        self.bin_centers
            .iter()
            .copied()
            .zip(self.pdf.iter().copied())
            .collect()
    }
}

/// Weighted histogram of `parameter`
///
/// Returns the raw per-bin sums together with the binning used.
pub fn weighted_histogram(
    parameter: &[f64],
    weight: &[f64],
    nbins: usize,
    bin_limits: Option<BinLimits>,
) -> StatsResult<(Vec<f64>, Binning)> {
    validation::validate_paired(parameter, weight)?;
    validation::validate_weights(weight)?;

    let binning = Binning::new(parameter, nbins, bin_limits)?;
    let mut counts = vec![0.0; binning.nbins()];
    for (&x, &w) in parameter.iter().zip(weight) {
        if let Some(idx) = binning.locate(x) {
            counts[idx] += w;
        }
    }
    Ok((counts, binning))
}

/// Compute the marginalised posterior PDF of a parameter
///
/// With `norm_area` false the PDF peaks at exactly one; with `norm_area`
/// true `sum(pdf) * bin_width == 1`.
///
/// # Errors
///
/// [`StatsError::EmptyDistribution`] if no weight falls inside the bin
/// limits, plus the binning and input validation errors.
pub fn posterior_pdf(
    parameter: &[f64],
    weight: &[f64],
    nbins: usize,
    bin_limits: Option<BinLimits>,
    norm_area: bool,
) -> StatsResult<PosteriorPdf> {
    tracing::debug!(
        samples = parameter.len(),
        nbins,
        norm_area,
        "computing posterior pdf"
    );

    let (counts, binning) = weighted_histogram(parameter, weight, nbins, bin_limits)?;
    let bin_width = binning.bin_width();

    let norm = if norm_area {
        counts.iter().sum::<f64>() * bin_width
    } else {
        counts.iter().copied().fold(0.0, f64::max)
    };
    if !(norm > 0.0) {
        return Err(StatsError::EmptyDistribution);
    }

    Ok(PosteriorPdf {
        pdf: counts.iter().map(|c| c / norm).collect(),
        bin_centers: binning.centers,
        bin_width,
    })
}
