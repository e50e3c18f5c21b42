//! Configuration for one-dimensional statistics
//!
//! The knobs are passed into each computation as values; nothing here is
//! global state. Config files may be TOML or JSON and may omit any field.

use crate::binning::BinLimits;
use crate::error::{validation, StatsError, StatsResult};
use crate::point::MedianOrdering;
use serde::{Deserialize, Serialize};

/// Default number of bins for histograms and profiles
pub const DEFAULT_NBINS: usize = 50;

/// One-sigma probability level, `1 - 0.6827`
pub const DEFAULT_ALPHA: f64 = 0.3173;

/// Settings shared by every statistic of a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(default)]
pub struct StatsConfig {
    /// Number of bins
    pub nbins: u32,
    /// Bin limits (None = min/max of the parameter)
    pub bin_limits: Option<BinLimits>,
    /// Normalise posterior PDFs to unit area instead of unit peak
    pub norm_area: bool,
    /// Probability level for credible regions and confidence intervals
    pub alpha: f64,
    /// Accumulation order for the posterior median
    pub median_ordering: MedianOrdering,
    /// Degrees of freedom for the best-fit p-value (None = skip)
    pub dof: Option<u32>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            nbins: DEFAULT_NBINS as u32,
            bin_limits: None,
            norm_area: false,
            alpha: DEFAULT_ALPHA,
            median_ordering: MedianOrdering::default(),
            dof: None,
        }
    }
}

impl StatsConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bins as a size
    pub fn nbins(&self) -> usize {
        self.nbins as usize
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> StatsResult<Self> {
        toml::from_str(toml_str).map_err(|e| StatsError::Config(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> StatsResult<String> {
        toml::to_string_pretty(self).map_err(|e| StatsError::Config(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> StatsResult<Self> {
        serde_json::from_str(json_str).map_err(|e| StatsError::Config(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> StatsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StatsError::Config(e.to_string()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> StatsResult<()> {
        if self.nbins == 0 {
            return Err(StatsError::Config("nbins must be positive".to_string()));
        }

        if let Some(limits) = self.bin_limits {
            if !(limits.range().is_finite() && limits.min < limits.max) {
                return Err(StatsError::Config(format!(
                    "bin_limits must satisfy min < max, got [{}, {}]",
                    limits.min, limits.max
                )));
            }
        }

        validation::validate_probability("alpha", self.alpha, false)
            .map_err(|e| StatsError::Config(e.to_string()))?;

        if self.dof == Some(0) {
            return Err(StatsError::Config("dof must be positive".to_string()));
        }

        Ok(())
    }
}
