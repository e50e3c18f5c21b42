//! Advisory diagnostics
//!
//! Non-fatal conditions found while computing a statistic. They travel with
//! the result rather than through a side channel, so callers decide whether
//! to log, display, or ignore them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance on the cumulative mass achieved by a credible-region bound
pub const CREDIBLE_MASS_TOLERANCE: f64 = 0.01;

/// A non-fatal advisory attached to a statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Advisory {
    /// The maximum of a PDF is shared by `count` bins; all are returned
    MultimodalTie { count: u32 },
    /// A credible-region bound missed its target mass by more than
    /// [`CREDIBLE_MASS_TOLERANCE`]; increase the number of bins
    LowBinResolution { target: f64, achieved: f64 },
}

impl Advisory {
    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Advisory::MultimodalTie { .. } => "multimodal_tie",
            Advisory::LowBinResolution { .. } => "low_bin_resolution",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::MultimodalTie { count } => {
                write!(f, "posterior mode: max count shared by {} bins", count)
            }
            Advisory::LowBinResolution { target, achieved } => write!(
                f,
                "credible region: achieved mass {:.4} vs target {:.4}, increase number of bins",
                achieved, target
            ),
        }
    }
}
