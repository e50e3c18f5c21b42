//! superplot-stats - One-dimensional statistics for MCMC chains
//!
//! Turns a (possibly weighted) sample of one parameter, together with its
//! posterior weight and chi-squared columns, into binned summaries:
//!
//! - **Binning**: equal-width bin edges and centers
//! - **Posterior PDF**: weighted histogram, peak or area normalised
//! - **Profile likelihood**: per-bin minimum chi-squared
//! - **Point statistics**: median, mode(s), mean, best fit, p-value
//! - **Intervals**: credible regions from the PDF, confidence intervals
//!   from the profile chi-squared
//!
//! # Design
//!
//! Every function is pure and synchronous over `&[f64]` slices. Fatal
//! problems are returned as [`StatsError`]; advisory conditions such as tied
//! modes or coarse binning travel inside the result as [`Advisory`] values.
//!
//! ```
//! use superplot_stats::{posterior_pdf, credible_region, BinLimits, Region};
//!
//! let parameter: Vec<f64> = (0..10).map(|x| x as f64).collect();
//! let weight = vec![0.1; 10];
//! let pdf = posterior_pdf(&parameter, &weight, 5, Some(BinLimits::new(0.0, 10.0)), false)?;
//! assert!(pdf.pdf.iter().all(|p| (p - 1.0).abs() < 1e-12));
//!
//! let lower = credible_region(&pdf.pdf, &pdf.bin_centers, 0.5, Region::Lower)?;
//! assert_eq!(lower.value, 3.0);
//! # Ok::<(), superplot_stats::StatsError>(())
//! ```

pub mod binning;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interval;
pub mod point;
pub mod posterior;
pub mod profile;
pub mod summary;

pub use binning::*;
pub use config::*;
pub use diagnostics::*;
pub use error::{StatsError, StatsResult};
pub use interval::*;
pub use point::*;
pub use posterior::*;
pub use profile::*;
pub use summary::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
