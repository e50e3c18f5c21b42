//! superplot-io - Chain readers for superplot
//!
//! Loads MCMC chains written by sampling codes:
//!
//! - **Chain files**: whitespace-separated text, one sample per line, with
//!   posterior weight and chi-squared in the first two columns
//! - **Info files**: `lab<N>=<label>` entries naming the columns
//!
//! The loaded columns are plain `f64` slices of equal length, ready for
//! `superplot-stats`.

pub mod chain;
pub mod error;
pub mod info;

pub use chain::*;
pub use error::*;
pub use info::*;
