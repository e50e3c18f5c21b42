//! Equal-width binning of a parameter range
//!
//! The binning is the primitive shared by the posterior PDF and the profile
//! likelihood. Bins are half-open, `[e_i, e_{i+1})`, except the last bin
//! which also contains the upper limit. A value sitting exactly on an
//! interior edge therefore belongs to the upper bin.

use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// Closed range covered by the bins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct BinLimits {
    pub min: f64,
    pub max: f64,
}

impl BinLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Limits spanning the finite values of a sample
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        let mut finite = data.iter().copied().filter(|x| x.is_finite()).peekable();
        if finite.peek().is_none() {
            return Err(StatsError::EmptySample);
        }
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        Ok(Self { min, max })
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    fn validate(&self) -> StatsResult<()> {
        if self.min.is_finite()
            && self.max.is_finite()
            && self.range().is_finite()
            && self.min < self.max
        {
            Ok(())
        } else {
            Err(StatsError::DegenerateRange {
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Bin edges and centers for a fixed number of equal-width bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Binning {
    /// `nbins + 1` strictly ascending edges
    pub edges: Vec<f64>,
    /// `nbins` midpoints of adjacent edges
    pub centers: Vec<f64>,
}

impl Binning {
    /// Bin a parameter column
    ///
    /// Uses `bin_limits` when given, otherwise the min/max of the finite
    /// values in `parameter`.
    pub fn new(parameter: &[f64], nbins: usize, bin_limits: Option<BinLimits>) -> StatsResult<Self> {
        if nbins == 0 {
            return Err(StatsError::InvalidBinCount);
        }
        let limits = match bin_limits {
            Some(limits) => limits,
            None => BinLimits::from_data(parameter)?,
        };
        Self::with_limits(nbins, limits)
    }

    /// Bin an explicit range
    pub fn with_limits(nbins: usize, limits: BinLimits) -> StatsResult<Self> {
        if nbins == 0 {
            return Err(StatsError::InvalidBinCount);
        }
        limits.validate()?;

        let step = limits.range() / nbins as f64;
        let mut edges: Vec<f64> = (0..nbins).map(|i| limits.min + i as f64 * step).collect();
        edges.push(limits.max);

        // Ranges only a few ULPs wide cannot hold nbins distinct edges
        if !edges.windows(2).all(|e| e[0] < e[1]) {
            return Err(StatsError::DegenerateRange {
                min: limits.min,
                max: limits.max,
            });
        }

        let centers = edges.windows(2).map(|e| (e[0] + e[1]) * 0.5).collect();

        Ok(Self { edges, centers })
    }

    /// Number of bins
    pub fn nbins(&self) -> usize {
        self.centers.len()
    }

    /// Width shared by every bin
    pub fn bin_width(&self) -> f64 {
        (self.max() - self.min()) / self.nbins() as f64
    }

    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Index of the bin containing `x`, or `None` if `x` is outside the
    /// limits or not finite
    pub fn locate(&self, x: f64) -> Option<usize> {
        if !x.is_finite() || x < self.min() || x > self.max() {
            return None;
        }
        let last = self.nbins() - 1;
        if x == self.max() {
            return Some(last);
        }

        // Arithmetic guess, then correct against the stored edges so that
        // rounding never disagrees with edge membership.
        let mut idx = (((x - self.min()) / self.bin_width()) as usize).min(last);
        if x < self.edges[idx] {
            idx -= 1;
        } else if idx < last && x >= self.edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }

    /// Index of the bin containing `x`, folding values outside the limits
    /// into the nearest edge bin. Returns `None` only for NaN.
    pub fn locate_clamped(&self, x: f64) -> Option<usize> {
        if x.is_nan() {
            None
        } else if x <= self.min() {
            Some(0)
        } else if x >= self.max() {
            Some(self.nbins() - 1)
        } else {
            self.locate(x)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binning_shape() {
        let binning = Binning::with_limits(5, BinLimits::new(0.0, 10.0)).unwrap();
        assert_eq!(binning.nbins(), 5);
        assert_eq!(binning.edges, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(binning.centers, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
        assert!((binning.bin_width() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_binning_from_data() {
        let data = vec![3.0, -1.0, f64::NAN, 7.0];
        let binning = Binning::new(&data, 4, None).unwrap();
        assert_eq!(binning.min(), -1.0);
        assert_eq!(binning.max(), 7.0);
    }

    #[test]
    fn test_binning_errors() {
        assert_eq!(
            Binning::new(&[1.0, 2.0], 0, None),
            Err(StatsError::InvalidBinCount)
        );
        assert!(matches!(
            Binning::new(&[2.0, 2.0], 10, None),
            Err(StatsError::DegenerateRange { .. })
        ));
        assert!(matches!(
            Binning::with_limits(10, BinLimits::new(5.0, 1.0)),
            Err(StatsError::DegenerateRange { .. })
        ));
        assert_eq!(Binning::new(&[], 10, None), Err(StatsError::EmptySample));
    }

    #[test]
    fn test_binning_overflowing_range() {
        assert_eq!(
            Binning::new(&[-1e308, 0.0, 1e308], 4, None),
            Err(StatsError::DegenerateRange {
                min: -1e308,
                max: 1e308
            })
        );
    }

    #[test]
    fn test_binning_range_too_narrow_for_bins() {
        let limits = BinLimits::new(1.0, 1.0 + 4.0 * f64::EPSILON);
        assert!(matches!(
            Binning::with_limits(10, limits),
            Err(StatsError::DegenerateRange { .. })
        ));
        // The same range still splits into a couple of bins
        let binning = Binning::with_limits(2, limits).unwrap();
        assert!(binning.edges.windows(2).all(|e| e[0] < e[1]));
    }

    #[test]
    fn test_locate_boundaries() {
        let binning = Binning::with_limits(5, BinLimits::new(0.0, 10.0)).unwrap();
        assert_eq!(binning.locate(0.0), Some(0));
        // Interior edges belong to the upper bin
        assert_eq!(binning.locate(2.0), Some(1));
        assert_eq!(binning.locate(1.999), Some(0));
        // The upper limit belongs to the last bin
        assert_eq!(binning.locate(10.0), Some(4));
        assert_eq!(binning.locate(10.5), None);
        assert_eq!(binning.locate(-0.1), None);
        assert_eq!(binning.locate(f64::NAN), None);
    }

    #[test]
    fn test_locate_clamped() {
        let binning = Binning::with_limits(4, BinLimits::new(0.0, 1.0)).unwrap();
        assert_eq!(binning.locate_clamped(-100.0), Some(0));
        assert_eq!(binning.locate_clamped(100.0), Some(3));
        assert_eq!(binning.locate_clamped(f64::INFINITY), Some(3));
        assert_eq!(binning.locate_clamped(0.5), Some(2));
        assert_eq!(binning.locate_clamped(f64::NAN), None);
    }

    #[test]
    fn test_binning_deterministic() {
        let data: Vec<f64> = (0..100).map(|i| (i as f64 * 0.37).sin()).collect();
        let a = Binning::new(&data, 17, None).unwrap();
        let b = Binning::new(&data, 17, None).unwrap();
        assert_eq!(a, b);
    }
}
