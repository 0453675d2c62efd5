//! Intensity histograms
//!
//! Equal-width histograms over raw channel samples, plus the usual summary
//! statistics. All statistics are in the x-domain of the histogram, not bin
//! indices: the x-value for bin i is `start + i * delta`.

use crate::error::{Error, Result};
use crate::plane::Plane;

/// Statistics computed from a histogram
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HistogramStats {
    /// Mean value (weighted average)
    pub mean: f32,
    /// Median value (50th percentile)
    pub median: f32,
    /// Mode value (most frequent)
    pub mode: f32,
    /// Variance
    pub variance: f32,
}

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    start: f32,
    delta: f32,
    counts: Vec<f32>,
}

impl Histogram {
    /// Create an empty histogram with `nbins` bins of width `delta`
    /// starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `nbins` is 0 or `delta` is not
    /// a positive finite number.
    pub fn new(start: f32, delta: f32, nbins: usize) -> Result<Self> {
        if nbins == 0 {
            return Err(Error::InvalidParameter("histogram needs bins".to_string()));
        }
        if !(delta.is_finite() && delta > 0.0) || !start.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "invalid histogram binning: start {start}, delta {delta}"
            )));
        }
        Ok(Histogram {
            start,
            delta,
            counts: vec![0.0; nbins],
        })
    }

    /// Histogram of every sample of a plane.
    ///
    /// Samples outside `[start, start + nbins * delta)` and NaN samples are
    /// not counted.
    pub fn from_plane(plane: &Plane, start: f32, delta: f32, nbins: usize) -> Result<Self> {
        let mut hist = Self::new(start, delta, nbins)?;
        for &v in plane.data() {
            hist.add(v);
        }
        Ok(hist)
    }

    /// Count one sample; returns false if it falls outside the bins.
    pub fn add(&mut self, value: f32) -> bool {
        if value.is_nan() || value < self.start {
            return false;
        }
        let bin = ((value - self.start) / self.delta).floor() as usize;
        match self.counts.get_mut(bin) {
            Some(c) => {
                *c += 1.0;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn counts(&self) -> &[f32] {
        &self.counts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Left edge of bin `i`
    #[inline]
    pub fn bin_start(&self, i: usize) -> f32 {
        self.start + i as f32 * self.delta
    }

    /// Sum of all counts
    pub fn total(&self) -> f32 {
        self.counts.iter().sum()
    }

    /// Get statistical measures of the histogram.
    ///
    /// Returns `None` if nothing has been counted.
    pub fn stats(&self) -> Option<HistogramStats> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }

        let mut sum = 0.0f64;
        let mut mode_idx = 0;
        for (i, &c) in self.counts.iter().enumerate() {
            sum += f64::from(c) * f64::from(self.bin_start(i));
            if c > self.counts[mode_idx] {
                mode_idx = i;
            }
        }
        let mean = sum / f64::from(total);

        let variance = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let d = f64::from(self.bin_start(i)) - mean;
                f64::from(c) * d * d
            })
            .sum::<f64>()
            / f64::from(total);

        let half = total / 2.0;
        let mut acc = 0.0;
        let mut median_idx = self.counts.len() - 1;
        for (i, &c) in self.counts.iter().enumerate() {
            acc += c;
            if acc >= half {
                median_idx = i;
                break;
            }
        }

        Some(HistogramStats {
            mean: mean as f32,
            median: self.bin_start(median_idx),
            mode: self.bin_start(mode_idx),
            variance: variance as f32,
        })
    }

    /// Histogram scaled so that the counts sum to 1.0.
    ///
    /// Returns `None` if nothing has been counted.
    pub fn normalized(&self) -> Option<Histogram> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        Some(Histogram {
            start: self.start,
            delta: self.delta,
            counts: self.counts.iter().map(|c| c / total).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_binning() {
        assert!(Histogram::new(0.0, 100.0, 0).is_err());
        assert!(Histogram::new(0.0, 0.0, 10).is_err());
        assert!(Histogram::new(0.0, f32::NAN, 10).is_err());
    }

    #[test]
    fn test_add_binning() {
        let mut h = Histogram::new(0.0, 100.0, 3).unwrap();
        assert!(h.add(0.0));
        assert!(h.add(99.9));
        assert!(h.add(100.0));
        assert!(h.add(299.0));
        assert!(!h.add(300.0));
        assert!(!h.add(-1.0));
        assert!(!h.add(f32::NAN));
        assert_eq!(h.counts(), &[2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_stats() {
        let mut h = Histogram::new(0.0, 10.0, 4).unwrap();
        for v in [0.0, 10.0, 10.0, 30.0] {
            h.add(v);
        }
        let s = h.stats().unwrap();
        assert_eq!(s.mean, 12.5);
        assert_eq!(s.mode, 10.0);
        assert_eq!(s.median, 10.0);
        // ((12.5)^2 + 2*(2.5)^2 + (17.5)^2) / 4
        assert!((s.variance - 118.75).abs() < 1e-4);
    }

    #[test]
    fn test_stats_empty() {
        let h = Histogram::new(0.0, 1.0, 4).unwrap();
        assert!(h.stats().is_none());
        assert!(h.normalized().is_none());
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let plane = Plane::from_data(4, 1, vec![1.0, 2.0, 2.0, 3.0]).unwrap();
        let h = Histogram::from_plane(&plane, 0.0, 1.0, 4).unwrap();
        let n = h.normalized().unwrap();
        assert!((n.total() - 1.0).abs() < 1e-6);
        assert_eq!(n.counts()[2], 0.5);
    }
}
