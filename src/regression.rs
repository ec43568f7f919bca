use crate::Kbn;

/// Ordinary least-squares line through a window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearFit {
    /// Change in value per window position
    pub slope: f64,
    /// Fitted value at the oldest window position
    pub intercept: f64,
    /// Coefficient of determination of the fit
    pub r_squared: f64,
}

/// Trend of a window, fitted with window position as the independent variable.
///
/// Positions are re-indexed from 0 (oldest) to n-1 (newest) on every fit, so
/// the slope measures the trend inside the current window rather than against
/// an absolute frame counter.
///
/// The position sums follow from the arithmetic series identities
/// `Σi = n(n-1)/2` and `Σi² = n(n-1)(2n-1)/6`; only `Σy` and `Σi·y` depend on
/// the data, and the residuals need a second pass.
#[derive(Debug, Clone, Default)]
pub struct RegressionTracker {
    last: LinearFit,
}

impl RegressionTracker {
    /// Creates a tracker with no fit yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits the samples, oldest first, and stores the result.
    ///
    /// Fewer than two samples, or a degenerate position spread, yield a flat
    /// line through the mean with `r_squared = 0`. A constant window fits
    /// perfectly and reports `r_squared = 1`.
    ///
    /// # Arguments
    ///
    /// * `window` - The live samples in insertion order
    ///
    /// # Returns
    ///
    /// * `LinearFit` - The fitted line
    pub fn fit<'a, I>(&mut self, window: I) -> LinearFit
    where
        I: IntoIterator<Item = &'a f64>,
        I::IntoIter: Clone,
    {
        let values = window.into_iter();

        let mut count = 0usize;
        let mut sum = Kbn::<f64>::default();
        let mut sum_xy = Kbn::<f64>::default();
        for (i, &y) in values.clone().enumerate() {
            count += 1;
            sum += y;
            sum_xy += i as f64 * y;
        }

        let fit = Self::solve(values, count, sum.total(), sum_xy.total());
        self.last = fit;
        fit
    }

    fn solve<'a>(
        values: impl Iterator<Item = &'a f64>,
        count: usize,
        sum: f64,
        sum_xy: f64,
    ) -> LinearFit {
        if count == 0 {
            return LinearFit::default();
        }

        let n = count as f64;
        let mean = sum / n;
        let flat = LinearFit {
            slope: 0.0,
            intercept: mean,
            r_squared: 0.0,
        };
        if count < 2 {
            return flat;
        }

        let sum_x = n * (n - 1.0) / 2.0;
        let sum_xx = n * (n - 1.0) * (2.0 * n - 1.0) / 6.0;
        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            return flat;
        }

        let slope = (n * sum_xy - sum_x * sum) / denominator;
        let intercept = (sum - slope * sum_x) / n;

        let mut ss_res = Kbn::<f64>::default();
        let mut ss_tot = Kbn::<f64>::default();
        for (i, &y) in values.enumerate() {
            let residual = y - (slope * i as f64 + intercept);
            let deviation = y - mean;
            ss_res += residual * residual;
            ss_tot += deviation * deviation;
        }

        let ss_tot = ss_tot.total();
        let r_squared = if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res.total() / ss_tot
        };

        LinearFit {
            slope,
            intercept,
            r_squared,
        }
    }

    /// Returns the most recent fit
    #[inline]
    pub const fn last(&self) -> LinearFit {
        self.last
    }

    /// Forgets the most recent fit
    pub fn reset(&mut self) {
        self.last = LinearFit::default();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_exact_line() {
        let values: Vec<f64> = (0..20).map(|i| 2.0 * i as f64 + 1.0).collect();
        let fit = RegressionTracker::new().fit(&values);
        assert_approx_eq!(fit.slope, 2.0);
        assert_approx_eq!(fit.intercept, 1.0);
        assert_approx_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_descending_line() {
        let fit = RegressionTracker::new().fit(&[10.0, 7.0, 4.0, 1.0]);
        assert_approx_eq!(fit.slope, -3.0);
        assert_approx_eq!(fit.intercept, 10.0);
        assert_approx_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_constant_window() {
        let fit = RegressionTracker::new().fit(&[5.0, 5.0, 5.0]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 5.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_single_sample() {
        let fit = RegressionTracker::new().fit(&[3.5]);
        assert_eq!(
            fit,
            LinearFit {
                slope: 0.0,
                intercept: 3.5,
                r_squared: 0.0
            }
        );
    }

    #[test]
    fn test_empty_window() {
        let empty: [f64; 0] = [];
        let fit = RegressionTracker::new().fit(&empty);
        assert_eq!(fit, LinearFit::default());
    }

    #[test]
    fn test_noisy_data() {
        // y = [1, 3, 2, 5, 4]: slope 0.8, intercept 1.4, r² = 6.4 / 10
        let fit = RegressionTracker::new().fit(&[1.0, 3.0, 2.0, 5.0, 4.0]);
        assert_approx_eq!(fit.slope, 0.8);
        assert_approx_eq!(fit.intercept, 1.4);
        assert_approx_eq!(fit.r_squared, 0.64);
    }

    #[test]
    fn test_last_tracks_most_recent_fit() {
        let mut tracker = RegressionTracker::new();
        assert_eq!(tracker.last(), LinearFit::default());
        tracker.fit(&[0.0, 1.0]);
        assert_approx_eq!(tracker.last().slope, 1.0);
        tracker.reset();
        assert_eq!(tracker.last(), LinearFit::default());
    }
}
