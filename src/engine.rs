use core::num::NonZeroUsize;

use log::{debug, trace};

use crate::{
    LinearFit, MedianTracker, MinMaxTracker, RegressionTracker, Result, Snapshot, StatsError,
    WindowBuffer, window_buffer::Iter,
};

/// Window size used by [`StatsEngine::default`]
pub const DEFAULT_WINDOW_SIZE: usize = 500;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_WINDOW_SIZE) {
    Some(capacity) => capacity,
    None => panic!("default window size must be non-zero"),
};

/// Divisor applied to the standard deviation when scoring a sample.
///
/// Compresses typical scores into roughly `[-1, 1]`.
const Z_SCORE_SCALE: f64 = 2.5;

/// Streaming statistics over a sliding window of scalar samples.
///
/// Each call to [`StatsEngine::update`] appends one sample, evicts the oldest
/// once the window is full, and returns a [`Snapshot`] of the window: rank
/// statistics (min, max, median), moments (mean, standard deviation, scaled
/// z-score), min-max normalization of the new sample, and a least-squares
/// trend over window positions.
///
/// One engine is meant to follow one feature. Engines share nothing, so
/// independent engines may run on separate threads; a single engine needs
/// external synchronization to be shared.
///
/// # Examples
///
/// ```
/// # use spectral_stats::StatsEngine;
/// let mut engine = StatsEngine::new(3).unwrap();
/// for v in [100.0, 50.0, 75.0] {
///     engine.update(v).unwrap();
/// }
/// let stats = engine.update(60.0).unwrap();
/// assert_eq!(stats.min, 50.0);
/// assert_eq!(stats.max, 75.0);
/// assert_eq!(stats.median, 60.0);
/// ```
#[derive(Debug, Clone)]
pub struct StatsEngine {
    /// Live samples with running sums
    window: WindowBuffer,
    /// Window extremes
    extremes: MinMaxTracker,
    /// Window median
    median: MedianTracker,
    /// Window trend
    regression: RegressionTracker,
}

impl StatsEngine {
    /// Creates a new engine following the last `window_size` samples.
    ///
    /// # Errors
    ///
    /// * [`crate::StatsError::InvalidInput`] if `window_size` is zero
    pub fn new(window_size: usize) -> Result<Self> {
        NonZeroUsize::new(window_size)
            .map(Self::with_capacity)
            .ok_or_else(|| {
                debug!("stats engine: rejected window size {window_size}");
                StatsError::zero_window()
            })
    }

    fn with_capacity(capacity: NonZeroUsize) -> Self {
        debug!("stats engine created with window of {capacity}");
        Self {
            window: WindowBuffer::with_capacity(capacity),
            extremes: MinMaxTracker::new(capacity.get()),
            median: MedianTracker::new(capacity.get()),
            regression: RegressionTracker::new(),
        }
    }

    /// Feeds one sample and returns the statistics of the resulting window.
    ///
    /// # Arguments
    ///
    /// * `value` - The new sample
    ///
    /// # Errors
    ///
    /// * [`crate::StatsError::InvalidInput`] if `value` is NaN or infinite;
    ///   the engine is left exactly as it was
    pub fn update(&mut self, value: f64) -> Result<Snapshot> {
        let evicted = self
            .window
            .push(value)
            .inspect_err(|err| debug!("stats engine: {err}"))?;

        if let Some(evicted) = evicted {
            trace!("stats engine: evicting {evicted}");
            self.extremes.evict(evicted);
            self.median.remove(evicted);
        }
        self.extremes.push(value);
        self.median.insert(value);

        Ok(self.snapshot(value))
    }

    /// Assembles the snapshot for the sample just pushed
    fn snapshot(&mut self, value: f64) -> Snapshot {
        let mean = self.window.mean().unwrap_or(value);
        let variance = self.window.variance().unwrap_or(0.0);
        let min = self.extremes.min().unwrap_or(value);
        let max = self.extremes.max().unwrap_or(value);
        let LinearFit {
            slope,
            intercept,
            r_squared,
        } = self.regression.fit(self.window.iter());

        if min == max {
            return Snapshot {
                current: value,
                mean,
                median: value,
                standard_deviation: 0.0,
                z_score: 1.0,
                normalized: 0.5,
                min,
                max,
                slope,
                intercept,
                r_squared,
            };
        }

        let standard_deviation = variance.sqrt();
        let z_score = if standard_deviation > 0.0 {
            (value - mean) / (standard_deviation * Z_SCORE_SCALE)
        } else {
            0.0
        };

        Snapshot {
            current: value,
            mean,
            median: self.median.median().unwrap_or(value),
            standard_deviation,
            z_score,
            normalized: (value - min) / (max - min),
            min,
            max,
            slope,
            intercept,
            r_squared,
        }
    }

    /// Rebuilds the running sums from the live window, could be called to
    /// avoid prolonged compounding of floating rounding errors
    pub fn recompute(&mut self) -> &mut Self {
        trace!("stats engine: recomputing sums over {} samples", self.window.len());
        self.window.recompute();
        self
    }

    /// Clears the window and every tracker
    pub fn reset(&mut self) -> &mut Self {
        self.window.reset();
        self.extremes.reset();
        self.median.reset();
        self.regression.reset();
        self
    }

    /// Returns the live samples, oldest first
    pub fn window(&self) -> Iter<'_> {
        self.window.iter()
    }

    /// Returns the number of live samples
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if no sample is live
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Returns `true` once the window holds `capacity` samples
    #[inline]
    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Returns the window size
    #[inline]
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }
}

impl Default for StatsEngine {
    /// An engine over the last [`DEFAULT_WINDOW_SIZE`] samples
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
