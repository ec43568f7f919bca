use alloc::vec::Vec;

use log::debug;

use crate::{Result, Snapshot, StatsEngine};

/// A per-frame feature extractor.
///
/// Receives the current frame of magnitudes and, after the first frame, the
/// previous one, for features that compare consecutive frames. Any closure
/// `FnMut(&[f64], Option<&[f64]>) -> f64` is an analyzer.
pub trait Analyzer {
    /// Reduces a frame to one scalar descriptor
    fn analyze(&mut self, frame: &[f64], previous: Option<&[f64]>) -> f64;
}

impl<F> Analyzer for F
where
    F: FnMut(&[f64], Option<&[f64]>) -> f64,
{
    #[inline]
    fn analyze(&mut self, frame: &[f64], previous: Option<&[f64]>) -> f64 {
        self(frame, previous)
    }
}

/// The descriptor of one frame together with the window statistics it produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureReading {
    /// Output of the analyzer for the frame
    pub value: f64,
    /// Window statistics after feeding `value`
    pub stats: Snapshot,
}

/// Pairs one [`Analyzer`] with its own [`StatsEngine`].
///
/// The tracker keeps a copy of the last accepted frame and hands it to the
/// analyzer alongside the next one. A frame whose descriptor is NaN or
/// infinite is rejected and leaves both the engine and the remembered frame
/// untouched.
///
/// # Examples
///
/// ```
/// # use spectral_stats::{FeatureTracker, StatsEngine};
/// let energy = |frame: &[f64], _: Option<&[f64]>| {
///     frame.iter().map(|m| m * m).sum::<f64>() / frame.len() as f64
/// };
/// let mut tracker = FeatureTracker::new(energy, StatsEngine::default());
/// let reading = tracker.process(&[0.5, 0.5]).unwrap();
/// assert_eq!(reading.value, 0.25);
/// assert_eq!(reading.stats.mean, 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct FeatureTracker<A> {
    analyzer: A,
    engine: StatsEngine,
    previous_frame: Vec<f64>,
    has_previous: bool,
    last: Option<FeatureReading>,
}

impl<A: Analyzer> FeatureTracker<A> {
    /// Creates a tracker feeding `analyzer` output into `engine`
    pub fn new(analyzer: A, engine: StatsEngine) -> Self {
        Self {
            analyzer,
            engine,
            previous_frame: Vec::new(),
            has_previous: false,
            last: None,
        }
    }

    /// Analyzes one frame and updates the window statistics.
    ///
    /// # Errors
    ///
    /// * [`crate::StatsError::InvalidInput`] if the analyzer output is NaN or
    ///   infinite
    pub fn process(&mut self, frame: &[f64]) -> Result<FeatureReading> {
        let previous = self.has_previous.then_some(self.previous_frame.as_slice());
        let value = self.analyzer.analyze(frame, previous);
        let stats = self
            .engine
            .update(value)
            .inspect_err(|err| debug!("feature tracker: frame dropped, {err}"))?;

        self.previous_frame.clear();
        self.previous_frame.extend_from_slice(frame);
        self.has_previous = true;

        let reading = FeatureReading { value, stats };
        self.last = Some(reading);
        Ok(reading)
    }

    /// Returns the reading of the last accepted frame
    #[inline]
    pub const fn last(&self) -> Option<&FeatureReading> {
        self.last.as_ref()
    }

    /// Returns the engine following this feature
    #[inline]
    pub const fn engine(&self) -> &StatsEngine {
        &self.engine
    }

    /// Forgets the previous frame and clears the engine
    pub fn reset(&mut self) -> &mut Self {
        self.engine.reset();
        self.previous_frame.clear();
        self.has_previous = false;
        self.last = None;
        self
    }
}
