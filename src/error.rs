use thiserror::Error;

/// The contract violation behind a rejected call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidInput {
    /// A sample was NaN or infinite
    NonFiniteSample(f64),
    /// A window was requested with zero capacity
    ZeroWindow,
}

impl core::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidInput::NonFiniteSample(v) => write!(f, "sample must be finite, got {v}"),
            InvalidInput::ZeroWindow => write!(f, "window size must be at least 1"),
        }
    }
}

/// Error type for every fallible operation in this crate.
///
/// All errors are input-contract violations: retrying with the same input
/// fails the same way, and the state of the rejecting structure is left
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    /// Invalid input provided to a constructor or an update
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInput),
}

impl StatsError {
    /// Creates the error for a NaN or infinite sample
    pub const fn non_finite(value: f64) -> Self {
        Self::InvalidInput(InvalidInput::NonFiniteSample(value))
    }

    /// Creates the error for a zero-sized window
    pub const fn zero_window() -> Self {
        Self::InvalidInput(InvalidInput::ZeroWindow)
    }
}

/// Result type alias using [`StatsError`]
pub type Result<T> = core::result::Result<T, StatsError>;

/// Rejects NaN and infinities
#[inline]
pub(crate) fn ensure_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::non_finite(value))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5), Ok(1.5));
        assert_eq!(ensure_finite(-0.0), Ok(-0.0));
        assert_eq!(
            ensure_finite(f64::INFINITY),
            Err(StatsError::non_finite(f64::INFINITY))
        );
        assert!(ensure_finite(f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        let err = StatsError::zero_window();
        assert_eq!(
            err.to_string(),
            "invalid input: window size must be at least 1"
        );
        let err = StatsError::non_finite(f64::NEG_INFINITY);
        assert_eq!(err.to_string(), "invalid input: sample must be finite, got -inf");
    }
}
