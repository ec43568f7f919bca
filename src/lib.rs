#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;

mod error;
pub use error::{InvalidInput, Result, StatsError};

mod window_buffer;
pub use window_buffer::{Iter, WindowBuffer};

mod min_max;
pub use min_max::MinMaxTracker;

mod median;
pub use median::MedianTracker;

mod regression;
pub use regression::{LinearFit, RegressionTracker};

mod snapshot;
pub use snapshot::{Snapshot, StatType};

mod engine;
pub use engine::{DEFAULT_WINDOW_SIZE, StatsEngine};

mod feature;
pub use feature::{Analyzer, FeatureReading, FeatureTracker};
