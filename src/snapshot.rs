/// The statistics published for every update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatType {
    /// Position of the sample between the window extremes, in `[0, 1]`
    Normalized,
    /// Arithmetic mean of the window
    Mean,
    /// Median of the window
    Median,
    /// Population standard deviation of the window
    StandardDeviation,
    /// Deviation of the sample from the mean, in units of 2.5 standard deviations
    ZScore,
    /// Smallest sample in the window
    Min,
    /// Largest sample in the window
    Max,
    /// Trend of the window per position
    Slope,
    /// Fitted value at the oldest window position
    Intercept,
    /// Goodness of the linear fit
    RSquared,
}

impl StatType {
    /// Every statistic, in publication order
    pub const ALL: [StatType; 10] = [
        StatType::Normalized,
        StatType::Mean,
        StatType::Median,
        StatType::StandardDeviation,
        StatType::ZScore,
        StatType::Min,
        StatType::Max,
        StatType::Slope,
        StatType::Intercept,
        StatType::RSquared,
    ];

    /// Returns the stable, camel-cased name of the statistic
    pub const fn name(self) -> &'static str {
        match self {
            StatType::Normalized => "normalized",
            StatType::Mean => "mean",
            StatType::Median => "median",
            StatType::StandardDeviation => "standardDeviation",
            StatType::ZScore => "zScore",
            StatType::Min => "min",
            StatType::Max => "max",
            StatType::Slope => "slope",
            StatType::Intercept => "intercept",
            StatType::RSquared => "rSquared",
        }
    }

    /// Looks a statistic up by its stable name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.name() == name)
    }
}

impl core::fmt::Display for StatType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Composite statistics of a window, produced by one update
///
/// A snapshot is a plain value: it is recomputed on every update and never
/// shared with the engine that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    /// The sample that produced this snapshot
    pub current: f64,
    /// Arithmetic mean of the window
    pub mean: f64,
    /// Median of the window
    pub median: f64,
    /// Population standard deviation of the window
    pub standard_deviation: f64,
    /// `(current - mean) / (standard_deviation * 2.5)`
    pub z_score: f64,
    /// `(current - min) / (max - min)`, or 0.5 when the window is flat
    pub normalized: f64,
    /// Smallest sample in the window
    pub min: f64,
    /// Largest sample in the window
    pub max: f64,
    /// Least-squares slope over window positions
    pub slope: f64,
    /// Least-squares intercept at the oldest window position
    pub intercept: f64,
    /// Coefficient of determination of the fit
    pub r_squared: f64,
}

impl Snapshot {
    /// Returns the value of one statistic
    pub const fn get(&self, stat: StatType) -> f64 {
        match stat {
            StatType::Normalized => self.normalized,
            StatType::Mean => self.mean,
            StatType::Median => self.median,
            StatType::StandardDeviation => self.standard_deviation,
            StatType::ZScore => self.z_score,
            StatType::Min => self.min,
            StatType::Max => self.max,
            StatType::Slope => self.slope,
            StatType::Intercept => self.intercept,
            StatType::RSquared => self.r_squared,
        }
    }

    /// Returns every statistic paired with its type, in publication order
    pub fn iter(&self) -> impl Iterator<Item = (StatType, f64)> + '_ {
        StatType::ALL.into_iter().map(|stat| (stat, self.get(stat)))
    }
}
