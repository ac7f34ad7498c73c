use super::PartitionError;

/// Standard-deviation cutoff used when none is given.
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// Configuration parameters for quadtree construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionConfig {
    /// A block splits when any channel's standard deviation exceeds this.
    pub threshold: f64,
    /// Answer region statistics from summed-area tables instead of
    /// rescanning pixels at every node.
    pub integral_stats: bool,
}

impl PartitionConfig {
    /// Construct a configuration with the given threshold.
    pub fn new(threshold: f64) -> Result<Self, PartitionError> {
        validate_threshold(threshold)?;
        Ok(Self {
            threshold,
            integral_stats: true,
        })
    }

    /// Toggle summed-area statistics.
    pub fn with_integral_stats(mut self, enabled: bool) -> Self {
        self.integral_stats = enabled;
        self
    }
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            integral_stats: true,
        }
    }
}

/// Thresholds must be finite and non-negative.
pub(crate) fn validate_threshold(threshold: f64) -> Result<(), PartitionError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(PartitionError::InvalidThreshold(threshold));
    }
    Ok(())
}
