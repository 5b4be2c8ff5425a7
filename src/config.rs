//! Construction and query settings for a [`Wavefan`](crate::Wavefan).

use serde::{Deserialize, Serialize};

/// How wave edges are checked for mutual ordering at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Reject NaN speeds and edges that step backwards in ξ.
    #[default]
    Strict,
    /// Accept any speeds. Out-of-order edges are logged and classified by
    /// counting, which matches unvalidated region tables exactly.
    Unchecked,
}

/// Settings for building and querying a wavefan.
///
/// # Example
///
/// ```
/// use wavefan::{OrderingPolicy, WavefanConfig};
///
/// let config = WavefanConfig::default()
///     .with_tolerance(1e-12)
///     .with_parallel_threshold(1 << 14);
///
/// assert_eq!(config.ordering, OrderingPolicy::Strict);
/// assert_eq!(config.tolerance, 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavefanConfig {
    /// Edge ordering check applied at construction.
    /// Default: [`OrderingPolicy::Strict`]
    pub ordering: OrderingPolicy,

    /// Slack allowed when an edge precedes the previous one (strict mode).
    /// Absorbs round-off from the upstream solver. Negative and NaN values
    /// act as zero.
    /// Default: 0.0
    pub tolerance: f64,

    /// Minimum batch length for the parallel query path.
    /// Default: 4096
    pub parallel_threshold: usize,
}

impl Default for WavefanConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingPolicy::Strict,
            tolerance: 0.0,
            parallel_threshold: 4096,
        }
    }
}

impl WavefanConfig {
    /// Configuration reproducing unvalidated construction.
    pub fn unchecked() -> Self {
        Self::default().with_ordering(OrderingPolicy::Unchecked)
    }

    /// Set the ordering policy.
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Set the ordering tolerance. Negative values are treated as zero.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Set the minimum batch length for the parallel query path.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether construction rejects out-of-order edges.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.ordering == OrderingPolicy::Strict
    }
}
