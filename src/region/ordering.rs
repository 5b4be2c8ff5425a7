//! Ordering validation for wave edges.
//!
//! The upstream solver is expected to hand over waves sorted by speed, with
//! rarefaction fans that do not overlap their neighbours. Nothing in the
//! region table depends on that for determinism, but a table built from
//! out-of-order edges may classify ξ into the wrong physical region.
//!
//! Strict construction turns the first violation into a
//! [`ConfigurationError`]; unchecked construction logs the formatted report.

use crate::error::ConfigurationError;
use crate::wave::Wave;

/// A single ordering problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrderingViolation {
    /// A wave edge is NaN.
    InvalidSpeed { wave: usize, value: f64 },
    /// A wave edge lies to the left of the edge before it.
    Backward {
        wave: usize,
        previous: f64,
        current: f64,
    },
}

impl OrderingViolation {
    /// Index of the wave that produced the offending edge.
    pub fn wave(&self) -> usize {
        match *self {
            Self::InvalidSpeed { wave, .. } | Self::Backward { wave, .. } => wave,
        }
    }
}

impl From<OrderingViolation> for ConfigurationError {
    fn from(violation: OrderingViolation) -> Self {
        match violation {
            OrderingViolation::InvalidSpeed { wave, value } => Self::InvalidSpeed { wave, value },
            OrderingViolation::Backward {
                wave,
                previous,
                current,
            } => Self::NonMonotonic {
                wave,
                previous,
                current,
            },
        }
    }
}

/// Result of an ordering check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderingReport {
    /// Violations in wave order.
    pub violations: Vec<OrderingViolation>,
}

impl OrderingReport {
    /// Whether no violation was found.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Convert the first violation into an error.
    pub fn into_result(self) -> Result<(), ConfigurationError> {
        match self.violations.into_iter().next() {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }
}

/// Check that wave edges are non-decreasing from left to right.
///
/// Edges are visited in the order the region table lays them out
/// (a rarefaction contributes its lower then its upper edge). An edge is
/// backwards when it is smaller than the largest edge seen so far by more
/// than `tolerance`. Waves with a NaN speed are reported and skipped.
///
/// Negative and NaN tolerances are treated as zero.
///
/// # Example
///
/// ```
/// use wavefan::{validate_ordering, OrderingViolation, Wave};
///
/// let waves: Vec<Wave<f64>> = vec![Wave::shock(1.0), Wave::contact(0.5)];
/// let report = validate_ordering(&waves, 0.0);
///
/// assert!(!report.is_valid());
/// assert_eq!(
///     report.violations,
///     vec![OrderingViolation::Backward { wave: 1, previous: 1.0, current: 0.5 }]
/// );
/// ```
pub fn validate_ordering<S>(waves: &[Wave<S>], tolerance: f64) -> OrderingReport {
    // f64::max ignores a NaN operand
    let tolerance = tolerance.max(0.0);
    let mut violations = Vec::new();
    let mut previous = f64::NEG_INFINITY;

    for (index, wave) in waves.iter().enumerate() {
        let (head, tail) = match wave {
            Wave::Shock { speed } | Wave::ContactDiscontinuity { speed } => (*speed, *speed),
            Wave::Rarefaction(fan) => (fan.speed_head(), fan.speed_tail()),
        };

        // min/max would hide a NaN head or tail behind the other speed
        if let Some(value) = [head, tail].into_iter().find(|v| v.is_nan()) {
            violations.push(OrderingViolation::InvalidSpeed { wave: index, value });
            continue;
        }

        let (lower, upper) = wave.edges();
        let bounds = [lower, upper];
        let edges = match wave {
            Wave::Rarefaction(_) => &bounds[..],
            Wave::Shock { .. } | Wave::ContactDiscontinuity { .. } => &bounds[..1],
        };

        for &edge in edges {
            if edge < previous - tolerance {
                violations.push(OrderingViolation::Backward {
                    wave: index,
                    previous,
                    current: edge,
                });
            }
            previous = previous.max(edge);
        }
    }

    OrderingReport { violations }
}

/// Format a warning for an unchecked wavefan built from out-of-order waves.
pub fn format_ordering_warning(report: &OrderingReport) -> String {
    let header = format!(
        "wavefan built from {} out-of-order wave edge(s); \
         regions may not match the intended waves:",
        report.violations.len()
    );
    let lines = report.violations.iter().map(|violation| match violation {
        OrderingViolation::InvalidSpeed { wave, value } => {
            format!("  wave {wave}: speed {value} is not a number")
        }
        OrderingViolation::Backward {
            wave,
            previous,
            current,
        } => format!("  wave {wave}: edge {current} lies left of previous edge {previous}"),
    });

    std::iter::once(header).chain(lines).collect::<Vec<_>>().join("\n")
}
