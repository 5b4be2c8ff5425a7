//! Piecewise region tables over the similarity variable ξ = x/t.
//!
//! A [`RegionTable`] holds an ordered list of boundaries bracketed by `-∞`
//! and `+∞`, and one [`Evaluator`] per gap between consecutive boundaries:
//!
//! ```text
//!   -inf        s_1        lo       hi        s_3        +inf
//!    |  const(L)  |  const(M) |   fan   | const(N) | const(R) |
//! ```
//!
//! Regions are half-open, `[lower, upper)`: a query landing exactly on a
//! boundary resolves to the region to its right.
//!
//! - [`build_region_table`]: assemble a table from states and waves
//! - [`validate_ordering`]: check that wave edges never step backwards

mod builder;
mod ordering;

use std::fmt;

pub use builder::build_region_table;
pub use ordering::{OrderingReport, OrderingViolation, format_ordering_warning, validate_ordering};

use crate::error::EvaluationError;
use crate::wave::InteriorFn;

// =============================================================================
// Evaluators
// =============================================================================

/// Kind of state produced over a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// A constant state.
    Constant,
    /// The continuous interior of a rarefaction fan.
    Fan,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => f.write_str("constant"),
            Self::Fan => f.write_str("fan"),
        }
    }
}

/// One-argument state evaluator for a region.
pub enum Evaluator<S> {
    /// Returns the same state for every ξ.
    Constant(S),
    /// Delegates to a rarefaction interior function.
    Fan(InteriorFn<S>),
}

impl<S> Evaluator<S> {
    /// Kind of region this evaluator serves.
    #[inline]
    pub fn kind(&self) -> RegionKind {
        match self {
            Self::Constant(_) => RegionKind::Constant,
            Self::Fan(_) => RegionKind::Fan,
        }
    }

    /// The constant state, if this is a constant evaluator.
    #[inline]
    pub fn as_constant(&self) -> Option<&S> {
        match self {
            Self::Constant(state) => Some(state),
            Self::Fan(_) => None,
        }
    }

    /// Whether this evaluator delegates to `interior`.
    pub fn is_fan_of(&self, interior: &InteriorFn<S>) -> bool {
        match self {
            Self::Fan(f) => std::sync::Arc::ptr_eq(f, interior),
            Self::Constant(_) => false,
        }
    }
}

impl<S: Clone> Evaluator<S> {
    /// Evaluate the state at `xi`.
    #[inline]
    pub fn evaluate(&self, xi: f64) -> Result<S, EvaluationError> {
        match self {
            Self::Constant(state) => Ok(state.clone()),
            Self::Fan(interior) => interior(xi),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Evaluator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(state) => f.debug_tuple("Constant").field(state).finish(),
            Self::Fan(_) => f.write_str("Fan(..)"),
        }
    }
}

// =============================================================================
// Regions
// =============================================================================

/// A single region of a table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Position in the table, counted from the left.
    pub index: usize,
    /// Lower edge (inclusive).
    pub lower: f64,
    /// Upper edge (exclusive).
    pub upper: f64,
    /// Kind of state produced here.
    pub kind: RegionKind,
}

impl Region {
    /// Width of the region in ξ. Infinite for the outermost regions.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `xi` lies in `[lower, upper)`.
    ///
    /// The last region also contains `+∞`, matching
    /// [`RegionTable::classify`].
    #[inline]
    pub fn contains(&self, xi: f64) -> bool {
        xi >= self.lower && (xi < self.upper || (xi == f64::INFINITY && self.upper == xi))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "region {}: [{}, {}) {}",
            self.index, self.lower, self.upper, self.kind
        )
    }
}

// =============================================================================
// Region table
// =============================================================================

/// Boundaries and aligned evaluators classifying ξ into regions.
///
/// Invariant: `evaluators.len() == boundaries.len() - 1`, with
/// `boundaries[0] == -∞` and `boundaries[last] == +∞`. Built by
/// [`build_region_table`] and immutable afterwards.
pub struct RegionTable<S> {
    boundaries: Vec<f64>,
    evaluators: Vec<Evaluator<S>>,
    sorted: bool,
}

impl<S> RegionTable<S> {
    pub(crate) fn from_parts(boundaries: Vec<f64>, evaluators: Vec<Evaluator<S>>) -> Self {
        debug_assert_eq!(evaluators.len() + 1, boundaries.len());
        let sorted = boundaries.windows(2).all(|w| w[0] <= w[1]);
        Self {
            boundaries,
            evaluators,
            sorted,
        }
    }

    /// Region boundaries, including the `±∞` sentinels.
    #[inline]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Region evaluators, one per region.
    #[inline]
    pub fn evaluators(&self) -> &[Evaluator<S>] {
        &self.evaluators
    }

    /// Number of regions.
    #[inline]
    pub fn n_regions(&self) -> usize {
        self.evaluators.len()
    }

    /// Whether boundaries are non-decreasing (no NaN, no backward steps).
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Index of the region containing `xi`.
    ///
    /// Counts the boundaries `<= xi`, so a point on a boundary belongs to the
    /// region to its right. `+∞` is clamped into the last region. Returns
    /// `None` for NaN.
    ///
    /// Sorted tables use a binary search. Unsorted tables (accepted only in
    /// unchecked mode) count linearly, which still yields a deterministic
    /// region that may not be the physically intended one.
    pub fn classify(&self, xi: f64) -> Option<usize> {
        if xi.is_nan() {
            return None;
        }

        let at_or_below = if self.sorted {
            self.boundaries.partition_point(|&b| b <= xi)
        } else {
            self.boundaries.iter().filter(|&&b| b <= xi).count()
        };

        // The -inf sentinel is always counted for non-NaN xi
        Some(at_or_below.saturating_sub(1).min(self.n_regions() - 1))
    }

    /// Region at `index`.
    pub fn region(&self, index: usize) -> Option<Region> {
        let evaluator = self.evaluators.get(index)?;
        Some(Region {
            index,
            lower: self.boundaries[index],
            upper: self.boundaries[index + 1],
            kind: evaluator.kind(),
        })
    }

    /// Region containing `xi`, or `None` for NaN.
    pub fn region_at(&self, xi: f64) -> Option<Region> {
        self.classify(xi).and_then(|index| self.region(index))
    }

    /// Iterate over all regions from left to right.
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        (0..self.n_regions()).filter_map(move |index| self.region(index))
    }
}

impl<S: Clone> RegionTable<S> {
    /// Evaluate the state at `xi`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::NanQuery`] for NaN; otherwise whatever the region's
    /// interior function returns.
    pub fn evaluate(&self, xi: f64) -> Result<S, EvaluationError> {
        let index = self.classify(xi).ok_or(EvaluationError::NanQuery)?;
        self.evaluators[index].evaluate(xi)
    }
}

impl<S> fmt::Display for RegionTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in self.regions() {
            writeln!(f, "{region}")?;
        }
        Ok(())
    }
}

impl<S: fmt::Debug> fmt::Debug for RegionTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionTable")
            .field("boundaries", &self.boundaries)
            .field("evaluators", &self.evaluators)
            .field("sorted", &self.sorted)
            .finish()
    }
}
