//! The assembled self-similar Riemann solution.
//!
//! A [`Wavefan`] owns the constant states and waves handed over by an
//! upstream Riemann solver, together with the [`RegionTable`] built from
//! them. The table is built eagerly inside the constructor, so a value of
//! this type is always queryable; every query takes `&self` and can run
//! concurrently from several threads.
//!
//! # Example
//!
//! ```
//! use wavefan::{PrimitiveState, Wave, Wavefan};
//!
//! let left = PrimitiveState::new(1.0, 0.0, 1.0);
//! let star = PrimitiveState::new(0.5, 0.9, 0.3);
//! let right = PrimitiveState::new(0.125, 0.0, 0.1);
//!
//! let fan = Wavefan::new(
//!     vec![left, star, right],
//!     vec![Wave::shock(-0.5), Wave::shock(1.75)],
//! )
//! .unwrap();
//!
//! assert_eq!(fan.state(-1.0).unwrap(), left);
//! assert_eq!(fan.state(0.0).unwrap(), star);
//! assert_eq!(fan.state(1.75).unwrap(), right);
//! ```

use std::fmt;

use log::{debug, warn};

use crate::batch::{BatchStates, aggregate};
use crate::config::WavefanConfig;
use crate::error::{ConfigurationError, EvaluationError};
use crate::region::{
    Region, RegionTable, build_region_table, format_ordering_warning, validate_ordering,
};
use crate::state::StateSchema;
use crate::wave::Wave;

/// Exact solution of a one-dimensional Riemann problem as a function of
/// ξ = x/t.
pub struct Wavefan<S> {
    states: Vec<S>,
    waves: Vec<Wave<S>>,
    table: RegionTable<S>,
    config: WavefanConfig,
}

impl<S: Clone> Wavefan<S> {
    /// Assemble a wavefan with default (strict) settings.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::ArityMismatch`] unless
    ///   `states.len() == waves.len() + 1`
    /// - [`ConfigurationError::InvalidSpeed`] for a NaN wave speed
    /// - [`ConfigurationError::NonMonotonic`] when a wave edge lies left of
    ///   the edge before it
    pub fn new(states: Vec<S>, waves: Vec<Wave<S>>) -> Result<Self, ConfigurationError> {
        Self::with_config(states, waves, WavefanConfig::default())
    }

    /// Assemble a wavefan without ordering checks.
    ///
    /// Reproduces unvalidated region tables: any speeds are accepted and
    /// classification counts boundaries, so a query always lands in some
    /// region, though not necessarily the physically intended one. Only the
    /// arity check remains.
    pub fn unchecked(states: Vec<S>, waves: Vec<Wave<S>>) -> Result<Self, ConfigurationError> {
        Self::with_config(states, waves, WavefanConfig::unchecked())
    }

    /// Assemble a wavefan with explicit settings.
    pub fn with_config(
        states: Vec<S>,
        waves: Vec<Wave<S>>,
        config: WavefanConfig,
    ) -> Result<Self, ConfigurationError> {
        let table = build_region_table(&states, &waves)?;

        let report = validate_ordering(&waves, config.tolerance);
        if !report.is_valid() {
            if config.is_strict() {
                report.into_result()?;
            } else {
                warn!("{}", format_ordering_warning(&report));
            }
        }

        debug!(
            "wavefan built: {} states, {} waves, {} regions",
            states.len(),
            waves.len(),
            table.n_regions()
        );

        Ok(Self {
            states,
            waves,
            table,
            config,
        })
    }

    /// State at `xi`.
    ///
    /// A point exactly on a wave edge takes the state to the right of it.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::NanQuery`] for NaN; rarefaction interior failures
    /// are returned unchanged.
    #[inline]
    pub fn state(&self, xi: f64) -> Result<S, EvaluationError> {
        self.table.evaluate(xi)
    }

    /// States at every point of `xis`, in input order.
    ///
    /// Stops at the first failing point and returns its error.
    pub fn state_batch(&self, xis: &[f64]) -> Result<Vec<S>, EvaluationError> {
        xis.iter().map(|&xi| self.state(xi)).collect()
    }

    /// States at physical positions `x` at time `t`, for a discontinuity
    /// initially located at `x0`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::NonPositiveTime`] unless `t > 0`.
    pub fn sample(&self, x0: f64, positions: &[f64], t: f64) -> Result<Vec<S>, EvaluationError> {
        if t.is_nan() || t <= 0.0 {
            return Err(EvaluationError::NonPositiveTime { t });
        }
        positions.iter().map(|&x| self.state((x - x0) / t)).collect()
    }
}

impl<S: Clone + StateSchema> Wavefan<S> {
    /// States at every point of `xis`, restructured into one array per
    /// field when all states share a declared schema.
    ///
    /// Falls back to [`BatchStates::Sequence`] otherwise; see
    /// [`aggregate`](crate::aggregate).
    pub fn state_fields(&self, xis: &[f64]) -> Result<BatchStates<S>, EvaluationError> {
        self.state_batch(xis).map(aggregate)
    }
}

#[cfg(feature = "parallel")]
impl<S: Clone + Send + Sync> Wavefan<S> {
    /// Parallel version of [`state_batch`](Self::state_batch) using Rayon.
    ///
    /// Results are in input order. Batches shorter than
    /// [`WavefanConfig::parallel_threshold`] run sequentially.
    pub fn state_batch_parallel(&self, xis: &[f64]) -> Result<Vec<S>, EvaluationError> {
        use rayon::prelude::*;

        if xis.len() < self.config.parallel_threshold {
            return self.state_batch(xis);
        }
        xis.par_iter().map(|&xi| self.state(xi)).collect()
    }
}

impl<S> Wavefan<S> {
    /// Constant states, left to right.
    #[inline]
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Waves, left to right.
    #[inline]
    pub fn waves(&self) -> &[Wave<S>] {
        &self.waves
    }

    /// The region table built at construction.
    #[inline]
    pub fn table(&self) -> &RegionTable<S> {
        &self.table
    }

    /// Region boundaries, including the `±∞` sentinels.
    #[inline]
    pub fn boundaries(&self) -> &[f64] {
        self.table.boundaries()
    }

    /// Settings the wavefan was built with.
    #[inline]
    pub fn config(&self) -> &WavefanConfig {
        &self.config
    }

    /// Number of regions.
    #[inline]
    pub fn n_regions(&self) -> usize {
        self.table.n_regions()
    }

    /// Region containing `xi`, or `None` for NaN.
    pub fn region_at(&self, xi: f64) -> Option<Region> {
        self.table.region_at(xi)
    }

    /// Largest absolute wave speed, or 0 without waves.
    ///
    /// Bounds the signal speed for CFL time step estimates.
    pub fn max_signal_speed(&self) -> f64 {
        self.waves
            .iter()
            .map(Wave::max_abs_speed)
            .fold(0.0, f64::max)
    }
}

impl<S: fmt::Debug> fmt::Display for Wavefan<S> {
    /// One line per element: `state 0`, `wave 0`, `state 1`, ... in
    /// construction order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                writeln!(f, "wave {}: {}", i - 1, self.waves[i - 1])?;
            }
            writeln!(f, "state {i}: {state:?}")?;
        }
        Ok(())
    }
}

impl<S: fmt::Debug> fmt::Debug for Wavefan<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wavefan")
            .field("states", &self.states)
            .field("waves", &self.waves)
            .field("boundaries", &self.table.boundaries())
            .field("config", &self.config)
            .finish()
    }
}
