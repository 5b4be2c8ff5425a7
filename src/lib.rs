//! # wavefan
//!
//! Exact self-similar solutions of one-dimensional Riemann problems.
//!
//! An upstream Riemann solver determines the constant states and the waves
//! separating them. This crate assembles them into a piecewise lookup over
//! the similarity variable ξ = x/t and answers point and batch queries:
//! - Wave descriptions (shock, contact discontinuity, rarefaction fan)
//! - Region tables with right-biased classification at wave edges
//! - Point, batch, physical-coordinate and parallel queries
//! - Fields-of-arrays aggregation of batch results
//! - Ordering validation with a strict default and an unchecked mode
//!
//! # Example
//!
//! ```
//! use wavefan::{ShallowWaterState, Wave, Wavefan};
//!
//! // Dam break: left-going rarefaction, right-going shock
//! let left = ShallowWaterState::new(2.0, 0.0);
//! let star = ShallowWaterState::new(1.5, 0.8);
//! let right = ShallowWaterState::new(1.0, 0.0);
//!
//! let fan = Wavefan::new(
//!     vec![left, star, right],
//!     vec![
//!         Wave::rarefaction(-1.5, -0.5, |xi| {
//!             let w = xi + 1.5;
//!             ShallowWaterState::new(2.0 - 0.5 * w, 0.8 * w)
//!         }),
//!         Wave::shock(1.2),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(fan.state(-2.0).unwrap(), left);
//! assert_eq!(fan.state(-1.0).unwrap(), ShallowWaterState::new(1.75, 0.4));
//! assert_eq!(fan.state(1.2).unwrap(), right);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod region;
pub mod state;
pub mod wave;
pub mod wavefan;

// Re-export main types for convenience
pub use batch::{BatchStates, FieldTable, aggregate};
pub use config::{OrderingPolicy, WavefanConfig};
pub use error::{BoxedError, ConfigurationError, EvaluationError, WavefanError};
pub use region::{
    Evaluator, OrderingReport, OrderingViolation, Region, RegionKind, RegionTable,
    build_region_table, format_ordering_warning, validate_ordering,
};
pub use state::{PrimitiveState, ShallowWaterState, StateSchema};
pub use wave::{InteriorFn, Rarefaction, Wave, WaveKind, WaveRecord};
pub use wavefan::Wavefan;
