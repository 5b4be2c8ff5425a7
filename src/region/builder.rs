//! Region table assembly from an interleaved states/waves sequence.

use std::sync::Arc;

use super::{Evaluator, RegionTable};
use crate::error::ConfigurationError;
use crate::wave::Wave;

/// Build the region table for `states` separated by `waves`.
///
/// Discontinuities contribute one boundary at their speed. Rarefactions
/// contribute their lower edge, a fan evaluator, and their upper edge. Every
/// wave is followed by the constant evaluator of the state to its right.
///
/// Wave speeds are taken as given; ordering checks live in
/// [`validate_ordering`](super::validate_ordering).
///
/// # Errors
///
/// [`ConfigurationError::ArityMismatch`] unless
/// `states.len() == waves.len() + 1`.
///
/// # Example
///
/// ```
/// use wavefan::{build_region_table, Wave};
///
/// let states = [1.0, 2.0];
/// let waves = [Wave::rarefaction(2.0, -1.0, |xi| xi)];
///
/// let table = build_region_table(&states, &waves).unwrap();
/// assert_eq!(table.boundaries(), &[f64::NEG_INFINITY, -1.0, 2.0, f64::INFINITY]);
/// assert_eq!(table.n_regions(), 3);
/// ```
pub fn build_region_table<S: Clone>(
    states: &[S],
    waves: &[Wave<S>],
) -> Result<RegionTable<S>, ConfigurationError> {
    if states.len() != waves.len() + 1 {
        return Err(ConfigurationError::arity_mismatch(states.len(), waves.len()));
    }

    let n_fans = waves
        .iter()
        .filter(|w| matches!(w, Wave::Rarefaction(_)))
        .count();
    let mut boundaries = Vec::with_capacity(waves.len() + n_fans + 2);
    let mut evaluators = Vec::with_capacity(states.len() + n_fans);

    boundaries.push(f64::NEG_INFINITY);
    evaluators.push(Evaluator::Constant(states[0].clone()));

    for (wave, right) in waves.iter().zip(&states[1..]) {
        match wave {
            Wave::Shock { speed } | Wave::ContactDiscontinuity { speed } => {
                boundaries.push(*speed);
            }
            Wave::Rarefaction(fan) => {
                boundaries.push(fan.lower());
                evaluators.push(Evaluator::Fan(Arc::clone(fan.interior())));
                boundaries.push(fan.upper());
            }
        }
        evaluators.push(Evaluator::Constant(right.clone()));
    }

    boundaries.push(f64::INFINITY);

    Ok(RegionTable::from_parts(boundaries, evaluators))
}
