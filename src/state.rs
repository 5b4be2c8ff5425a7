//! Flow states and their field schema.
//!
//! The query engine treats states as opaque cloneable values. Batch
//! aggregation into fields-of-arrays additionally needs a field schema,
//! declared statically through [`StateSchema`]:
//!
//! ```
//! use wavefan::{state_schema, StateSchema};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Isothermal {
//!     density: f64,
//!     velocity: f64,
//! }
//!
//! state_schema!(Isothermal { density, velocity });
//!
//! let s = Isothermal { density: 1.2, velocity: -0.5 };
//! assert_eq!(s.field_names(), Some(&["density", "velocity"][..]));
//! assert_eq!(s.field_values(), vec![1.2, -0.5]);
//! ```

use serde::{Deserialize, Serialize};

/// Statically declared scalar fields of a state.
///
/// Two states belong to the same schema when `field_names` returns equal
/// lists. A state returning `None` cannot take part in fields-of-arrays
/// aggregation.
pub trait StateSchema {
    /// Field names in declaration order.
    fn field_names(&self) -> Option<&'static [&'static str]>;

    /// Field values, aligned with [`field_names`](Self::field_names).
    fn field_values(&self) -> Vec<f64>;
}

/// Implement [`StateSchema`] for a struct with named scalar fields.
#[macro_export]
macro_rules! state_schema {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::StateSchema for $ty {
            fn field_names(&self) -> Option<&'static [&'static str]> {
                Some(&[$(stringify!($field)),+])
            }

            fn field_values(&self) -> Vec<f64> {
                vec![$(self.$field as f64),+]
            }
        }
    };
}

impl StateSchema for f64 {
    fn field_names(&self) -> Option<&'static [&'static str]> {
        Some(&["value"])
    }

    fn field_values(&self) -> Vec<f64> {
        vec![*self]
    }
}

// =============================================================================
// Gas dynamics
// =============================================================================

/// Primitive state of a one-dimensional gas: (ρ, u, p).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveState {
    /// Density ρ
    pub density: f64,
    /// Velocity u
    pub velocity: f64,
    /// Pressure p
    pub pressure: f64,
}

impl PrimitiveState {
    /// Create a new primitive state.
    pub fn new(density: f64, velocity: f64, pressure: f64) -> Self {
        Self {
            density,
            velocity,
            pressure,
        }
    }

    /// Momentum density ρu.
    #[inline]
    pub fn momentum(&self) -> f64 {
        self.density * self.velocity
    }

    /// Convert to array representation [ρ, u, p].
    pub fn to_array(&self) -> [f64; 3] {
        [self.density, self.velocity, self.pressure]
    }

    /// Create from array representation [ρ, u, p].
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

state_schema!(PrimitiveState {
    density,
    velocity,
    pressure
});

// =============================================================================
// Shallow water
// =============================================================================

/// Primitive shallow water state: (h, u).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShallowWaterState {
    /// Water depth h
    pub depth: f64,
    /// Depth-averaged velocity u
    pub velocity: f64,
}

impl ShallowWaterState {
    /// Create a new shallow water state.
    pub fn new(depth: f64, velocity: f64) -> Self {
        Self { depth, velocity }
    }

    /// Discharge hu.
    #[inline]
    pub fn discharge(&self) -> f64 {
        self.depth * self.velocity
    }

    /// Gravity wave celerity c = sqrt(g h).
    #[inline]
    pub fn celerity(&self, g: f64) -> f64 {
        (g * self.depth.max(0.0)).sqrt()
    }

    /// Check if the state is dry (h < h_min).
    #[inline]
    pub fn is_dry(&self, h_min: f64) -> bool {
        self.depth < h_min
    }
}

state_schema!(ShallowWaterState { depth, velocity });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_schema() {
        let s = PrimitiveState::new(1.0, 0.5, 2.5);
        assert_eq!(
            s.field_names(),
            Some(&["density", "velocity", "pressure"][..])
        );
        assert_eq!(s.field_values(), vec![1.0, 0.5, 2.5]);
        assert_eq!(PrimitiveState::from_array(s.to_array()), s);
        assert_eq!(s.momentum(), 0.5);
    }

    #[test]
    fn test_shallow_water_state() {
        let s = ShallowWaterState::new(4.0, 1.5);
        assert_eq!(s.field_names(), Some(&["depth", "velocity"][..]));
        assert_eq!(s.discharge(), 6.0);
        assert_eq!(s.celerity(9.0), 6.0);
        assert!(!s.is_dry(1e-6));
        assert!(ShallowWaterState::new(0.0, 0.0).is_dry(1e-6));
    }

    #[test]
    fn test_scalar_schema() {
        assert_eq!(2.5_f64.field_names(), Some(&["value"][..]));
        assert_eq!(2.5_f64.field_values(), vec![2.5]);
    }
}
