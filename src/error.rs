//! Error types for wavefan construction and queries.
//!
//! Construction problems surface as [`ConfigurationError`] and never leave a
//! partially built [`Wavefan`](crate::Wavefan) behind. Query problems surface
//! as [`EvaluationError`]; failures raised by a rarefaction's interior
//! function are carried through unchanged as the error source.

use std::error::Error as StdError;

use thiserror::Error;

use crate::wave::WaveKind;

/// Boxed error raised by external physics code.
pub type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors detected while building a wavefan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The state and wave sequences do not interleave.
    #[error(
        "wave/state arity mismatch: {states} states cannot be separated by {waves} waves \
         (expected {} states)",
        .waves + 1
    )]
    ArityMismatch { states: usize, waves: usize },

    /// A dynamically described wave names an unknown kind.
    #[error("unrecognized wave kind '{kind}'")]
    UnrecognizedWave { kind: String },

    /// A dynamically described wave lacks a parameter its kind requires.
    #[error("{kind} wave is missing required parameter '{parameter}'")]
    MissingParameter {
        kind: WaveKind,
        parameter: &'static str,
    },

    /// A wave speed is NaN.
    #[error("wave {wave} has invalid speed {value}")]
    InvalidSpeed { wave: usize, value: f64 },

    /// A wave edge lies to the left of the edge before it.
    #[error("wave {wave} edge at {current} precedes the previous edge at {previous}")]
    NonMonotonic {
        wave: usize,
        previous: f64,
        current: f64,
    },
}

impl ConfigurationError {
    /// Create an arity mismatch error.
    pub fn arity_mismatch(states: usize, waves: usize) -> Self {
        Self::ArityMismatch { states, waves }
    }

    /// Create an unrecognized wave error.
    pub fn unrecognized_wave(kind: impl Into<String>) -> Self {
        Self::UnrecognizedWave { kind: kind.into() }
    }
}

/// Errors raised while evaluating the solution at a query point.
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// The query point is NaN and belongs to no region.
    #[error("query point is NaN")]
    NanQuery,

    /// Sampling in physical coordinates needs a strictly positive time.
    #[error("sampling time must be positive, got {t}")]
    NonPositiveTime { t: f64 },

    /// A rarefaction interior function reported a domain error.
    #[error("rarefaction interior undefined at xi = {xi}: {message}")]
    Domain { xi: f64, message: String },

    /// A rarefaction interior function failed with its own error type.
    #[error("rarefaction interior failed at xi = {xi}")]
    Interior {
        xi: f64,
        #[source]
        source: BoxedError,
    },
}

impl EvaluationError {
    /// Create a domain error.
    pub fn domain(xi: f64, message: impl Into<String>) -> Self {
        Self::Domain {
            xi,
            message: message.into(),
        }
    }

    /// Wrap an error raised by external physics code.
    pub fn interior<E>(xi: f64, source: E) -> Self
    where
        E: Into<BoxedError>,
    {
        Self::Interior {
            xi,
            source: source.into(),
        }
    }
}

/// Any error the crate can produce.
#[derive(Error, Debug)]
pub enum WavefanError {
    /// Construction failed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A query failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
