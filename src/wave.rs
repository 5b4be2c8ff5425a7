//! Wave descriptions connecting adjacent constant states.
//!
//! A Riemann fan is an ordered sequence of constant states separated by
//! three kinds of waves:
//! - [`Wave::Shock`]: a discontinuity travelling at a single speed
//! - [`Wave::ContactDiscontinuity`]: a discontinuity across which only some
//!   fields jump, also at a single speed
//! - [`Wave::Rarefaction`]: a continuous fan spanning a range of speeds,
//!   evaluated by an interior-state function of ξ = x/t
//!
//! The set of kinds is closed. Waves arriving from dynamic input are
//! described by a [`WaveRecord`] and converted with [`Wave::from_record`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, EvaluationError};

/// Shared interior-state function of a rarefaction fan.
pub type InteriorFn<S> = Arc<dyn Fn(f64) -> Result<S, EvaluationError> + Send + Sync>;

// =============================================================================
// Wave kinds
// =============================================================================

/// Discriminant of a [`Wave`], without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveKind {
    Shock,
    ContactDiscontinuity,
    Rarefaction,
}

impl WaveKind {
    /// Whether the wave has zero width in ξ.
    #[inline]
    pub fn is_discontinuity(self) -> bool {
        !matches!(self, Self::Rarefaction)
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Shock => "shock",
            Self::ContactDiscontinuity => "contact discontinuity",
            Self::Rarefaction => "rarefaction",
        };
        f.write_str(name)
    }
}

impl FromStr for WaveKind {
    type Err = ConfigurationError;

    /// Parse a wave kind, ignoring case and `-`/`_`/space separators.
    ///
    /// ```
    /// use wavefan::WaveKind;
    ///
    /// assert_eq!("Shock".parse::<WaveKind>().unwrap(), WaveKind::Shock);
    /// assert_eq!(
    ///     "contact_discontinuity".parse::<WaveKind>().unwrap(),
    ///     WaveKind::ContactDiscontinuity
    /// );
    /// assert_eq!("fan".parse::<WaveKind>().unwrap(), WaveKind::Rarefaction);
    /// assert!("detonation".parse::<WaveKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "shock" => Ok(Self::Shock),
            "contact" | "contactdiscontinuity" => Ok(Self::ContactDiscontinuity),
            "rarefaction" | "fan" => Ok(Self::Rarefaction),
            _ => Err(ConfigurationError::unrecognized_wave(s)),
        }
    }
}

// =============================================================================
// Rarefaction
// =============================================================================

/// A rarefaction fan between a head and a tail characteristic speed.
///
/// The fan covers `[min(head, tail), max(head, tail)]` regardless of the
/// order the speeds are given in, so left- and right-facing fans share one
/// representation.
pub struct Rarefaction<S> {
    speed_head: f64,
    speed_tail: f64,
    interior: InteriorFn<S>,
}

impl<S> Rarefaction<S> {
    /// Create a fan from an infallible interior-state function.
    pub fn new<F>(speed_head: f64, speed_tail: f64, interior: F) -> Self
    where
        S: 'static,
        F: Fn(f64) -> S + Send + Sync + 'static,
    {
        let interior = move |xi: f64| -> Result<S, EvaluationError> { Ok(interior(xi)) };
        Self::from_shared(speed_head, speed_tail, Arc::new(interior))
    }

    /// Create a fan from an interior-state function that can fail.
    ///
    /// Errors returned by `interior` reach the caller of the query unchanged.
    pub fn try_new<F>(speed_head: f64, speed_tail: f64, interior: F) -> Self
    where
        F: Fn(f64) -> Result<S, EvaluationError> + Send + Sync + 'static,
    {
        Self::from_shared(speed_head, speed_tail, Arc::new(interior))
    }

    /// Create a fan sharing an existing interior function.
    pub fn from_shared(speed_head: f64, speed_tail: f64, interior: InteriorFn<S>) -> Self {
        Self {
            speed_head,
            speed_tail,
            interior,
        }
    }

    /// Speed of the head characteristic.
    #[inline]
    pub fn speed_head(&self) -> f64 {
        self.speed_head
    }

    /// Speed of the tail characteristic.
    #[inline]
    pub fn speed_tail(&self) -> f64 {
        self.speed_tail
    }

    /// Lower edge of the fan in ξ.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.speed_head.min(self.speed_tail)
    }

    /// Upper edge of the fan in ξ.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.speed_head.max(self.speed_tail)
    }

    /// Width of the fan in ξ.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper() - self.lower()
    }

    /// The shared interior-state function.
    #[inline]
    pub fn interior(&self) -> &InteriorFn<S> {
        &self.interior
    }

    /// Evaluate the interior state at `xi`.
    ///
    /// No range check is made; the fan function is called as is.
    #[inline]
    pub fn evaluate(&self, xi: f64) -> Result<S, EvaluationError> {
        (self.interior)(xi)
    }
}

impl<S> Clone for Rarefaction<S> {
    fn clone(&self) -> Self {
        Self {
            speed_head: self.speed_head,
            speed_tail: self.speed_tail,
            interior: Arc::clone(&self.interior),
        }
    }
}

impl<S> fmt::Debug for Rarefaction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rarefaction")
            .field("speed_head", &self.speed_head)
            .field("speed_tail", &self.speed_tail)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Wave
// =============================================================================

/// A wave separating two adjacent constant states.
pub enum Wave<S> {
    /// Shock travelling at `speed`.
    Shock { speed: f64 },
    /// Contact discontinuity travelling at `speed`.
    ContactDiscontinuity { speed: f64 },
    /// Continuous rarefaction fan.
    Rarefaction(Rarefaction<S>),
}

impl<S> Wave<S> {
    /// Shock at `speed`.
    pub fn shock(speed: f64) -> Self {
        Self::Shock { speed }
    }

    /// Contact discontinuity at `speed`.
    pub fn contact(speed: f64) -> Self {
        Self::ContactDiscontinuity { speed }
    }

    /// Rarefaction fan with an infallible interior function.
    pub fn rarefaction<F>(speed_head: f64, speed_tail: f64, interior: F) -> Self
    where
        S: 'static,
        F: Fn(f64) -> S + Send + Sync + 'static,
    {
        Self::Rarefaction(Rarefaction::new(speed_head, speed_tail, interior))
    }

    /// Rarefaction fan with a fallible interior function.
    pub fn try_rarefaction<F>(speed_head: f64, speed_tail: f64, interior: F) -> Self
    where
        F: Fn(f64) -> Result<S, EvaluationError> + Send + Sync + 'static,
    {
        Self::Rarefaction(Rarefaction::try_new(speed_head, speed_tail, interior))
    }

    /// Build a wave from a dynamic record.
    ///
    /// Rarefactions need `interior`; it is ignored for discontinuities.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigurationError::UnrecognizedWave`] for an unknown
    /// kind and [`ConfigurationError::MissingParameter`] when a speed or the
    /// interior function is absent.
    pub fn from_record(
        record: &WaveRecord,
        interior: Option<InteriorFn<S>>,
    ) -> Result<Self, ConfigurationError> {
        let kind: WaveKind = record.kind.parse()?;
        let require = |value: Option<f64>, parameter: &'static str| {
            value.ok_or(ConfigurationError::MissingParameter { kind, parameter })
        };

        match kind {
            WaveKind::Shock => Ok(Self::shock(require(record.speed, "speed")?)),
            WaveKind::ContactDiscontinuity => Ok(Self::contact(require(record.speed, "speed")?)),
            WaveKind::Rarefaction => {
                let head = require(record.speed_head, "speed_head")?;
                let tail = require(record.speed_tail, "speed_tail")?;
                let interior = interior.ok_or(ConfigurationError::MissingParameter {
                    kind,
                    parameter: "interior",
                })?;
                Ok(Self::Rarefaction(Rarefaction::from_shared(head, tail, interior)))
            }
        }
    }

    /// Kind of this wave.
    pub fn kind(&self) -> WaveKind {
        match self {
            Self::Shock { .. } => WaveKind::Shock,
            Self::ContactDiscontinuity { .. } => WaveKind::ContactDiscontinuity,
            Self::Rarefaction(_) => WaveKind::Rarefaction,
        }
    }

    /// Lower and upper edge in ξ. Equal for discontinuities.
    pub fn edges(&self) -> (f64, f64) {
        match self {
            Self::Shock { speed } | Self::ContactDiscontinuity { speed } => (*speed, *speed),
            Self::Rarefaction(fan) => (fan.lower(), fan.upper()),
        }
    }

    /// Largest absolute speed carried by this wave.
    pub fn max_abs_speed(&self) -> f64 {
        let (lo, hi) = self.edges();
        lo.abs().max(hi.abs())
    }
}

impl<S> Clone for Wave<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Shock { speed } => Self::Shock { speed: *speed },
            Self::ContactDiscontinuity { speed } => Self::ContactDiscontinuity { speed: *speed },
            Self::Rarefaction(fan) => Self::Rarefaction(fan.clone()),
        }
    }
}

impl<S> fmt::Debug for Wave<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shock { speed } => f.debug_struct("Shock").field("speed", speed).finish(),
            Self::ContactDiscontinuity { speed } => f
                .debug_struct("ContactDiscontinuity")
                .field("speed", speed)
                .finish(),
            Self::Rarefaction(fan) => fmt::Debug::fmt(fan, f),
        }
    }
}

impl<S> fmt::Display for Wave<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shock { speed } | Self::ContactDiscontinuity { speed } => {
                write!(f, "{} at xi = {}", self.kind(), speed)
            }
            Self::Rarefaction(fan) => write!(
                f,
                "rarefaction from xi = {} (head) to xi = {} (tail)",
                fan.speed_head, fan.speed_tail
            ),
        }
    }
}

// =============================================================================
// Dynamic records
// =============================================================================

/// Wave parameters as they arrive from dynamic input (JSON, config files).
///
/// Discontinuities use `speed`; rarefactions use `speed_head` and
/// `speed_tail`. The interior function is supplied separately since it
/// cannot be serialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveRecord {
    /// Wave kind name, parsed with [`WaveKind::from_str`].
    pub kind: String,
    /// Speed of a shock or contact discontinuity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Head speed of a rarefaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_head: Option<f64>,
    /// Tail speed of a rarefaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_tail: Option<f64>,
}

impl WaveRecord {
    /// Record for a discontinuity of the given kind name.
    pub fn discontinuity(kind: impl Into<String>, speed: f64) -> Self {
        Self {
            kind: kind.into(),
            speed: Some(speed),
            ..Self::default()
        }
    }

    /// Record for a rarefaction.
    pub fn rarefaction(speed_head: f64, speed_tail: f64) -> Self {
        Self {
            kind: "rarefaction".to_string(),
            speed_head: Some(speed_head),
            speed_tail: Some(speed_tail),
            ..Self::default()
        }
    }
}

impl<S> From<&Wave<S>> for WaveRecord {
    fn from(wave: &Wave<S>) -> Self {
        match wave {
            Wave::Shock { speed } => Self::discontinuity("shock", *speed),
            Wave::ContactDiscontinuity { speed } => {
                Self::discontinuity("contact_discontinuity", *speed)
            }
            Wave::Rarefaction(fan) => Self::rarefaction(fan.speed_head, fan.speed_tail),
        }
    }
}
