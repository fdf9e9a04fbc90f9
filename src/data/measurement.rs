//! Two-point distance measurement and its feet/inches decomposition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::Point2D;
use super::scale::ScaleConfig;

const INCHES_PER_FOOT: f64 = 12.0;

/// How the inch remainder of a feet/inches split is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Round to the nearest whole inch; a remainder that rounds up to 12
    /// carries into the feet.
    #[default]
    Round,
    /// Keep the raw fractional remainder.
    Truncate,
}

/// Result of measuring between two overlay points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Raw Euclidean distance in overlay pixels.
    pub pixels: f64,
    /// Distance converted to inches.
    pub inches: f64,
    /// Whole feet; saturates at `u64::MAX` for astronomically large distances.
    pub feet: u64,
    /// Inches left over after whole feet, in `[0, 12)`.
    pub remainder_inches: f64,
    pub policy: RemainderPolicy,
}

impl MeasurementResult {
    fn from_inches(pixels: f64, inches: f64, policy: RemainderPolicy) -> Self {
        let mut remainder = inches.rem_euclid(INCHES_PER_FOOT);
        let mut feet = ((inches - remainder) / INCHES_PER_FOOT).round();
        if policy == RemainderPolicy::Round {
            remainder = remainder.round();
            if remainder >= INCHES_PER_FOOT {
                feet += 1.0;
                remainder = 0.0;
            }
        }
        Self {
            pixels,
            inches,
            feet: feet as u64,
            remainder_inches: remainder,
            policy,
        }
    }

    pub fn total_inches(&self) -> f64 {
        self.inches
    }

    pub fn is_zero(&self) -> bool {
        self.pixels == 0.0
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.policy {
            RemainderPolicy::Round => {
                write!(f, "{} ft {:.0} in", self.feet, self.remainder_inches)
            }
            RemainderPolicy::Truncate => {
                // Hundredths are truncated, never rounded up to 12.00.
                let cents = ((self.remainder_inches * 100.0 + 1e-9).floor() as u64).min(1199);
                write!(f, "{} ft {}.{:02} in", self.feet, cents / 100, cents % 100)
            }
        }
    }
}

/// Measure the distance between `a` and `b`.
///
/// Symmetric in `a`/`b`, linear in the pixel distance, and zero when the
/// points coincide.
pub fn compute(
    a: Point2D,
    b: Point2D,
    scale: &ScaleConfig,
    policy: RemainderPolicy,
) -> MeasurementResult {
    let pixels = a.distance_to(&b);
    MeasurementResult::from_inches(pixels, scale.to_inches(pixels), policy)
}

/// A scale and remainder policy bound together, fixed for the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistanceCalculator {
    scale: ScaleConfig,
    policy: RemainderPolicy,
}

impl DistanceCalculator {
    pub fn new(scale: ScaleConfig, policy: RemainderPolicy) -> Self {
        Self { scale, policy }
    }

    pub fn scale(&self) -> &ScaleConfig {
        &self.scale
    }

    pub fn policy(&self) -> RemainderPolicy {
        self.policy
    }

    pub fn compute(&self, a: Point2D, b: Point2D) -> MeasurementResult {
        compute(a, b, &self.scale, self.policy)
    }
}
