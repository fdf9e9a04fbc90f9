//! Pixel-to-inch conversion.
//!
//! The prototypes derived their conversion two ways: a fixed "pixels per inch"
//! constant, or "this many pixels of surface represent this many inches".
//! Both are linear and are modelled as variants of one [`ScaleConfig`].

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Fixed conversion from overlay pixels to inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaleConfig {
    /// `inches = pixels / pixels_per_inch`
    PixelsPerUnit { pixels_per_inch: f64 },
    /// `inches = pixels / surface_extent_px * span_inches`
    KnownSpan {
        surface_extent_px: f64,
        span_inches: f64,
    },
}

impl Default for ScaleConfig {
    fn default() -> Self {
        // 10 pixels = 1 inch
        ScaleConfig::PixelsPerUnit {
            pixels_per_inch: 10.0,
        }
    }
}

fn check_positive(name: &str, v: f64) -> ConfigResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidScale(format!(
            "{name} must be finite and > 0, got {v}"
        )))
    }
}

impl ScaleConfig {
    pub fn pixels_per_inch(pixels_per_inch: f64) -> ConfigResult<Self> {
        let s = ScaleConfig::PixelsPerUnit { pixels_per_inch };
        s.validate()?;
        Ok(s)
    }

    pub fn known_span(surface_extent_px: f64, span_inches: f64) -> ConfigResult<Self> {
        let s = ScaleConfig::KnownSpan {
            surface_extent_px,
            span_inches,
        };
        s.validate()?;
        Ok(s)
    }

    /// Check that every constant is finite and strictly positive.
    pub fn validate(&self) -> ConfigResult<()> {
        match *self {
            ScaleConfig::PixelsPerUnit { pixels_per_inch } => {
                check_positive("pixels_per_inch", pixels_per_inch)
            }
            ScaleConfig::KnownSpan {
                surface_extent_px,
                span_inches,
            } => {
                check_positive("surface_extent_px", surface_extent_px)?;
                check_positive("span_inches", span_inches)
            }
        }
    }

    /// Convert a pixel length into inches.
    #[inline]
    pub fn to_inches(&self, pixels: f64) -> f64 {
        match *self {
            ScaleConfig::PixelsPerUnit { pixels_per_inch } => pixels / pixels_per_inch,
            ScaleConfig::KnownSpan {
                surface_extent_px,
                span_inches,
            } => pixels / surface_extent_px * span_inches,
        }
    }

    /// Effective pixels per inch, handy for labels.
    pub fn effective_pixels_per_inch(&self) -> f64 {
        match *self {
            ScaleConfig::PixelsPerUnit { pixels_per_inch } => pixels_per_inch,
            ScaleConfig::KnownSpan {
                surface_extent_px,
                span_inches,
            } => surface_extent_px / span_inches,
        }
    }
}
