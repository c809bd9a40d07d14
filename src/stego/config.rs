// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embedding configuration.

use crate::raster::OutputFormat;
use crate::stego::ecc::EccScheme;
use crate::stego::error::StegoError;

/// Default coefficient adjustment magnitude.
pub const DEFAULT_DELTA: f64 = 10.0;

/// Default minimum gap between the two carrier coefficients.
pub const DEFAULT_MIN_GAP: f64 = 5.0;

/// Default quality for lossy output formats.
pub const DEFAULT_QUALITY: u8 = 90;

/// Parameters of the coefficient-encoding rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedConfig {
    /// Error-correcting code applied to the frame.
    pub ecc: EccScheme,
    /// Coefficient adjustment magnitude added on top of `min_gap`.
    pub delta: f64,
    /// Minimum required separation between the carrier coefficients.
    pub min_gap: f64,
}

impl EmbedConfig {
    /// Separation forced between the two carrier coefficients: `min_gap + delta`.
    pub fn gap(&self) -> f64 {
        self.min_gap + self.delta
    }

    /// Reject values that would make the embedded bits unreadable.
    ///
    /// # Errors
    /// [`StegoError::InvalidConfig`] if `delta` or `min_gap` is negative or
    /// not finite, or if the resulting gap is zero.
    pub fn validate(&self) -> Result<(), StegoError> {
        if !self.delta.is_finite() || self.delta < 0.0 {
            return Err(StegoError::InvalidConfig("delta must be a finite non-negative number"));
        }
        if !self.min_gap.is_finite() || self.min_gap < 0.0 {
            return Err(StegoError::InvalidConfig("min_gap must be a finite non-negative number"));
        }
        if self.gap() <= 0.0 {
            return Err(StegoError::InvalidConfig("min_gap + delta must be positive"));
        }
        Ok(())
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            ecc: EccScheme::Repetition3,
            delta: DEFAULT_DELTA,
            min_gap: DEFAULT_MIN_GAP,
        }
    }
}

/// Options for a full image-to-image embed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedOptions {
    pub config: EmbedConfig,
    /// Container for the output; `None` preserves the input format.
    pub output_format: Option<OutputFormat>,
    /// Quality (1–100) for lossy output formats.
    pub quality: u8,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            config: EmbedConfig::default(),
            output_format: None,
            quality: DEFAULT_QUALITY,
        }
    }
}
