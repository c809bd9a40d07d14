// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for image container decoding, encoding and plane conversion.

use std::fmt;

/// Errors raised by the image collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The input bytes could not be decoded as an image.
    Decode(String),
    /// The image could not be encoded into the requested container.
    Encode(String),
    /// The container format is recognised but not supported (only PNG and JPEG are).
    UnsupportedFormat(String),
    /// Width or height is zero, or does not fit the sample buffer.
    InvalidDimensions,
    /// Luminance and chroma planes disagree in width, height or stride.
    PlaneMismatch,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "failed to decode image: {msg}"),
            Self::Encode(msg) => write!(f, "failed to encode image: {msg}"),
            Self::UnsupportedFormat(name) => write!(f, "unsupported image format: {name}"),
            Self::InvalidDimensions => write!(f, "invalid image dimensions"),
            Self::PlaneMismatch => write!(f, "colour planes have mismatched geometry"),
        }
    }
}

impl std::error::Error for RasterError {}

pub type Result<T> = std::result::Result<T, RasterError>;
