// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image container collaborator.
//!
//! Turns PNG/JPEG byte streams into RGB pixel grids and back, and splits
//! those grids into floating-point YCbCr planes (`ycbcr`). The steganography
//! layer only ever sees the luminance [`Plane`](ycbcr::Plane); container
//! details stay here.

pub mod error;
pub mod ycbcr;

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};

use error::{RasterError, Result};

/// Container formats the codec can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless; embedded payloads survive exactly.
    Png,
    /// Lossy; quality applies.
    Jpeg,
}

impl OutputFormat {
    /// Parse a format name or MIME type (`png`, `jpg`, `jpeg`, `image/png`, `image/jpeg`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Some(Self::Png),
            "jpg" | "jpeg" | "image/jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Whether encoding discards information.
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        })
    }
}

/// Decode PNG or JPEG bytes into an 8-bit RGB grid plus the detected format.
///
/// Alpha is discarded and greyscale is expanded to three channels.
///
/// # Errors
/// - [`RasterError::UnsupportedFormat`] for any container other than PNG/JPEG.
/// - [`RasterError::Decode`] if the bytes are not a decodable image.
/// - [`RasterError::InvalidDimensions`] for a zero-sized image.
pub fn decode(bytes: &[u8]) -> Result<(RgbImage, OutputFormat)> {
    let guessed = image::guess_format(bytes).map_err(|e| RasterError::Decode(e.to_string()))?;
    let format = match guessed {
        ImageFormat::Png => OutputFormat::Png,
        ImageFormat::Jpeg => OutputFormat::Jpeg,
        other => return Err(RasterError::UnsupportedFormat(format!("{other:?}"))),
    };

    let img = image::load_from_memory_with_format(bytes, guessed)
        .map_err(|e| RasterError::Decode(e.to_string()))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(RasterError::InvalidDimensions);
    }

    log::debug!("decoded {format} image {}x{}", img.width(), img.height());
    Ok((img.to_rgb8(), format))
}

/// Encode an RGB grid into the requested container.
///
/// `quality` is only used for JPEG and is clamped to 1..=100.
pub fn encode(img: &RgbImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut out).write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Jpeg => {
            let quality = quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut out, quality).write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|e| RasterError::Encode(e.to_string()))?;

    let bytes = out.into_inner();
    log::debug!("encoded {format} image, {} bytes", bytes.len());
    Ok(bytes)
}
