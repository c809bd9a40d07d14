// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image-to-image embed/extract pipeline.
//!
//! 1. Decode the container (PNG or JPEG) to 8-bit RGB.
//! 2. Split into BT.601 Y/Cb/Cr planes; only luminance carries data.
//! 3. Frame the payload, ECC-encode it, and write one bit per 8×8 block.
//! 4. Recombine the planes and re-encode, preserving the input format
//!    unless another one was requested.

use std::fs;
use std::path::Path;

use crate::raster::{self, ycbcr::{planes_to_rgb, rgb_to_planes, Plane}};
use crate::stego::capacity::CapacityInfo;
use crate::stego::config::{EmbedConfig, EmbedOptions};
use crate::stego::ecc::EccScheme;
use crate::stego::embedding;
use crate::stego::error::StegoError;
use crate::stego::extract::extract_from_plane;
use crate::stego::frame::build_frame;

/// Embed `message` into a cover image.
///
/// # Arguments
/// - `image_bytes`: PNG or JPEG cover image.
/// - `message`: Arbitrary payload bytes.
/// - `options`: Coefficient rule, ECC scheme and output container.
///
/// # Returns
/// The stego image encoded in `options.output_format`, or in the cover's
/// own format if none was given.
///
/// # Errors
/// - [`StegoError::InvalidImage`] if the cover cannot be decoded or the
///   result cannot be encoded.
/// - [`StegoError::MessageTooLong`] if the framed, ECC-encoded message needs
///   more bits than the image has whole 8×8 blocks.
/// - [`StegoError::InvalidConfig`] if the gap parameters are unusable.
pub fn embed(image_bytes: &[u8], message: &[u8], options: &EmbedOptions) -> Result<Vec<u8>, StegoError> {
    options.config.validate()?;

    let (rgb, input_format) = raster::decode(image_bytes)?;
    let (mut y, cb, cr) = rgb_to_planes(&rgb);

    embed_into_plane(&mut y, message, &options.config)?;

    let stego = planes_to_rgb(&y, &cb, &cr)?;
    let format = options.output_format.unwrap_or(input_format);
    if format.is_lossy() {
        log::debug!("writing {format} at quality {}", options.quality);
    }
    Ok(raster::encode(&stego, format, options.quality)?)
}

/// Frame, ECC-encode and embed `message` into a luminance plane.
///
/// # Errors
/// [`StegoError::MessageTooLong`] if the encoded frame does not fit. The
/// plane is left unmodified in that case.
pub fn embed_into_plane(plane: &mut Plane, message: &[u8], config: &EmbedConfig) -> Result<(), StegoError> {
    if u32::try_from(message.len()).is_err() {
        return Err(StegoError::MessageTooLong);
    }

    let frame = build_frame(message, config.ecc.id());
    let bits = config.ecc.encode_frame(&frame);
    log::debug!(
        "embedding {} byte message as {} bits ({}) into {}x{} plane",
        message.len(),
        bits.len(),
        config.ecc,
        plane.width,
        plane.height
    );
    embedding::embed_bits(plane, &bits, config)
}

/// Recover a message previously embedded with [`embed`].
///
/// # Errors
/// - [`StegoError::InvalidImage`] if the image cannot be decoded.
/// - Frame and ECC errors as described on
///   [`extract_frame`](crate::stego::extract::extract_frame).
pub fn extract(image_bytes: &[u8]) -> Result<Vec<u8>, StegoError> {
    let (rgb, _) = raster::decode(image_bytes)?;
    let (y, _, _) = rgb_to_planes(&rgb);
    extract_from_plane(&y)
}

/// Report how much an image can carry under `ecc`.
///
/// # Errors
/// [`StegoError::InvalidImage`] if the image cannot be decoded.
pub fn capacity_info(image_bytes: &[u8], ecc: EccScheme) -> Result<CapacityInfo, StegoError> {
    let (rgb, _) = raster::decode(image_bytes)?;
    Ok(CapacityInfo::new(rgb.width() as usize, rgb.height() as usize, ecc))
}

/// [`embed`] reading the cover from `input` and writing the result to `output`.
pub fn embed_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    message: &[u8],
    options: &EmbedOptions,
) -> Result<(), StegoError> {
    let cover = fs::read(input.as_ref())?;
    let stego = embed(&cover, message, options)?;
    fs::write(output.as_ref(), stego)?;
    log::debug!("wrote {}", output.as_ref().display());
    Ok(())
}

/// [`extract`] reading the image from `path`.
pub fn extract_file(path: impl AsRef<Path>) -> Result<Vec<u8>, StegoError> {
    extract(&fs::read(path)?)
}

/// [`capacity_info`] reading the image from `path`.
pub fn capacity_info_file(path: impl AsRef<Path>, ecc: EccScheme) -> Result<CapacityInfo, StegoError> {
    capacity_info(&fs::read(path)?, ecc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::OutputFormat;
    use image::{Rgb, RgbImage};

    fn cover(width: u32, height: u32, format: OutputFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = 60 + ((x * 3 + y * 2) % 120) as u8;
            Rgb([v, v.saturating_add(10), v.saturating_sub(15)])
        });
        raster::encode(&img, format, 95).unwrap()
    }

    #[test]
    fn plane_roundtrip() {
        let mut plane = Plane::new(256, 256);
        plane.pix.fill(120.0);
        embed_into_plane(&mut plane, b"plane", &EmbedConfig::default()).unwrap();
        assert_eq!(extract_from_plane(&plane).unwrap(), b"plane");
    }

    #[test]
    fn png_roundtrip_preserves_format() {
        let png = cover(256, 256, OutputFormat::Png);
        let stego = embed(&png, b"hello", &EmbedOptions::default()).unwrap();
        assert_eq!(image::guess_format(&stego).unwrap(), image::ImageFormat::Png);
        assert_eq!(extract(&stego).unwrap(), b"hello");
    }

    #[test]
    fn output_format_override() {
        let png = cover(256, 256, OutputFormat::Png);
        let options = EmbedOptions { output_format: Some(OutputFormat::Jpeg), ..EmbedOptions::default() };
        let stego = embed(&png, b"j", &options).unwrap();
        assert_eq!(image::guess_format(&stego).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn invalid_config_rejected_before_decoding() {
        let options = EmbedOptions {
            config: EmbedConfig { delta: 0.0, min_gap: 0.0, ..EmbedConfig::default() },
            ..EmbedOptions::default()
        };
        assert!(matches!(embed(b"not an image", b"x", &options), Err(StegoError::InvalidConfig(_))));
    }

    #[test]
    fn garbage_input_is_invalid_image() {
        assert!(matches!(extract(b"garbage"), Err(StegoError::InvalidImage(_))));
        assert!(matches!(
            capacity_info(b"garbage", EccScheme::Repetition3),
            Err(StegoError::InvalidImage(_))
        ));
    }

    #[test]
    fn capacity_from_image() {
        let info = capacity_info(&cover(256, 256, OutputFormat::Png), EccScheme::Repetition3).unwrap();
        assert_eq!(info.capacity_bits, 1024);
        assert_eq!(info.max_payload_bytes, 26);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            extract_file("/nonexistent/emganography/input.png"),
            Err(StegoError::Io(_))
        ));
    }
}
