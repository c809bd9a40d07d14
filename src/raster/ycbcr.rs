// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Floating-point sample planes and BT.601 full-range YCbCr conversion.
//!
//! Planes are kept as `f64` so that the luminance channel can travel through
//! DCT and IDCT without intermediate quantization. Rounding to 8-bit only
//! happens once, when the planes are recombined into RGB.

use image::{Rgb, RgbImage};

use super::error::{RasterError, Result};

/// A rectangular plane of real-valued samples in row-major order.
///
/// `stride` is the distance in samples between the starts of two consecutive
/// rows and may exceed `width`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub pix: Vec<f64>,
    pub width: usize,
    pub height: usize,
    pub stride: usize,
}

impl Plane {
    /// Create a zero-filled plane with `stride == width`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_stride(width, height, width)
    }

    /// Create a zero-filled plane with an explicit row stride.
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Self {
        debug_assert!(stride >= width, "stride {stride} < width {width}");
        Self {
            pix: vec![0.0; stride * height],
            width,
            height,
            stride,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.pix[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, val: f64) {
        let idx = self.index(x, y);
        self.pix[idx] = val;
    }

    /// The `width` visible samples of row `y`.
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.stride;
        &self.pix[start..start + self.width]
    }

    /// Number of whole 8×8 blocks horizontally and vertically.
    pub fn block_grid(&self) -> (usize, usize) {
        (self.width / 8, self.height / 8)
    }

    /// Same width, height and stride as `other`.
    pub fn same_geometry(&self, other: &Plane) -> bool {
        self.width == other.width && self.height == other.height && self.stride == other.stride
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width, "x {x} >= {}", self.width);
        debug_assert!(y < self.height, "y {y} >= {}", self.height);
        y * self.stride + x
    }
}

/// Split an RGB image into Y, Cb and Cr planes (BT.601 full range).
pub fn rgb_to_planes(img: &RgbImage) -> (Plane, Plane, Plane) {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut y_plane = Plane::new(width, height);
    let mut cb_plane = Plane::new(width, height);
    let mut cr_plane = Plane::new(width, height);

    for (x, y, px) in img.enumerate_pixels() {
        let r = px[0] as f64;
        let g = px[1] as f64;
        let b = px[2] as f64;
        let idx = y as usize * width + x as usize;
        y_plane.pix[idx] = 0.299 * r + 0.587 * g + 0.114 * b;
        cb_plane.pix[idx] = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
        cr_plane.pix[idx] = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;
    }

    (y_plane, cb_plane, cr_plane)
}

/// Recombine Y, Cb and Cr planes into an 8-bit RGB image.
///
/// # Errors
/// - [`RasterError::PlaneMismatch`] if the three planes differ in geometry.
/// - [`RasterError::InvalidDimensions`] if the planes do not fit a `u32` image.
pub fn planes_to_rgb(y: &Plane, cb: &Plane, cr: &Plane) -> Result<RgbImage> {
    if !y.same_geometry(cb) || !y.same_geometry(cr) {
        return Err(RasterError::PlaneMismatch);
    }
    let width = u32::try_from(y.width).map_err(|_| RasterError::InvalidDimensions)?;
    let height = u32::try_from(y.height).map_err(|_| RasterError::InvalidDimensions)?;

    let mut img = RgbImage::new(width, height);
    for row in 0..y.height {
        for col in 0..y.width {
            let idx = row * y.stride + col;
            let luma = y.pix[idx];
            let db = cb.pix[idx] - 128.0;
            let dr = cr.pix[idx] - 128.0;

            let r = luma + 1.402 * dr;
            let g = luma - 0.344136 * db - 0.714136 * dr;
            let b = luma + 1.772 * db;

            img.put_pixel(col as u32, row as u32, Rgb([to_u8(r), to_u8(g), to_u8(b)]));
        }
    }
    Ok(img)
}

/// Round half-up and clamp to [0, 255].
fn to_u8(v: f64) -> u8 {
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        (v + 0.5) as u8
    }
}
