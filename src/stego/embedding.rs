// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Coefficient-pair embedding across the 8×8 block grid of a luminance plane.
//!
//! Each whole 8×8 block carries one bit, assigned in raster order of blocks.
//! The bit is the sign of `A - B` where `A` and `B` are the DCT coefficients
//! at (2,2) and (2,3). Embedding keeps their midpoint and forces them exactly
//! `gap` apart, so the result does not depend on the original image content.
//!
//! Block rows are independent. With the `parallel` feature they are processed
//! concurrently via Rayon; the output is identical either way.

use crate::raster::ycbcr::Plane;
use crate::stego::capacity::capacity_bits;
use crate::stego::config::EmbedConfig;
use crate::stego::dct::{self, Block};
use crate::stego::error::StegoError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Natural index of coefficient A (row freq 2, col freq 2).
pub const COEFF_A: usize = 2 * 8 + 2;

/// Natural index of coefficient B (row freq 2, col freq 3).
pub const COEFF_B: usize = 2 * 8 + 3;

/// Level shift applied before the forward DCT.
const CENTER: f64 = 128.0;

/// Force the carrier pair of a frequency-domain block to encode `bit`.
///
/// `bit == true` yields `A = mid + gap/2`, `B = mid - gap/2`; `false` the reverse.
pub fn embed_bit(coeffs: &mut Block, bit: bool, gap: f64) {
    let midpoint = (coeffs[COEFF_A] + coeffs[COEFF_B]) / 2.0;
    let half = gap / 2.0;
    if bit {
        coeffs[COEFF_A] = midpoint + half;
        coeffs[COEFF_B] = midpoint - half;
    } else {
        coeffs[COEFF_A] = midpoint - half;
        coeffs[COEFF_B] = midpoint + half;
    }
}

/// Read the bit carried by a frequency-domain block. Ties read as `false`.
pub fn read_bit(coeffs: &Block) -> bool {
    coeffs[COEFF_A] > coeffs[COEFF_B]
}

/// Embed `bits` into the luminance plane, one bit per block in raster order.
///
/// Blocks past the end of `bits` are not touched.
///
/// # Errors
/// - [`StegoError::MessageTooLong`] if `bits` exceeds the block count; the
///   plane is not modified in that case.
/// - [`StegoError::InvalidConfig`] if the configured gap is unusable.
pub fn embed_bits(plane: &mut Plane, bits: &[bool], config: &EmbedConfig) -> Result<(), StegoError> {
    config.validate()?;

    let capacity = capacity_bits(plane.width, plane.height);
    if bits.len() > capacity {
        log::debug!("{} bits do not fit in {capacity} blocks", bits.len());
        return Err(StegoError::MessageTooLong);
    }
    if bits.is_empty() {
        return Ok(());
    }

    let (blocks_across, _) = plane.block_grid();
    let stride = plane.stride;
    let gap = config.gap();
    let rows_used = (bits.len() + blocks_across - 1) / blocks_across;
    debug_assert!(plane.pix.len() >= (rows_used * 8 - 1) * stride + plane.width);

    log::trace!("embedding {} bits across {rows_used} block rows, gap {gap}", bits.len());

    let process_row = |(by, rows): (usize, &mut [f64])| {
        let start = by * blocks_across;
        let end = (start + blocks_across).min(bits.len());
        for (bx, &bit) in bits[start..end].iter().enumerate() {
            let mut coeffs = dct::forward(&load_block(rows, stride, bx));
            embed_bit(&mut coeffs, bit, gap);
            store_block(rows, stride, bx, &dct::inverse(&coeffs));
        }
    };

    #[cfg(feature = "parallel")]
    plane
        .pix
        .par_chunks_mut(8 * stride)
        .take(rows_used)
        .enumerate()
        .for_each(process_row);
    #[cfg(not(feature = "parallel"))]
    plane
        .pix
        .chunks_mut(8 * stride)
        .take(rows_used)
        .enumerate()
        .for_each(process_row);

    Ok(())
}

/// Read up to `max_bits` bits from the plane in raster block order.
///
/// Returns fewer bits than requested when the plane has fewer blocks.
pub fn extract_bits(plane: &Plane, max_bits: usize) -> Vec<bool> {
    let count = max_bits.min(capacity_bits(plane.width, plane.height));
    if count == 0 {
        return Vec::new();
    }

    let (blocks_across, _) = plane.block_grid();
    let stride = plane.stride;
    let rows_used = (count + blocks_across - 1) / blocks_across;

    let read_row = |(by, rows): (usize, &[f64])| -> Vec<bool> {
        let n = (count - by * blocks_across).min(blocks_across);
        (0..n)
            .map(|bx| read_bit(&dct::forward(&load_block(rows, stride, bx))))
            .collect()
    };

    #[cfg(feature = "parallel")]
    let per_row: Vec<Vec<bool>> = plane
        .pix
        .par_chunks(8 * stride)
        .take(rows_used)
        .enumerate()
        .map(read_row)
        .collect();
    #[cfg(not(feature = "parallel"))]
    let per_row: Vec<Vec<bool>> = plane
        .pix
        .chunks(8 * stride)
        .take(rows_used)
        .enumerate()
        .map(read_row)
        .collect();

    let bits: Vec<bool> = per_row.into_iter().flatten().collect();
    log::trace!("extracted {} bits", bits.len());
    bits
}

/// Copy block `bx` of an 8-row strip into a level-shifted block.
fn load_block(rows: &[f64], stride: usize, bx: usize) -> Block {
    let mut block = [0.0f64; 64];
    for y in 0..8 {
        let src = &rows[y * stride + bx * 8..y * stride + bx * 8 + 8];
        for (x, &v) in src.iter().enumerate() {
            block[y * 8 + x] = v - CENTER;
        }
    }
    block
}

/// Undo the level shift, clamp to [0, 255] and write block `bx` back.
fn store_block(rows: &mut [f64], stride: usize, bx: usize, spatial: &Block) {
    for y in 0..8 {
        let dst = &mut rows[y * stride + bx * 8..y * stride + bx * 8 + 8];
        for (x, d) in dst.iter_mut().enumerate() {
            *d = (spatial[y * 8 + x] + CENTER).clamp(0.0, 255.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn textured_plane(width: usize, height: usize, seed: u64) -> Plane {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut plane = Plane::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let base = 40.0 + 150.0 * (x + y) as f64 / (width + height) as f64;
                plane.set(x, y, base + rng.gen_range(-20.0..20.0));
            }
        }
        plane
    }

    fn random_bits(n: usize, seed: u64) -> Vec<bool> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen()).collect()
    }

    #[test]
    fn embed_bit_sets_gap_and_keeps_midpoint() {
        let mut coeffs = [0.0f64; 64];
        coeffs[COEFF_A] = 3.0;
        coeffs[COEFF_B] = 7.0;
        embed_bit(&mut coeffs, true, 15.0);
        assert_eq!(coeffs[COEFF_A], 12.5);
        assert_eq!(coeffs[COEFF_B], -2.5);
        assert!(read_bit(&coeffs));

        embed_bit(&mut coeffs, false, 15.0);
        assert_eq!(coeffs[COEFF_A], -2.5);
        assert_eq!(coeffs[COEFF_B], 12.5);
        assert!(!read_bit(&coeffs));
    }

    #[test]
    fn tie_reads_as_zero() {
        let mut coeffs = [0.0f64; 64];
        coeffs[COEFF_A] = 4.0;
        coeffs[COEFF_B] = 4.0;
        assert!(!read_bit(&coeffs));
    }

    #[test]
    fn plane_roundtrip() {
        let mut plane = textured_plane(96, 64, 1);
        let bits = random_bits(96, 2); // all 12×8 blocks
        embed_bits(&mut plane, &bits, &EmbedConfig::default()).unwrap();
        assert_eq!(extract_bits(&plane, bits.len()), bits);
    }

    #[test]
    fn partial_fill_leaves_remaining_blocks_untouched() {
        let original = textured_plane(64, 64, 3);
        let mut plane = original.clone();
        let bits = random_bits(10, 4); // first row (8 blocks) + 2 blocks of the second
        embed_bits(&mut plane, &bits, &EmbedConfig::default()).unwrap();
        assert_eq!(extract_bits(&plane, 10), bits);

        // Block (row 1, col 2) onward is untouched.
        for y in 8..16 {
            for x in 16..64 {
                assert_eq!(plane.get(x, y), original.get(x, y));
            }
        }
        for y in 16..64 {
            assert_eq!(plane.row(y), original.row(y));
        }
    }

    #[test]
    fn too_many_bits_rejected_before_mutation() {
        let original = textured_plane(16, 16, 5);
        let mut plane = original.clone();
        let bits = vec![true; 5];
        assert!(matches!(
            embed_bits(&mut plane, &bits, &EmbedConfig::default()),
            Err(StegoError::MessageTooLong)
        ));
        assert_eq!(plane, original);
    }

    #[test]
    fn padded_stride_and_partial_blocks() {
        // 21×19 visible samples, stride 32: 2×2 whole blocks.
        let mut plane = Plane::with_stride(21, 19, 32);
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        for y in 0..19 {
            for x in 0..21 {
                plane.set(x, y, rng.gen_range(60.0..200.0));
            }
        }
        let padding_before: Vec<f64> = (0..19).flat_map(|y| plane.pix[y * 32 + 21..y * 32 + 32].to_vec()).collect();

        let bits = vec![true, false, false, true];
        embed_bits(&mut plane, &bits, &EmbedConfig::default()).unwrap();
        assert_eq!(extract_bits(&plane, 100), bits);

        let padding_after: Vec<f64> = (0..19).flat_map(|y| plane.pix[y * 32 + 21..y * 32 + 32].to_vec()).collect();
        assert_eq!(padding_before, padding_after);
    }

    #[test]
    fn samples_stay_in_range() {
        let mut plane = Plane::new(32, 32);
        plane.pix.fill(254.0);
        let bits = random_bits(16, 7);
        let config = EmbedConfig { delta: 60.0, ..EmbedConfig::default() };
        embed_bits(&mut plane, &bits, &config).unwrap();
        assert!(plane.pix.iter().all(|&v| (0.0..=255.0).contains(&v)));
    }

    #[test]
    fn extract_is_capped_by_capacity() {
        let plane = textured_plane(24, 8, 8);
        assert_eq!(extract_bits(&plane, 1000).len(), 3);
        assert!(extract_bits(&plane, 0).is_empty());
        assert!(extract_bits(&Plane::new(7, 100), 10).is_empty());
    }

    #[test]
    fn survives_rounding_to_integers() {
        let mut plane = textured_plane(64, 64, 9);
        let bits = random_bits(64, 10);
        embed_bits(&mut plane, &bits, &EmbedConfig::default()).unwrap();
        for v in plane.pix.iter_mut() {
            *v = v.round();
        }
        assert_eq!(extract_bits(&plane, 64), bits);
    }
}
