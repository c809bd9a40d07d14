// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity calculation.
//!
//! One bit per whole 8×8 block. A trailing partial block row or column is
//! ignored. The payload capacity subtracts the frame header after dividing
//! by the ECC expansion factor.

use crate::stego::ecc::EccScheme;
use crate::stego::frame::HEADER_SIZE;

/// Raw embeddable bits for a `width × height` plane: one per whole block.
pub fn capacity_bits(width: usize, height: usize) -> usize {
    (width / 8) * (height / 8)
}

/// Capacity snapshot for one image under one ECC scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInfo {
    pub width: usize,
    pub height: usize,
    /// Whole 8×8 blocks horizontally.
    pub blocks_across: usize,
    /// Whole 8×8 blocks vertically.
    pub blocks_down: usize,
    /// One bit per block.
    pub capacity_bits: usize,
    /// Largest payload that fits after header and ECC overhead.
    pub max_payload_bytes: usize,
    /// Conservative estimate assuming 1.5 bytes per UTF-8 character.
    pub max_utf8_chars: usize,
    /// Encoded bits per frame bit under the chosen scheme.
    pub expansion: usize,
}

impl CapacityInfo {
    /// Compute the capacity of a `width × height` image under `ecc`.
    pub fn new(width: usize, height: usize, ecc: EccScheme) -> Self {
        let blocks_across = width / 8;
        let blocks_down = height / 8;
        let capacity_bits = blocks_across * blocks_down;
        let expansion = ecc.expansion();
        let max_payload_bytes = max_payload_bytes(capacity_bits, expansion);

        Self {
            width,
            height,
            blocks_across,
            blocks_down,
            capacity_bits,
            max_payload_bytes,
            max_utf8_chars: (max_payload_bytes as f64 / 1.5) as usize,
            expansion,
        }
    }

    /// Whether a payload of `len` bytes fits, header included.
    ///
    /// Unlike `len <= max_payload_bytes` this is also false for an empty
    /// payload when not even the header fits.
    pub fn fits(&self, len: usize) -> bool {
        frame_bits(len, self.expansion) <= self.capacity_bits
    }
}

/// `max(0, floor(capacity_bits / (8 * expansion)) - HEADER_SIZE)`.
pub fn max_payload_bytes(capacity_bits: usize, expansion: usize) -> usize {
    let max_frame_bytes = capacity_bits / (8 * expansion.max(1));
    max_frame_bytes.saturating_sub(HEADER_SIZE)
}

/// Encoded bits needed to embed a frame carrying `payload_len` bytes.
pub fn frame_bits(payload_len: usize, expansion: usize) -> usize {
    HEADER_SIZE
        .saturating_add(payload_len)
        .saturating_mul(8 * expansion)
}
