// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Repetition-3 coding with hard majority voting.
//!
//! Each data bit is written as three consecutive identical bits. Decoding
//! groups the stream into triples and takes the majority, which corrects
//! any single flipped bit per triple. Two flips in one triple decode to the
//! wrong value without any signal; the frame CRC catches that.

use crate::stego::error::EccError;

/// Copies per data bit.
pub const COPIES: usize = 3;

/// Expand every bit into `COPIES` identical bits.
pub fn encode(bits: &[bool]) -> Vec<bool> {
    let mut out = Vec::with_capacity(bits.len() * COPIES);
    for &bit in bits {
        out.extend_from_slice(&[bit; COPIES]);
    }
    out
}

/// Majority-vote each consecutive triple back into one bit.
///
/// Trailing bits that do not form a full triple are dropped.
///
/// # Errors
/// [`EccError::InsufficientBits`] if fewer than three bits are supplied.
pub fn decode(bits: &[bool]) -> Result<Vec<bool>, EccError> {
    if bits.len() < COPIES {
        return Err(EccError::InsufficientBits);
    }
    Ok(bits
        .chunks_exact(COPIES)
        .map(|triple| triple.iter().filter(|&&b| b).count() >= 2)
        .collect())
}
