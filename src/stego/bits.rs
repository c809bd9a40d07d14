// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! MSB-first conversion between bytes and individual bits.

/// Convert bytes to bits, most significant bit of each byte first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1 == 1);
        }
    }
    bits
}

/// Pack bits (MSB first) back into bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit as u8) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn bytes_bits_roundtrip() {
        let original = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let bits = bytes_to_bits(&original);
        assert_eq!(bits.len(), 32);
        assert_eq!(bits_to_bytes(&bits), original);
    }

    #[test]
    fn random_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for len in [1usize, 3, 16, 255, 1000] {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            assert_eq!(bits_to_bytes(&bytes_to_bits(&data)), data, "len {len}");
        }
    }

    #[test]
    fn msb_first() {
        let bits = bytes_to_bits(&[0x80, 0x01]);
        assert!(bits[0]);
        assert!(bits[1..15].iter().all(|&b| !b));
        assert!(bits[15]);
    }

    #[test]
    fn empty_input() {
        assert!(bytes_to_bits(&[]).is_empty());
        assert!(bits_to_bytes(&[]).is_empty());
    }

    #[test]
    fn partial_byte_zero_padded() {
        // 10110 -> 10110_000
        let bytes = bits_to_bytes(&[true, false, true, true, false]);
        assert_eq!(bytes, vec![0xB0]);
    }
}
