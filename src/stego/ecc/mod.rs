// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error-correcting codes applied to whole frames.
//!
//! A scheme turns frame bytes into the bit stream written into the image and
//! back. The wire identifier of the active scheme is stored in the frame
//! header so an extractor can switch schemes after reading it.

pub mod repetition;

use crate::stego::bits::{bits_to_bytes, bytes_to_bits};
use crate::stego::error::EccError;
use crate::stego::frame::HEADER_SIZE;

/// Supported ECC schemes, keyed by their wire identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EccScheme {
    /// Every bit repeated three times, majority vote on decode.
    #[default]
    Repetition3,
}

impl EccScheme {
    /// Look up a scheme by the identifier stored in the frame header.
    pub fn from_id(id: u8) -> Result<Self, EccError> {
        match id {
            1 => Ok(Self::Repetition3),
            other => Err(EccError::UnsupportedScheme(other)),
        }
    }

    /// Identifier written into the frame header.
    pub fn id(self) -> u8 {
        match self {
            Self::Repetition3 => 1,
        }
    }

    /// Encode frame bytes into the bit stream to embed.
    pub fn encode_frame(self, frame: &[u8]) -> Vec<bool> {
        let bits = bytes_to_bits(frame);
        match self {
            Self::Repetition3 => repetition::encode(&bits),
        }
    }

    /// Decode an extracted bit stream back into frame bytes.
    ///
    /// The output may be longer than the real frame (zero-padded trailing
    /// byte, or bits read past the end of the frame); the frame header's
    /// length field decides what is meaningful.
    pub fn decode_frame(self, bits: &[bool]) -> Result<Vec<u8>, EccError> {
        let data = match self {
            Self::Repetition3 => repetition::decode(bits)?,
        };
        Ok(bits_to_bytes(&data))
    }

    /// Encoded bits per data bit, measured by encoding a dummy
    /// `HEADER_SIZE + 1` byte frame so callers stay independent of scheme internals.
    pub fn expansion(self) -> usize {
        let probe = [0u8; HEADER_SIZE + 1];
        self.encode_frame(&probe).len() / (probe.len() * 8)
    }
}

impl std::fmt::Display for EccScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repetition3 => write!(f, "repetition-3"),
        }
    }
}
