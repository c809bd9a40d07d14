// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from image decoding through
//! bit extraction and frame validation. The lower layers have their own
//! narrower enums ([`FrameError`], [`EccError`]) which convert into it.

use core::fmt;

use crate::raster::error::RasterError;

/// Structural or integrity failure while parsing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer bytes than a full header.
    FrameTooShort,
    /// The first four bytes are not the frame magic.
    InvalidMagic,
    /// The declared payload length runs past the end of the data.
    InvalidLength,
    /// The payload checksum does not match the header.
    CrcMismatch,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameTooShort => write!(f, "frame too short"),
            Self::InvalidMagic => write!(f, "invalid frame magic"),
            Self::InvalidLength => write!(f, "invalid payload length"),
            Self::CrcMismatch => write!(f, "CRC32 checksum mismatch"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Failure inside an error-correcting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccError {
    /// The scheme identifier is not one this build understands.
    UnsupportedScheme(u8),
    /// Not enough encoded bits to decode even one data bit.
    InsufficientBits,
}

impl fmt::Display for EccError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedScheme(id) => write!(f, "unsupported ECC scheme: {id}"),
            Self::InsufficientBits => write!(f, "insufficient bits for decoding"),
        }
    }
}

impl std::error::Error for EccError {}

/// Errors that can occur during embedding, extraction or capacity queries.
#[derive(Debug)]
pub enum StegoError {
    /// The cover image could not be decoded or the result could not be encoded.
    InvalidImage(RasterError),
    /// The encoded frame needs more bits than the image has blocks.
    MessageTooLong,
    /// An extracted header declares a frame larger than the image can hold.
    CapacityExceeded {
        /// Encoded bits the declared frame would need.
        required: usize,
        /// Bits available in the image.
        available: usize,
    },
    /// Fewer than one ECC codeword could be read.
    InsufficientBits,
    /// Unknown ECC scheme identifier.
    UnsupportedScheme(u8),
    /// Frame magic mismatch.
    InvalidMagic,
    /// Frame declares more payload than was extracted.
    InvalidLength,
    /// Frame shorter than its header.
    FrameTooShort,
    /// Payload checksum mismatch.
    CrcMismatch,
    /// Structural parse failure after all extraction attempts were exhausted.
    FrameCorrupt(FrameError),
    /// Embedding parameters that would make bits unreadable.
    InvalidConfig(&'static str),
    /// Reading or writing a file failed.
    Io(std::io::Error),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage(e) => write!(f, "invalid image: {e}"),
            Self::MessageTooLong => write!(f, "message too long for image capacity"),
            Self::CapacityExceeded { required, available } => write!(
                f,
                "frame requires {required} bits but capacity is only {available}"
            ),
            Self::InsufficientBits => write!(f, "insufficient bits for decoding"),
            Self::UnsupportedScheme(id) => write!(f, "unsupported ECC scheme: {id}"),
            Self::InvalidMagic => write!(f, "invalid frame magic"),
            Self::InvalidLength => write!(f, "invalid payload length"),
            Self::FrameTooShort => write!(f, "frame too short"),
            Self::CrcMismatch => write!(f, "CRC32 checksum mismatch"),
            Self::FrameCorrupt(e) => write!(f, "extracted frame is corrupted: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage(e) => Some(e),
            Self::FrameCorrupt(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RasterError> for StegoError {
    fn from(e: RasterError) -> Self {
        Self::InvalidImage(e)
    }
}

impl From<EccError> for StegoError {
    fn from(e: EccError) -> Self {
        match e {
            EccError::UnsupportedScheme(id) => Self::UnsupportedScheme(id),
            EccError::InsufficientBits => Self::InsufficientBits,
        }
    }
}

impl From<FrameError> for StegoError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::FrameTooShort => Self::FrameTooShort,
            FrameError::InvalidMagic => Self::InvalidMagic,
            FrameError::InvalidLength => Self::InvalidLength,
            FrameError::CrcMismatch => Self::CrcMismatch,
        }
    }
}

impl From<std::io::Error> for StegoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_errors_map_one_to_one() {
        assert!(matches!(StegoError::from(FrameError::CrcMismatch), StegoError::CrcMismatch));
        assert!(matches!(StegoError::from(FrameError::InvalidMagic), StegoError::InvalidMagic));
        assert!(matches!(StegoError::from(FrameError::InvalidLength), StegoError::InvalidLength));
        assert!(matches!(StegoError::from(FrameError::FrameTooShort), StegoError::FrameTooShort));
    }

    #[test]
    fn ecc_errors_map_one_to_one() {
        assert!(matches!(StegoError::from(EccError::UnsupportedScheme(9)), StegoError::UnsupportedScheme(9)));
        assert!(matches!(StegoError::from(EccError::InsufficientBits), StegoError::InsufficientBits));
    }

    #[test]
    fn wrapped_errors_expose_source() {
        use std::error::Error;
        let e = StegoError::FrameCorrupt(FrameError::InvalidLength);
        assert_eq!(e.source().map(|s| s.to_string()), Some("invalid payload length".to_string()));
        let e = StegoError::from(RasterError::InvalidDimensions);
        assert!(e.source().is_some());
        assert!(StegoError::MessageTooLong.source().is_none());
    }

    #[test]
    fn capacity_exceeded_message() {
        let e = StegoError::CapacityExceeded { required: 600, available: 400 };
        assert_eq!(e.to_string(), "frame requires 600 bits but capacity is only 400");
    }
}
