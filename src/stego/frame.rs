// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload frame construction and parsing.
//!
//! The frame is the self-describing unit that gets ECC-encoded and embedded:
//!
//! ```text
//! [4 bytes ] magic "EMG0"
//! [1 byte  ] version (0x01)
//! [1 byte  ] ECC scheme id
//! [2 bytes ] reserved (zero)
//! [4 bytes ] payload length (big-endian u32)
//! [4 bytes ] CRC-32 (IEEE) of the payload only (big-endian)
//! [N bytes ] payload
//! ```

use crate::stego::error::FrameError;

/// Frame magic.
pub const MAGIC: [u8; 4] = *b"EMG0";

/// Current frame format version.
pub const VERSION: u8 = 0x01;

/// Fixed header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Byte range of the big-endian payload length inside the header.
pub const LENGTH_OFFSET: usize = 8;

/// Parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u8,
    pub ecc_scheme: u8,
    pub reserved: [u8; 2],
    pub payload_len: u32,
    pub payload_crc32: u32,
}

impl Header {
    /// Total frame size (header + payload) this header describes.
    pub fn frame_len(&self) -> usize {
        HEADER_SIZE + self.payload_len as usize
    }
}

/// Build a frame around `payload`, tagging it with `ecc_scheme`.
///
/// # Panics
/// Debug builds assert that the payload length fits in a `u32`.
pub fn build_frame(payload: &[u8], ecc_scheme: u8) -> Vec<u8> {
    debug_assert!(u32::try_from(payload.len()).is_ok(), "payload exceeds u32 length field");

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(&MAGIC);
    frame.push(VERSION);
    frame.push(ecc_scheme);
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&crc32fast::hash(payload).to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Read the scheme id and payload length without validating the payload.
///
/// Used by the extractor to size its second pass. Returns `None` if fewer
/// than [`HEADER_SIZE`] bytes are available or the magic does not match.
pub fn peek_header(data: &[u8]) -> Option<(u8, u32)> {
    if data.len() < HEADER_SIZE || data[..4] != MAGIC {
        return None;
    }
    Some((data[5], read_u32(data, LENGTH_OFFSET)))
}

/// Parse a frame, verifying magic, length and CRC.
///
/// `data` may be longer than the frame (e.g. bits decoded past the end);
/// the header's length field decides where the payload stops. The returned
/// payload borrows from `data`.
///
/// # Errors
/// - [`FrameError::FrameTooShort`] if `data` is shorter than a header.
/// - [`FrameError::InvalidMagic`] if the first four bytes are wrong.
/// - [`FrameError::InvalidLength`] if the payload would run past the end of `data`.
/// - [`FrameError::CrcMismatch`] if the payload checksum does not match.
pub fn parse_frame(data: &[u8]) -> Result<(Header, &[u8]), FrameError> {
    if data.len() < HEADER_SIZE {
        return Err(FrameError::FrameTooShort);
    }
    if data[..4] != MAGIC {
        return Err(FrameError::InvalidMagic);
    }

    let header = Header {
        magic: MAGIC,
        version: data[4],
        ecc_scheme: data[5],
        reserved: [data[6], data[7]],
        payload_len: read_u32(data, LENGTH_OFFSET),
        payload_crc32: read_u32(data, 12),
    };

    let end = HEADER_SIZE
        .checked_add(header.payload_len as usize)
        .ok_or(FrameError::InvalidLength)?;
    if data.len() < end {
        return Err(FrameError::InvalidLength);
    }
    let payload = &data[HEADER_SIZE..end];

    if crc32fast::hash(payload) != header.payload_crc32 {
        return Err(FrameError::CrcMismatch);
    }

    Ok((header, payload))
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}
