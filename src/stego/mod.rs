// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding.
//!
//! A payload is wrapped in a 16-byte frame (magic, scheme id, length, CRC-32),
//! expanded with an error-correcting code, and written one bit per 8×8 block
//! of the luminance plane by ordering two mid-frequency DCT coefficients.
//! Extraction reads the header first and then exactly the frame it describes.

pub mod bits;
pub mod capacity;
pub mod config;
pub mod dct;
pub mod ecc;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod frame;
mod pipeline;

pub use capacity::CapacityInfo;
pub use config::{EmbedConfig, EmbedOptions, DEFAULT_DELTA, DEFAULT_MIN_GAP, DEFAULT_QUALITY};
pub use ecc::EccScheme;
pub use error::{EccError, FrameError, StegoError};
pub use extract::{extract_frame, extract_from_plane, BitSource};
pub use pipeline::{
    capacity_info, capacity_info_file, embed, embed_file, embed_into_plane, extract, extract_file,
};
