// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # emganography
//!
//! Hides arbitrary bytes in the luminance of PNG and JPEG images. Each whole
//! 8×8 block carries one bit, encoded as the ordering of the DCT coefficients
//! at (2,2) and (2,3). The payload is framed with a length and CRC-32 and
//! protected by a repetition-3 code, so a mildly recompressed JPEG still
//! decodes.
//!
//! The image container layer (`raster` module) decodes and encodes through
//! the `image` crate. The steganography layer (`stego` module) is pure Rust
//! apart from `crc32fast`, with optional Rayon parallelism.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use emganography::{embed, extract, EmbedOptions};
//!
//! let cover = std::fs::read("photo.png").unwrap();
//! let stego = embed(&cover, b"secret message", &EmbedOptions::default()).unwrap();
//! let decoded = extract(&stego).unwrap();
//! assert_eq!(decoded, b"secret message");
//! ```

pub mod raster;
pub mod stego;

pub use raster::error::RasterError;
pub use raster::OutputFormat;
pub use stego::{capacity_info, capacity_info_file, embed, embed_file, extract, extract_file};
pub use stego::{CapacityInfo, EccScheme, EmbedConfig, EmbedOptions, StegoError};
