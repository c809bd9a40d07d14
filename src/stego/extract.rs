// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Progressive frame extraction.
//!
//! The payload length is unknown until the header has been read, so the
//! extractor first reads just enough bits for a header, then exactly the
//! number of bits the header says the whole frame occupies. Failures along
//! the way move it through a small, bounded set of stages:
//!
//! ```text
//! HeaderProbe --miss--> FullRescan --miss--> error
//!      |                    |
//!      +------ hit ---------+--> Frame --> Done
//!      |                    |
//!      +-- other scheme ----+--> SchemeRetry --> Frame --> Done
//! ```
//!
//! At most [`MAX_ATTEMPTS`] header-locating attempts are made.

use crate::raster::ycbcr::Plane;
use crate::stego::capacity::{capacity_bits, frame_bits};
use crate::stego::ecc::EccScheme;
use crate::stego::embedding::extract_bits;
use crate::stego::error::{FrameError, StegoError};
use crate::stego::frame::{parse_frame, peek_header, HEADER_SIZE};

/// Upper bound on header-locating attempts (probe, rescan, scheme retry).
pub const MAX_ATTEMPTS: usize = 3;

/// Something bits can be read from in embedding order.
pub trait BitSource {
    /// Total bits available.
    fn capacity(&self) -> usize;

    /// The first `min(max_bits, capacity)` bits.
    fn read(&self, max_bits: usize) -> Vec<bool>;
}

impl BitSource for Plane {
    fn capacity(&self) -> usize {
        capacity_bits(self.width, self.height)
    }

    fn read(&self, max_bits: usize) -> Vec<bool> {
        extract_bits(self, max_bits)
    }
}

impl BitSource for [bool] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn read(&self, max_bits: usize) -> Vec<bool> {
        self[..max_bits.min(self.len())].to_vec()
    }
}

/// Extraction stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Read a header-sized window and look for the magic.
    HeaderProbe,
    /// Read every available bit and look again.
    FullRescan,
    /// The header names another scheme; re-decode the bits already read with it.
    SchemeRetry(EccScheme),
    /// Header located; read and verify the whole frame.
    Frame { payload_len: u32 },
    /// Payload recovered.
    Done(Vec<u8>),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Self::HeaderProbe => "header-probe",
            Self::FullRescan => "full-rescan",
            Self::SchemeRetry(_) => "scheme-retry",
            Self::Frame { .. } => "frame",
            Self::Done(_) => "done",
        }
    }
}

/// Recover the payload embedded in `source`.
///
/// # Errors
/// - [`StegoError::InsufficientBits`] if the source holds less than one codeword.
/// - [`StegoError::CapacityExceeded`] if the header declares a frame larger
///   than the source.
/// - [`StegoError::UnsupportedScheme`] if the header names an unknown scheme.
/// - [`StegoError::CrcMismatch`] if the payload checksum does not match.
/// - [`StegoError::FrameCorrupt`] for any other structural failure once the
///   retries are exhausted.
pub fn extract_frame<S: BitSource + ?Sized>(source: &S) -> Result<Vec<u8>, StegoError> {
    let mut extractor = Extractor {
        source,
        capacity: source.capacity(),
        scheme: EccScheme::default(),
        bits: Vec::new(),
        attempts: 0,
    };

    let mut stage = Stage::HeaderProbe;
    loop {
        log::trace!("extract stage: {}", stage.name());
        stage = match stage {
            Stage::Done(payload) => {
                log::debug!(
                    "extracted {} byte payload after {} attempt(s)",
                    payload.len(),
                    extractor.attempts
                );
                return Ok(payload);
            }
            other => extractor.step(other)?,
        };
    }
}

/// Recover the payload embedded in a luminance plane.
pub fn extract_from_plane(plane: &Plane) -> Result<Vec<u8>, StegoError> {
    extract_frame(plane)
}

struct Extractor<'a, S: BitSource + ?Sized> {
    source: &'a S,
    capacity: usize,
    scheme: EccScheme,
    /// Bits read by the latest attempt.
    bits: Vec<bool>,
    attempts: usize,
}

impl<S: BitSource + ?Sized> Extractor<'_, S> {
    fn step(&mut self, stage: Stage) -> Result<Stage, StegoError> {
        match stage {
            Stage::HeaderProbe => {
                self.begin_attempt()?;
                let window = frame_bits(0, self.scheme.expansion()).min(self.capacity);
                self.bits = self.source.read(window);
                self.locate_header(Some(Stage::FullRescan))
            }
            Stage::FullRescan => {
                self.begin_attempt()?;
                log::debug!("header not found in probe window, rescanning all {} bits", self.capacity);
                self.bits = self.source.read(self.capacity);
                self.locate_header(None)
            }
            Stage::SchemeRetry(scheme) => {
                self.begin_attempt()?;
                log::debug!("header declares {scheme}, re-decoding with it");
                self.scheme = scheme;
                self.locate_header(None)
            }
            Stage::Frame { payload_len } => self.read_frame(payload_len),
            done @ Stage::Done(_) => Ok(done),
        }
    }

    fn begin_attempt(&mut self) -> Result<(), StegoError> {
        if self.attempts == MAX_ATTEMPTS {
            log::warn!("giving up after {MAX_ATTEMPTS} extraction attempts");
            return Err(StegoError::FrameCorrupt(FrameError::InvalidMagic));
        }
        self.attempts += 1;
        Ok(())
    }

    /// Decode the current bits with the current scheme and look for a header.
    fn locate_header(&self, on_miss: Option<Stage>) -> Result<Stage, StegoError> {
        let decoded = self.scheme.decode_frame(&self.bits)?;

        let Some((scheme_id, payload_len)) = peek_header(&decoded) else {
            return match on_miss {
                Some(next) => Ok(next),
                None => {
                    let err = if decoded.len() < HEADER_SIZE {
                        FrameError::FrameTooShort
                    } else {
                        FrameError::InvalidMagic
                    };
                    Err(StegoError::FrameCorrupt(err))
                }
            };
        };

        if scheme_id != self.scheme.id() {
            return Ok(Stage::SchemeRetry(EccScheme::from_id(scheme_id)?));
        }
        Ok(Stage::Frame { payload_len })
    }

    fn read_frame(&mut self, payload_len: u32) -> Result<Stage, StegoError> {
        let required = frame_bits(payload_len as usize, self.scheme.expansion());
        if required > self.capacity {
            log::warn!("header declares {payload_len} byte payload, needs {required} of {} bits", self.capacity);
            return Err(StegoError::CapacityExceeded { required, available: self.capacity });
        }

        if self.bits.len() >= required {
            self.bits.truncate(required);
        } else {
            self.bits = self.source.read(required);
        }

        let decoded = self.scheme.decode_frame(&self.bits)?;
        match parse_frame(&decoded) {
            Ok((_, payload)) => Ok(Stage::Done(payload.to_vec())),
            Err(FrameError::CrcMismatch) => Err(StegoError::CrcMismatch),
            Err(e) => Err(StegoError::FrameCorrupt(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::frame::build_frame;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use std::cell::Cell;

    /// Bits of an encoded frame followed by random filler up to `capacity`.
    fn stream(payload: &[u8], scheme_id: u8, capacity: usize, seed: u64) -> Vec<bool> {
        let mut bits = EccScheme::Repetition3.encode_frame(&build_frame(payload, scheme_id));
        assert!(bits.len() <= capacity);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        bits.extend((bits.len()..capacity).map(|_| rng.gen::<bool>()));
        bits
    }

    struct Counting<'a> {
        bits: &'a [bool],
        reads: Cell<usize>,
    }

    impl BitSource for Counting<'_> {
        fn capacity(&self) -> usize {
            self.bits.len()
        }

        fn read(&self, max_bits: usize) -> Vec<bool> {
            self.reads.set(self.reads.get() + 1);
            self.bits.read(max_bits)
        }
    }

    #[test]
    fn recovers_payload_with_trailing_noise() {
        let bits = stream(b"hello", 1, 16384, 1);
        assert_eq!(extract_frame(&bits[..]).unwrap(), b"hello");
    }

    #[test]
    fn exact_fit() {
        let payload = [0xA5u8; 26];
        let bits = stream(&payload, 1, (HEADER_SIZE + 26) * 24, 2);
        assert_eq!(extract_frame(&bits[..]).unwrap(), payload);
    }

    #[test]
    fn empty_payload() {
        let bits = stream(b"", 1, HEADER_SIZE * 24, 3);
        assert_eq!(extract_frame(&bits[..]).unwrap(), b"");
    }

    #[test]
    fn success_takes_two_reads() {
        let bits = stream(b"two passes", 1, 4096, 4);
        let source = Counting { bits: &bits, reads: Cell::new(0) };
        assert_eq!(extract_frame(&source).unwrap(), b"two passes");
        assert_eq!(source.reads.get(), 2);
    }

    #[test]
    fn missing_header_rescans_then_fails() {
        let bits = vec![false; 4096];
        let source = Counting { bits: &bits, reads: Cell::new(0) };
        assert!(matches!(
            extract_frame(&source),
            Err(StegoError::FrameCorrupt(FrameError::InvalidMagic))
        ));
        assert_eq!(source.reads.get(), 2);
    }

    #[test]
    fn too_few_bits_for_a_header() {
        let bits = vec![true; 100];
        assert!(matches!(
            extract_frame(&bits[..]),
            Err(StegoError::FrameCorrupt(FrameError::FrameTooShort))
        ));
    }

    #[test]
    fn too_few_bits_for_a_codeword() {
        let bits = vec![true; 2];
        assert!(matches!(extract_frame(&bits[..]), Err(StegoError::InsufficientBits)));
        assert!(matches!(extract_frame(&[false; 0][..]), Err(StegoError::InsufficientBits)));
    }

    #[test]
    fn declared_length_beyond_capacity() {
        let full = stream(&[1u8; 100], 1, (HEADER_SIZE + 100) * 24, 5);
        let truncated = &full[..500];
        match extract_frame(truncated) {
            Err(StegoError::CapacityExceeded { required, available }) => {
                assert_eq!(required, (HEADER_SIZE + 100) * 24);
                assert_eq!(available, 500);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn tampered_payload_reports_crc_mismatch() {
        let mut bits = stream(b"integrity", 1, 2048, 6);
        // Flip all three copies of the first payload bit.
        let first = HEADER_SIZE * 8 * 3;
        for b in &mut bits[first..first + 3] {
            *b = !*b;
        }
        assert!(matches!(extract_frame(&bits[..]), Err(StegoError::CrcMismatch)));
    }

    #[test]
    fn single_copy_errors_are_corrected() {
        let mut bits = stream(b"noisy", 1, 2048, 7);
        let frame_len = (HEADER_SIZE + 5) * 8 * 3;
        for i in (0..frame_len).step_by(3) {
            bits[i] = !bits[i];
        }
        assert_eq!(extract_frame(&bits[..]).unwrap(), b"noisy");
    }

    #[test]
    fn unknown_declared_scheme() {
        let bits = stream(b"future", 7, 2048, 8);
        assert!(matches!(extract_frame(&bits[..]), Err(StegoError::UnsupportedScheme(7))));
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::HeaderProbe.name(), "header-probe");
        assert_eq!(Stage::SchemeRetry(EccScheme::Repetition3).name(), "scheme-retry");
        assert_eq!(Stage::Done(Vec::new()).name(), "done");
    }
}
