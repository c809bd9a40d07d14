// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Orthonormal 8×8 DCT-II and its inverse on `f64` blocks.
//!
//! Blocks are 64 values in natural (row-major) order. In the frequency domain
//! the index is `row_freq * 8 + col_freq`. Both directions are computed as two
//! separable 1-D passes over a cosine table that is built once per process.

use std::sync::OnceLock;

/// An 8×8 block of samples or coefficients.
pub type Block = [f64; 64];

/// Pre-computed cosine table.
/// `COSINE[u][x] = cos((2*x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; 8]; 8]> = OnceLock::new();

/// Normalization constants: C(0) = sqrt(1/8), C(u>0) = sqrt(2/8).
static NORM: OnceLock<[f64; 8]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; 8]; 8] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; 8]; 8];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, c) in row.iter_mut().enumerate() {
                *c = ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0).cos();
            }
        }
        table
    })
}

fn norm_table() -> &'static [f64; 8] {
    NORM.get_or_init(|| {
        let mut n = [(2.0f64 / 8.0).sqrt(); 8];
        n[0] = (1.0f64 / 8.0).sqrt();
        n
    })
}

/// Forward 2-D DCT of a spatial block (expected to be level-shifted by -128).
pub fn forward(spatial: &Block) -> Block {
    let cos = cosine_table();
    let c = norm_table();

    // Rows.
    let mut temp = [0.0f64; 64];
    for row in 0..8 {
        for u in 0..8 {
            let mut sum = 0.0;
            for x in 0..8 {
                sum += spatial[row * 8 + x] * cos[u][x];
            }
            temp[row * 8 + u] = c[u] * sum;
        }
    }

    // Columns.
    let mut coeffs = [0.0f64; 64];
    for col in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0;
            for y in 0..8 {
                sum += temp[y * 8 + col] * cos[v][y];
            }
            coeffs[v * 8 + col] = c[v] * sum;
        }
    }

    coeffs
}

/// Inverse 2-D DCT back to the (level-shifted) spatial domain.
pub fn inverse(coeffs: &Block) -> Block {
    let cos = cosine_table();
    let c = norm_table();

    // Columns: sum over row frequencies.
    let mut temp = [0.0f64; 64];
    for col in 0..8 {
        for y in 0..8 {
            let mut sum = 0.0;
            for v in 0..8 {
                sum += c[v] * coeffs[v * 8 + col] * cos[v][y];
            }
            temp[y * 8 + col] = sum;
        }
    }

    // Rows: sum over column frequencies.
    let mut spatial = [0.0f64; 64];
    for row in 0..8 {
        for x in 0..8 {
            let mut sum = 0.0;
            for u in 0..8 {
                sum += c[u] * temp[row * 8 + u] * cos[u][x];
            }
            spatial[row * 8 + x] = sum;
        }
    }

    spatial
}
