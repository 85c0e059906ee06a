//! 8-FSK data demodulation and soft-bit extraction.
//!
//! The 58 data symbols sit at frame positions 7-35 and 43-71 (between the
//! Costas pilots). Each symbol is correlated against all eight tone
//! templates; the squared magnitudes feed both the hard tone decision and
//! the per-bit log-likelihood ratios.
//!
//! Bit order within a symbol is MSB-first: bit 2 of the tone index is the
//! first of the symbol's three coded bits, so the 174 LLRs come out
//! symbol-major in codeword bit order.

use rustfft::num_complex::Complex32;

use crate::constants::{N, ND};
use crate::sync::ToneBank;

/// Soft-output clip for a single bit LLR.
const LLR_CLIP: f32 = 19.0;

/// Floor added to tone powers so an all-zero symbol cannot produce
/// log-of-zero.
const POWER_FLOOR: f32 = 1e-12;

/// Frame symbol position of data symbol `j` (skips the middle pilot).
fn data_position(j: usize) -> usize {
    if j < 29 {
        7 + j
    } else {
        43 + (j - 29)
    }
}

/// Demodulate the 58 data symbols of a synchronized frame.
///
/// `offset` is the frame start in `y` (as chosen by the synchronizer).
/// Fills `llr` with 174 soft bits (positive favoring bit 1) and returns the
/// hard tone decisions.
pub fn soft_demod(
    y: &[Complex32],
    offset: usize,
    bank: &ToneBank,
    llr: &mut [f32; N],
) -> [u8; ND] {
    let ndownsps = bank.ndownsps();
    let mut hard = [0u8; ND];

    for j in 0..ND {
        let symbol_offset = offset + data_position(j) * ndownsps;

        let mut powers = [POWER_FLOOR; 8];
        if symbol_offset < y.len() {
            for (tone, power) in powers.iter_mut().enumerate() {
                *power += bank.correlate(y, symbol_offset, tone as u8).norm_sqr();
            }
        }

        let best = powers
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(t, _)| t)
            .unwrap_or(0);
        hard[j] = best as u8;

        for b in 0..3 {
            let mask = 1usize << (2 - b);
            let mut one = 0.0f32;
            let mut zero = 0.0f32;
            for (tone, &power) in powers.iter().enumerate() {
                if tone & mask != 0 {
                    one += power;
                } else {
                    zero += power;
                }
            }
            llr[j * 3 + b] = (one.ln() - zero.ln()).clamp(-LLR_CLIP, LLR_CLIP);
        }
    }

    hard
}
