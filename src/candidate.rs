//! Candidate signal detection.
//!
//! A candidate is a spectral bin whose power stands far enough above the
//! fitted noise baseline inside the 200–3000 Hz search band. Candidates are
//! ranked by SNR and capped, and each one is handed to the synchronizer.

use crate::constants::{FREQ_MAX, FREQ_MIN, NMAXCAND};

/// A spectral peak worth attempting to demodulate.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// Centre frequency in Hz.
    pub freq: f32,
    /// Excess over the baseline in dB.
    pub snr: f32,
    /// Spectrum bin index.
    pub bin: usize,
}

/// Scan `spectrum` against `baseline` and emit candidates above `threshold`
/// dB, sorted by descending SNR and capped at [`NMAXCAND`].
pub fn find_candidates(
    spectrum: &[f32],
    baseline: &[f32],
    df: f32,
    threshold: f32,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (bin, (&power, &floor)) in spectrum.iter().zip(baseline.iter()).enumerate() {
        let freq = bin as f32 * df;
        if !(FREQ_MIN..=FREQ_MAX).contains(&freq) {
            continue;
        }
        let signal_db = 10.0 * power.max(1e-10).log10();
        let snr = signal_db - floor;
        if snr > threshold {
            candidates.push(Candidate { freq, snr, bin });
        }
    }

    candidates.sort_by(|a, b| b.snr.partial_cmp(&a.snr).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(NMAXCAND);
    candidates
}
