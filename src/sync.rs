//! Costas-array synchronization.
//!
//! **Frame structure**: three 7-symbol Costas pilots at symbol positions
//! 0-6, 36-42 and 72-78 bracket two 29-symbol data runs.
//!
//! The synchronizer slides a quarter-symbol offset grid over the decimated
//! candidate stream, correlating the three pilot positions against their
//! expected tone sequences, then refines the winner on a single-sample grid.
//!
//! Per-symbol correlations are normalized by the symbol energy, so a
//! perfectly matched pilot scores 7.0 and noise hovers near 1.1; the accept
//! threshold [`ASYNCMIN`](crate::constants::ASYNCMIN) sits between the two.

use rustfft::num_complex::Complex32;
use tracing::trace;

use crate::constants::{ASYNCMIN, NN};

/// Precomputed complex tone templates at the decimated rate.
///
/// Template `t` advances `t` cycles per symbol (`t / ndownsps` cycles per
/// sample), matching the tone spacing of one symbol rate. Shared by the
/// synchronizer and the data demodulator.
pub struct ToneBank {
    templates: [Vec<Complex32>; 8],
    ndownsps: usize,
}

impl ToneBank {
    pub fn new(ndownsps: usize) -> Self {
        let templates = std::array::from_fn(|tone| {
            (0..ndownsps)
                .map(|s| {
                    let phase =
                        -std::f32::consts::TAU * tone as f32 * s as f32 / ndownsps as f32;
                    Complex32::new(phase.cos(), phase.sin())
                })
                .collect()
        });
        Self { templates, ndownsps }
    }

    /// Samples per symbol at the decimated rate.
    pub fn ndownsps(&self) -> usize {
        self.ndownsps
    }

    /// Correlate one symbol of `y` starting at `offset` against `tone`.
    pub fn correlate(&self, y: &[Complex32], offset: usize, tone: u8) -> Complex32 {
        let template = &self.templates[tone as usize];
        y[offset..]
            .iter()
            .take(self.ndownsps)
            .zip(template.iter())
            .map(|(a, b)| a * b)
            .sum()
    }
}

/// Costas correlation score at offset `o`, averaged over the three pilots.
pub fn sync_score(y: &[Complex32], o: usize, bank: &ToneBank, costas: &[[u8; 7]; 3]) -> f32 {
    let ndownsps = bank.ndownsps();
    let mut total = 0.0f32;
    for (p, pilot) in costas.iter().enumerate() {
        let mut pilot_score = 0.0f32;
        for (k, &tone) in pilot.iter().enumerate() {
            let offset = o + (p * 36 + k) * ndownsps;
            if offset + ndownsps > y.len() {
                continue;
            }
            let corr = bank.correlate(y, offset, tone).norm();
            let energy: f32 =
                y[offset..offset + ndownsps].iter().map(|c| c.norm_sqr()).sum();
            if energy > 1e-12 {
                pilot_score += corr / (ndownsps as f32 * energy).sqrt();
            }
        }
        total += pilot_score;
    }
    total / 3.0
}

/// Best frame offset into `y`, by coarse quarter-symbol search followed by a
/// single-sample refinement around the winner.
///
/// Returns `(offset, score)`; the caller compares the score against
/// `ASYNCMIN`. Returns `None` when `y` is shorter than one frame.
pub fn find_sync(y: &[Complex32], bank: &ToneBank, costas: &[[u8; 7]; 3]) -> Option<(usize, f32)> {
    let ndownsps = bank.ndownsps();
    let frame_len = NN * ndownsps;
    if y.len() < frame_len {
        return None;
    }
    let max_offset = y.len() - frame_len;
    let step = (ndownsps / 4).max(1);

    let mut best = (0usize, f32::MIN);
    let mut o = 0;
    while o <= max_offset {
        let score = sync_score(y, o, bank, costas);
        if score > best.1 {
            best = (o, score);
        }
        o += step;
    }

    // Fine pass on a single-sample grid around the coarse winner
    let lo = best.0.saturating_sub(step - 1);
    let hi = (best.0 + step - 1).min(max_offset);
    for o in lo..=hi {
        let score = sync_score(y, o, bank, costas);
        if score > best.1 {
            best = (o, score);
        }
    }

    trace!(offset = best.0, score = best.1, "sync search complete");
    Some(best)
}

/// True when `score` clears the sync acceptance threshold.
pub fn sync_acceptable(score: f32) -> bool {
    score > ASYNCMIN
}
