//! Tone-sequence to waveform synthesis.
//!
//! Continuous-phase 8-FSK: tone `t` transmits at `base_freq + t * fs/nsps`
//! for `nsps` samples, with the oscillator phase carried across symbol
//! boundaries so there are no discontinuities (and no splatter) at symbol
//! edges.

use crate::constants::{Mode, NN};

/// Peak amplitude of the synthesized waveform.
const AMPLITUDE: f32 = 0.5;

/// Synthesize the audio waveform for a 79-tone frame.
///
/// Returns `79 * nsps` samples at `sample_rate`.
pub fn waveform(tones: &[u8; NN], base_freq: f32, sample_rate: u32, mode: Mode) -> Vec<f32> {
    let nsps = mode.params().nsps;
    let spacing = sample_rate as f64 / nsps as f64;

    let mut samples = Vec::with_capacity(NN * nsps);
    let mut phase = 0.0f64;
    for &tone in tones.iter() {
        let freq = base_freq as f64 + tone as f64 * spacing;
        let step = std::f64::consts::TAU * freq / sample_rate as f64;
        for _ in 0..nsps {
            samples.push(AMPLITUDE * phase.sin() as f32);
            phase += step;
            if phase > std::f64::consts::TAU {
                phase -= std::f64::consts::TAU;
            }
        }
    }
    samples
}

/// Total samples one frame occupies at the given rate.
pub fn frame_samples(mode: Mode) -> usize {
    NN * mode.params().nsps
}
