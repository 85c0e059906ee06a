//! Per-candidate heterodyne and decimation.
//!
//! The candidate's band is shifted so its tones land at baseband multiples
//! of the symbol rate, then the stream is decimated to `ndownsps` samples
//! per symbol. No anti-alias filter is applied before decimation; symbol
//! recovery is verified end-to-end rather than on the intermediate spectrum.

use rustfft::num_complex::Complex32;

use crate::constants::ModeParams;

/// Mix `audio` down around `center_freq` and decimate by `nsps / ndownsps`.
///
/// The mixer frequency is `center_freq - fs/2`; because the decimation
/// factor is even, the fs/2 component is an integer number of cycles between
/// retained samples and the candidate's tones land at `tone * fs / nsps` Hz
/// in the output. Phase is accumulated in f64 so long buffers do not drift.
pub fn downmix(
    audio: &[f32],
    center_freq: f32,
    sample_rate: u32,
    params: &ModeParams,
    out: &mut Vec<Complex32>,
) {
    out.clear();
    let factor = params.downsample_factor();
    let shift = (center_freq - sample_rate as f32 / 2.0) as f64;
    let step = -std::f64::consts::TAU * shift * factor as f64 / sample_rate as f64;

    let mut phase = 0.0f64;
    for &sample in audio.iter().step_by(factor) {
        let (sin, cos) = phase.sin_cos();
        out.push(Complex32::new(sample * cos as f32, sample * sin as f32));
        phase += step;
        if phase.abs() > std::f64::consts::TAU {
            phase %= std::f64::consts::TAU;
        }
    }
}
