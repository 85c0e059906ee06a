//! Power-spectrum provider.
//!
//! The FFT engine is the one pluggable collaborator of the modem: the
//! decoder consumes a real power spectrum and does not care how it was
//! produced. [`FftSpectrum`] is the default provider, built on rustfft with
//! a Hann window.

use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Source of real power spectra.
///
/// `power_spectrum` returns `bins` non-negative values; bin `i` corresponds
/// to frequency `i * fs / (2 * bins)`. Implementations may window the input;
/// the caller supplies up to `2 * bins` samples and shorter inputs are
/// zero-padded.
pub trait SpectrumSource: Send {
    fn power_spectrum(&mut self, samples: &[f32], bins: usize) -> Vec<f32>;
}

/// Default rustfft-backed provider with a Hann window.
pub struct FftSpectrum {
    planner: FftPlanner<f32>,
    fft: Option<(usize, Arc<dyn Fft<f32>>)>,
    window: Vec<f32>,
    scratch: Vec<Complex32>,
}

impl FftSpectrum {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            fft: None,
            window: Vec::new(),
            scratch: Vec::new(),
        }
    }

    fn plan(&mut self, nfft: usize) -> Arc<dyn Fft<f32>> {
        match &self.fft {
            Some((len, fft)) if *len == nfft => Arc::clone(fft),
            _ => {
                let fft = self.planner.plan_fft_forward(nfft);
                self.fft = Some((nfft, Arc::clone(&fft)));
                self.window = (0..nfft)
                    .map(|i| {
                        let x = i as f32 / (nfft - 1) as f32;
                        0.5 * (1.0 - (std::f32::consts::TAU * x).cos())
                    })
                    .collect();
                fft
            }
        }
    }
}

impl Default for FftSpectrum {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectrumSource for FftSpectrum {
    fn power_spectrum(&mut self, samples: &[f32], bins: usize) -> Vec<f32> {
        let nfft = 2 * bins;
        let fft = self.plan(nfft);

        self.scratch.clear();
        self.scratch.extend(
            samples
                .iter()
                .take(nfft)
                .zip(self.window.iter())
                .map(|(&s, &w)| Complex32::new(s * w, 0.0)),
        );
        self.scratch.resize(nfft, Complex32::new(0.0, 0.0));

        fft.process(&mut self.scratch);
        self.scratch[..bins].iter().map(|c| c.norm_sqr()).collect()
    }
}

/// Average the provider's spectrum over consecutive segments of the buffer.
///
/// Covers `audio` in non-overlapping `2 * bins` windows; a trailing partial
/// segment is included zero-padded when no full segment fits.
pub fn averaged_spectrum(
    source: &mut dyn SpectrumSource,
    audio: &[f32],
    bins: usize,
) -> Vec<f32> {
    let nfft = 2 * bins;
    let mut acc = vec![0.0f32; bins];
    let mut segments = 0usize;

    let mut start = 0;
    while start + nfft <= audio.len() {
        let spectrum = source.power_spectrum(&audio[start..start + nfft], bins);
        for (a, p) in acc.iter_mut().zip(spectrum.iter()) {
            *a += p;
        }
        segments += 1;
        start += nfft;
    }
    if segments == 0 {
        return source.power_spectrum(audio, bins);
    }
    for a in acc.iter_mut() {
        *a /= segments as f32;
    }
    acc
}
