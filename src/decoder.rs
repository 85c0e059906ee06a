//! The receive-side decode pipeline.
//!
//! One [`Decoder`] owns a mode profile, precomputed tone templates, a
//! spectrum provider and scratch buffers, and processes one audio window per
//! [`Decoder::decode`] call:
//!
//! spectrum → baseline → candidates → per candidate: downmix → Costas sync
//! → soft demod → LDPC BP → frame unpack.
//!
//! Failures inside the candidate loop (weak sync, BP non-convergence, CRC
//! mismatch) skip that candidate silently; the caller only sees an error for
//! malformed arguments. A successful call may report zero messages.

use rustfft::num_complex::Complex32;
use tracing::{debug, trace};

use crate::baseline;
use crate::candidate::{self, Candidate};
use crate::constants::{Mode, ModeParams, ASYNCMIN, CENTER_FREQ, N, NN, SNR_THRESHOLD};
use crate::demod;
use crate::downmix;
use crate::error::Js8Error;
use crate::frame;
use crate::ldpc;
use crate::spectrum::{averaged_spectrum, FftSpectrum, SpectrumSource};
use crate::sync::{self, ToneBank};

/// Spectrum bins requested from the provider (4096-point segments).
const SPECTRUM_BINS: usize = 2048;

/// One decoded transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    /// Payload text (12 characters).
    pub message: String,
    /// Frame type (3 bits).
    pub frame_type: u8,
    /// Candidate SNR over the baseline, in dB.
    pub snr: f32,
    /// Frequency offset from the 1500 Hz centre, in Hz.
    pub freq_offset: f32,
    /// Frame start in decimated samples.
    pub timestamp: u32,
    /// Decoder confidence, 0-100.
    pub confidence: u8,
}

/// JS8 decoder context. Not safe for concurrent mutation; distinct contexts
/// are independent and may run on separate threads.
pub struct Decoder {
    sample_rate: u32,
    mode: Mode,
    params: ModeParams,
    snr_threshold: f32,
    bank: ToneBank,
    source: Box<dyn SpectrumSource>,
    // Scratch, reused across calls
    downsampled: Vec<Complex32>,
    baseline: Vec<f32>,
    llr: [f32; N],
}

impl Decoder {
    /// Create a decoder with the default rustfft spectrum provider.
    pub fn new(sample_rate: u32, mode: Mode) -> Result<Self, Js8Error> {
        Self::with_spectrum_source(sample_rate, mode, Box::new(FftSpectrum::new()))
    }

    /// Create a decoder with a caller-supplied spectrum provider.
    pub fn with_spectrum_source(
        sample_rate: u32,
        mode: Mode,
        source: Box<dyn SpectrumSource>,
    ) -> Result<Self, Js8Error> {
        if sample_rate == 0 {
            return Err(Js8Error::InvalidParameter { what: "sample rate must be positive" });
        }
        let params = mode.params();
        Ok(Self {
            sample_rate,
            mode,
            params,
            snr_threshold: SNR_THRESHOLD,
            bank: ToneBank::new(params.ndownsps),
            source,
            downsampled: Vec::new(),
            baseline: Vec::new(),
            llr: [0.0; N],
        })
    }

    /// The decoder's mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Adjust the candidate SNR-over-baseline threshold in dB.
    pub fn set_snr_threshold(&mut self, snr_db: f32) {
        self.snr_threshold = snr_db;
    }

    /// Decode one audio window, reporting at most `max_messages` messages.
    pub fn decode(
        &mut self,
        audio: &[f32],
        max_messages: usize,
    ) -> Result<Vec<DecodedMessage>, Js8Error> {
        if audio.is_empty() {
            return Err(Js8Error::InvalidParameter { what: "audio buffer is empty" });
        }
        if max_messages == 0 {
            return Err(Js8Error::InvalidParameter { what: "max_messages must be positive" });
        }

        let candidates = self.find_candidates(audio);
        debug!(count = candidates.len(), "candidate scan complete");

        let mut messages: Vec<DecodedMessage> = Vec::new();
        for cand in &candidates {
            if messages.len() >= max_messages {
                break;
            }
            match self.decode_candidate(audio, cand) {
                Ok(decoded) => {
                    if messages.iter().any(|m| m.message == decoded.message) {
                        trace!(freq = cand.freq, "duplicate message, skipping");
                        continue;
                    }
                    debug!(
                        message = %decoded.message,
                        freq = cand.freq,
                        snr = cand.snr,
                        "decoded"
                    );
                    messages.push(decoded);
                }
                Err(err) => {
                    trace!(freq = cand.freq, %err, "candidate skipped");
                }
            }
        }
        Ok(messages)
    }

    fn find_candidates(&mut self, audio: &[f32]) -> Vec<Candidate> {
        let spectrum = averaged_spectrum(self.source.as_mut(), audio, SPECTRUM_BINS);
        let df = self.sample_rate as f32 / (2 * SPECTRUM_BINS) as f32;
        baseline::compute_baseline(&spectrum, df, 0, spectrum.len() - 1, &mut self.baseline);
        candidate::find_candidates(&spectrum, &self.baseline, df, self.snr_threshold)
    }

    fn decode_candidate(
        &mut self,
        audio: &[f32],
        cand: &Candidate,
    ) -> Result<DecodedMessage, Js8Error> {
        downmix::downmix(
            audio,
            cand.freq,
            self.sample_rate,
            &self.params,
            &mut self.downsampled,
        );
        if self.downsampled.len() < NN * self.params.ndownsps {
            return Err(Js8Error::SyncFailed { score: 0.0 });
        }

        let costas = self.params.costas_tones();
        let (offset, score) = sync::find_sync(&self.downsampled, &self.bank, costas)
            .ok_or(Js8Error::SyncFailed { score: 0.0 })?;
        if !sync::sync_acceptable(score) {
            return Err(Js8Error::SyncFailed { score });
        }
        trace!(freq = cand.freq, offset, score, threshold = ASYNCMIN, "sync accepted");

        demod::soft_demod(&self.downsampled, offset, &self.bank, &mut self.llr);

        let bp = ldpc::decode(&self.llr)?;
        if !bp.converged() {
            return Err(Js8Error::DecodeFailed { ncheck: bp.ncheck });
        }

        let packed = frame::from_bits(&bp.message);
        let (message, frame_type) = frame::unpack(&packed)?;

        Ok(DecodedMessage {
            message,
            frame_type,
            snr: cand.snr,
            freq_offset: cand.freq - CENTER_FREQ,
            timestamp: offset as u32,
            confidence: 100,
        })
    }
}
