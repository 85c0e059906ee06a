//! WAV file I/O for the CLI and tests (16-bit mono PCM).

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Write float samples in [-1, 1] to a 16-bit mono PCM WAV file.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    writer.finalize()
}

/// Read a mono WAV file into float samples in [-1, 1], returning the sample
/// rate. Multi-channel files keep only the first channel.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32), hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let scale = 1.0 / (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(channels)
            .collect::<Result<_, _>>()?,
    };
    Ok((samples, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let dir = std::env::temp_dir().join("rustyjs8_wav_test.wav");
        let samples: Vec<f32> =
            (0..1000).map(|n| (std::f32::consts::TAU * n as f32 / 100.0).sin() * 0.5).collect();

        write_wav(&dir, &samples, 12000).unwrap();
        let (read, rate) = read_wav(&dir).unwrap();
        std::fs::remove_file(&dir).ok();

        assert_eq!(rate, 12000);
        assert_eq!(read.len(), samples.len());
        for (a, b) in read.iter().zip(samples.iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_clipping_on_write() {
        let dir = std::env::temp_dir().join("rustyjs8_wav_clip_test.wav");
        write_wav(&dir, &[2.0, -2.0], 12000).unwrap();
        let (read, _) = read_wav(&dir).unwrap();
        std::fs::remove_file(&dir).ok();
        assert!((read[0] - 1.0).abs() < 1e-3);
        assert!((read[1] + 1.0).abs() < 1e-3);
    }
}
