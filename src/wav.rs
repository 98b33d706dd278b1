use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Write samples as a mono 32-bit float WAV file.
///
/// Lets a filtered signal be auditioned in an ordinary audio player;
/// samples are narrowed from f64 to f32 for the container format.
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[f64], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_wav_round_trip() {
        let path = std::env::temp_dir().join(format!("sigkit-{}-out.wav", std::process::id()));
        let samples = vec![0.0, 0.5, -0.5, 1.0, -1.0];
        save_wav(&path, &samples, 8000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8000);
        let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(read.len(), samples.len());
        for (got, want) in read.iter().zip(&samples) {
            assert!((f64::from(*got) - want).abs() < 1e-6);
        }
        let _ = std::fs::remove_file(&path);
    }
}
