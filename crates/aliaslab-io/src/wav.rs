//! WAV file reading and writing.

use crate::{Error, Result};
use aliaslab_core::SignalBuffer;
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::new(BufReader::new(File::open(path)?))?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 8000, 44100).
    pub sample_rate: u32,
    /// Bit depth per sample (16 or 24 for PCM, 32 for float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Derive the export spec for a buffer.
///
/// The sample rate is rounded to whole hertz. Fails for bit depths other than
/// 16, 24 and 32, for buffers without channels, and for rates that do not fit
/// a WAV header.
pub fn spec_for_buffer(buffer: &SignalBuffer, bits_per_sample: u16) -> Result<WavSpec> {
    if !matches!(bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedBitDepth(bits_per_sample));
    }
    let channels = u16::try_from(buffer.num_channels())
        .ok()
        .filter(|&c| c > 0)
        .ok_or(aliaslab_core::Error::InvalidArgument(
            "WAV export needs between 1 and 65535 channels",
        ))?;
    let rate = buffer.sample_rate().round();
    if !(rate >= 1.0 && rate <= u32::MAX as f32) {
        return Err(Error::SampleRateOutOfRange(buffer.sample_rate()));
    }
    Ok(WavSpec {
        channels,
        sample_rate: rate as u32,
        bits_per_sample,
    })
}

/// Read a WAV file into a [`SignalBuffer`].
///
/// Integer PCM is scaled to `[-1, 1)`, float samples pass through, and
/// channels are kept separate.
///
/// # Example
/// ```ignore
/// let signal = read_signal("speech.wav")?;
/// println!("{} channels, {:.2} s", signal.num_channels(), signal.duration());
/// ```
pub fn read_signal<P: AsRef<Path>>(path: P) -> Result<SignalBuffer> {
    let path = path.as_ref();
    let reader = WavReader::new(BufReader::new(File::open(path)?))?;
    let signal = decode(reader)?;
    tracing::debug!(
        path = %path.display(),
        channels = signal.num_channels(),
        sample_rate = signal.sample_rate(),
        len = signal.len(),
        "loaded wav"
    );
    Ok(signal)
}

/// Decode an in-memory WAV file into a [`SignalBuffer`].
pub fn decode_wav(bytes: &[u8]) -> Result<SignalBuffer> {
    decode(WavReader::new(Cursor::new(bytes))?)
}

fn decode<R: Read>(reader: WavReader<R>) -> Result<SignalBuffer> {
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2f32.powi(i32::from(spec.bits_per_sample) - 1);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok(SignalBuffer::from_interleaved(
        spec.sample_rate as f32,
        &samples,
        usize::from(spec.channels),
    )?)
}

/// Write a buffer to a WAV file and return the spec used.
///
/// Samples are clamped to `[-1, 1]` and interleaved.
///
/// # Example
/// ```ignore
/// let aliased = engine.simulate(&original, 8000.0)?;
/// write_signal("aliased.wav", &aliased, 16)?;
/// ```
pub fn write_signal<P: AsRef<Path>>(
    path: P,
    buffer: &SignalBuffer,
    bits_per_sample: u16,
) -> Result<WavSpec> {
    let spec = spec_for_buffer(buffer, bits_per_sample)?;
    let file = BufWriter::new(File::create(path.as_ref())?);
    write_samples(WavWriter::new(file, spec.into())?, buffer, spec)?;
    tracing::debug!(path = %path.as_ref().display(), bits_per_sample, "wrote wav");
    Ok(spec)
}

/// Encode a buffer as an in-memory WAV file.
///
/// 16-bit mono or stereo output carries the canonical 44-byte header.
pub fn encode_wav(buffer: &SignalBuffer, bits_per_sample: u16) -> Result<Vec<u8>> {
    let spec = spec_for_buffer(buffer, bits_per_sample)?;
    let mut cursor = Cursor::new(Vec::new());
    write_samples(WavWriter::new(&mut cursor, spec.into())?, buffer, spec)?;
    Ok(cursor.into_inner())
}

fn write_samples<W: Write + Seek>(
    mut writer: WavWriter<W>,
    buffer: &SignalBuffer,
    spec: WavSpec,
) -> Result<()> {
    let interleaved = buffer.to_interleaved();

    if spec.bits_per_sample == 32 {
        for &sample in &interleaved {
            writer.write_sample(sample.clamp(-1.0, 1.0))?;
        }
    } else {
        let max_val = 2f32.powi(i32::from(spec.bits_per_sample) - 1);
        for &sample in &interleaved {
            let int_sample = (sample.clamp(-1.0, 1.0) * max_val).clamp(-max_val, max_val - 1.0);
            writer.write_sample(int_sample as i32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let buffer = SignalBuffer::mono(48000.0, samples.clone()).unwrap();

        let file = NamedTempFile::new().unwrap();
        let spec = write_signal(file.path(), &buffer, 32).unwrap();
        assert_eq!(spec.sample_rate, 48000);

        let loaded = read_signal(file.path()).unwrap();
        assert_eq!(loaded.sample_rate(), 48000.0);
        assert_eq!(loaded.len(), samples.len());

        for (a, b) in samples.iter().zip(loaded.channel(0).unwrap()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_i16() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let buffer = SignalBuffer::mono(44100.0, samples.clone()).unwrap();

        let file = NamedTempFile::new().unwrap();
        write_signal(file.path(), &buffer, 16).unwrap();

        let loaded = read_signal(file.path()).unwrap();
        assert_eq!(loaded.sample_rate(), 44100.0);

        // 16-bit has less precision
        for (a, b) in samples.iter().zip(loaded.channel(0).unwrap()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_pcm16_header_is_44_bytes() {
        let buffer = SignalBuffer::mono(8000.0, vec![0.0; 100]).unwrap();
        let bytes = encode_wav(&buffer, 16).unwrap();
        assert_eq!(bytes.len(), 44 + 100 * 2);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // Sample rate field, little endian
        assert_eq!(u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]), 8000);
    }

    #[test]
    fn test_encode_clamps_out_of_range() {
        let buffer = SignalBuffer::mono(8000.0, vec![2.0, -3.0, 0.5]).unwrap();
        let decoded = decode_wav(&encode_wav(&buffer, 16).unwrap()).unwrap();
        let ch = decoded.channel(0).unwrap();
        assert!((ch[0] - 1.0).abs() < 1e-4);
        assert_eq!(ch[1], -1.0);
        assert!((ch[2] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_fractional_rate_is_rounded() {
        let buffer = SignalBuffer::mono(7999.6, vec![0.0; 4]).unwrap();
        assert_eq!(spec_for_buffer(&buffer, 16).unwrap().sample_rate, 8000);
    }

    #[test]
    fn test_rejects_bad_specs() {
        let buffer = SignalBuffer::mono(8000.0, vec![0.0; 4]).unwrap();
        assert!(matches!(encode_wav(&buffer, 8), Err(Error::UnsupportedBitDepth(8))));

        let tiny = SignalBuffer::mono(0.25, vec![0.0; 4]).unwrap();
        assert!(matches!(encode_wav(&tiny, 16), Err(Error::SampleRateOutOfRange(_))));

        let empty = SignalBuffer::new(8000.0, Vec::new()).unwrap();
        assert!(matches!(encode_wav(&empty, 16), Err(Error::Signal(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_signal(dir.path().join("missing.wav")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
