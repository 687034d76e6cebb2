//! Audio carriers for LSB steganography.
//!
//! Exposes the samples of an uncompressed integer PCM WAV file as a flat run
//! of least significant bits, one bit per sample, interleaved channels in
//! file order. 8, 16, 24 and 32 bit depths are supported.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use super::error::StegoError;
use super::BitCarrier;

/// A decoded WAV file whose sample LSBs are addressable.
#[derive(Debug, Clone)]
pub struct AudioCarrier {
    /// Audio specification (sample rate, channels, etc.)
    spec: WavSpec,
    /// Interleaved samples, widened to i32 regardless of bit depth
    samples: Vec<i32>,
}

impl AudioCarrier {
    /// Loads an audio carrier from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let reader =
            WavReader::open(path).map_err(|e| StegoError::CarrierLoad(e.to_string()))?;

        Self::from_reader(reader)
    }

    /// Loads an audio carrier from WAV bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| StegoError::CarrierLoad(e.to_string()))?;

        Self::from_reader(reader)
    }

    fn from_reader<R: Read + Seek>(reader: WavReader<R>) -> Result<Self, StegoError> {
        let spec = reader.spec();
        check_spec(&spec)?;

        let samples: Vec<i32> = reader
            .into_samples::<i32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StegoError::CarrierLoad(e.to_string()))?;

        log::debug!(
            "Loaded WAV: {} samples, {} ch, {} Hz, {} bit",
            samples.len(),
            spec.channels,
            spec.sample_rate,
            spec.bits_per_sample
        );

        Ok(Self { spec, samples })
    }

    /// Builds a carrier from an in-memory sample buffer.
    pub fn from_samples(spec: WavSpec, samples: Vec<i32>) -> Result<Self, StegoError> {
        check_spec(&spec)?;
        Ok(Self { spec, samples })
    }

    /// Returns the duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.spec.channels == 0 || self.spec.sample_rate == 0 {
            return 0.0;
        }
        let frames = self.samples.len() / self.spec.channels as usize;
        frames as f64 / self.spec.sample_rate as f64
    }

    /// Saves the audio to a WAV file with the original spec.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        let bytes = self.to_wav_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Returns the audio as WAV bytes with the original spec.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut bytes = Vec::new();
        {
            let cursor = Cursor::new(&mut bytes);
            let mut writer = WavWriter::new(cursor, self.spec)
                .map_err(|e| StegoError::CarrierSave(e.to_string()))?;

            for sample in &self.samples {
                writer
                    .write_sample(*sample)
                    .map_err(|e| StegoError::CarrierSave(e.to_string()))?;
            }

            writer
                .finalize()
                .map_err(|e| StegoError::CarrierSave(e.to_string()))?;
        }
        Ok(bytes)
    }

    /// Returns the audio specification.
    pub fn spec(&self) -> &WavSpec {
        &self.spec
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    fn check_index(&self, index: usize) -> Result<(), StegoError> {
        if index >= self.samples.len() {
            return Err(StegoError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            });
        }
        Ok(())
    }
}

impl BitCarrier for AudioCarrier {
    fn sample_count(&self) -> usize {
        self.samples.len()
    }

    fn get_lsb(&self, index: usize) -> Result<bool, StegoError> {
        self.check_index(index)?;
        Ok(self.samples[index] & 1 == 1)
    }

    fn set_lsb(&mut self, index: usize, bit: bool) -> Result<(), StegoError> {
        self.check_index(index)?;
        // Two's complement: clearing or setting bit 0 stays inside the sample range.
        let sample = &mut self.samples[index];
        *sample = (*sample & !1) | bit as i32;
        Ok(())
    }
}

/// Only integer PCM at 8, 16, 24 or 32 bits can hold LSB data.
fn check_spec(spec: &WavSpec) -> Result<(), StegoError> {
    if spec.sample_format != SampleFormat::Int {
        return Err(StegoError::UnsupportedFormat(
            "only integer PCM WAV can hold LSB data, got IEEE float".to_string(),
        ));
    }
    if !matches!(spec.bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(StegoError::UnsupportedFormat(format!(
            "unsupported WAV bit depth: {}",
            spec.bits_per_sample
        )));
    }
    Ok(())
}

/// Creates a mono sine-wave carrier for tests.
#[cfg(test)]
pub(crate) fn create_test_audio(sample_count: usize, bits_per_sample: u16) -> AudioCarrier {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };
    let amplitude = ((1i64 << (bits_per_sample - 1)) - 1) as f64 * 0.5;

    let samples: Vec<i32> = (0..sample_count)
        .map(|i| {
            let t = i as f64 / 44100.0;
            let freq = 440.0; // A4 note
            (f64::sin(2.0 * std::f64::consts::PI * freq * t) * amplitude) as i32
        })
        .collect();

    AudioCarrier { spec, samples }
}
