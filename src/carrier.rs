//! Carrier loading with format detection.
//!
//! [`Carrier`] wraps the concrete image and audio carriers behind one type so
//! callers can hand over raw file bytes without knowing the medium. WAV is
//! recognised by its RIFF/WAVE header; everything else goes through image
//! format sniffing, which only lets lossless formats through.

use std::fmt;
use std::path::Path;

use image::ImageFormat;

use crate::stego::{AudioCarrier, BitCarrier, ImageCarrier, StegoError};

/// Medium of a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    Image,
    Audio,
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// Any supported carrier.
#[derive(Debug, Clone)]
pub enum Carrier {
    Image(ImageCarrier),
    Audio(AudioCarrier),
}

impl Carrier {
    /// Detects the medium from the bytes and decodes the carrier.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        if is_wav(bytes) {
            AudioCarrier::from_bytes(bytes).map(Self::Audio)
        } else {
            ImageCarrier::from_bytes(bytes).map(Self::Image)
        }
    }

    /// Like [`Carrier::from_bytes`], refusing inputs larger than `limit` bytes.
    pub fn from_bytes_with_limit(bytes: &[u8], limit: u64) -> Result<Self, StegoError> {
        check_size(bytes.len() as u64, limit)?;
        Self::from_bytes(bytes)
    }

    /// Reads and decodes a carrier file. The extension is ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Like [`Carrier::from_file`], checking the file size before reading it.
    pub fn from_file_with_limit<P: AsRef<Path>>(path: P, limit: u64) -> Result<Self, StegoError> {
        let path = path.as_ref();
        check_size(std::fs::metadata(path)?.len(), limit)?;
        Self::from_file(path)
    }

    pub fn kind(&self) -> CarrierKind {
        match self {
            Self::Image(_) => CarrierKind::Image,
            Self::Audio(_) => CarrierKind::Audio,
        }
    }

    /// File extension matching the container the carrier will be written as.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Image(image) => match image.format() {
                ImageFormat::Bmp => "bmp",
                _ => "png",
            },
            Self::Audio(_) => "wav",
        }
    }

    /// Encodes the carrier in the same container format it was loaded from.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StegoError> {
        match self {
            Self::Image(image) => image.to_bytes(),
            Self::Audio(audio) => audio.to_wav_bytes(),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        match self {
            Self::Image(image) => image.save(path),
            Self::Audio(audio) => audio.save(path),
        }
    }
}

impl BitCarrier for Carrier {
    fn sample_count(&self) -> usize {
        match self {
            Self::Image(image) => image.sample_count(),
            Self::Audio(audio) => audio.sample_count(),
        }
    }

    fn get_lsb(&self, index: usize) -> Result<bool, StegoError> {
        match self {
            Self::Image(image) => image.get_lsb(index),
            Self::Audio(audio) => audio.get_lsb(index),
        }
    }

    fn set_lsb(&mut self, index: usize, bit: bool) -> Result<(), StegoError> {
        match self {
            Self::Image(image) => image.set_lsb(index, bit),
            Self::Audio(audio) => audio.set_lsb(index, bit),
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(image) => {
                let (w, h) = image.dimensions();
                write!(
                    f,
                    "{:?} image, {}x{}, {:?} pixels, {} usable bits",
                    image.format(),
                    w,
                    h,
                    image.layout(),
                    image.sample_count()
                )
            }
            Self::Audio(audio) => {
                let spec = audio.spec();
                write!(
                    f,
                    "WAV audio, {} ch, {} Hz, {} bit, {:.2}s, {} usable bits",
                    spec.channels,
                    spec.sample_rate,
                    spec.bits_per_sample,
                    audio.duration_secs(),
                    audio.sample_count()
                )
            }
        }
    }
}

fn is_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

fn check_size(size: u64, limit: u64) -> Result<(), StegoError> {
    if size > limit {
        return Err(StegoError::CarrierTooLarge { size, limit });
    }
    Ok(())
}
