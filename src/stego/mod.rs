//! Steganography core: LSB embedding into image and audio carriers.
//!
//! Supports:
//! - Image LSB steganography (PNG, BMP)
//! - Audio LSB steganography (integer PCM WAV)
//!
//! Both carrier kinds implement [`BitCarrier`], and everything above them
//! (capacity, framing, scheduling, the codec) is written against that trait.

pub mod audio;
pub mod capacity;
pub mod codec;
pub mod error;
pub mod frame;
pub mod image;
pub mod schedule;

pub use self::audio::AudioCarrier;
pub use self::capacity::{capacity_for_bits, check_capacity, compute_capacity, CapacityReport};
pub use self::codec::{decode, decode_text, encode, EncodeSummary};
pub use self::error::StegoError;
pub use self::frame::{frame, frame_bit_len, unframe, Unframed, FRAME_OVERHEAD_BITS};
pub use self::image::{ImageCarrier, PixelLayout};
pub use self::schedule::{schedule, KeyedPermutation, Schedule};

/// A carrier medium seen as an ordered run of least significant bits.
///
/// Indices are 0-based over the samples eligible for embedding, in a fixed
/// traversal order. Implementations reject indices outside
/// `0..sample_count()` with [`StegoError::IndexOutOfRange`], and `set_lsb`
/// changes a sample by at most one, keeping all higher bits.
pub trait BitCarrier {
    /// Number of samples that can carry one payload bit each.
    fn sample_count(&self) -> usize;

    fn get_lsb(&self, index: usize) -> Result<bool, StegoError>;

    fn set_lsb(&mut self, index: usize, bit: bool) -> Result<(), StegoError>;
}
