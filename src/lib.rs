//! # lsbhide - hide text in the least significant bits of images and audio
//!
//! lsbhide embeds a message into a lossless carrier (PNG or BMP image, integer
//! PCM WAV audio) by overwriting one low-order bit per sample, and extracts it
//! again.
//!
//! ## Overview
//!
//! - The message is wrapped in a self-describing frame: a 32-bit length, a
//!   password flag, the content bytes and a terminator
//! - Without a password the frame is written sequentially from the first
//!   usable sample
//! - With a password the frame bits are scattered over the whole carrier in a
//!   pseudo-random order derived from it
//! - Capacity depends only on carrier size; the alpha channel of images is
//!   never touched
//!
//! ## Security Model
//!
//! The password only decides *where* bits go, not what they are. This is
//! obfuscation, not encryption. Encrypt the message beforehand if its content
//! must stay confidential.
//!
//! Decoding with a wrong password and decoding a carrier that holds nothing
//! both report "no hidden message"; the two cases are indistinguishable.
//!
//! ## Example Usage
//!
//! ```rust
//! use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
//! use lsbhide::stego::{self, ImageCarrier};
//!
//! let img = ImageBuffer::from_fn(64, 64, |x, y| Rgb([x as u8, y as u8, 7]));
//! let mut carrier = ImageCarrier::from_image(DynamicImage::ImageRgb8(img), ImageFormat::Png).unwrap();
//!
//! stego::encode(&mut carrier, b"meet at noon", Some("secret")).unwrap();
//!
//! let message = stego::decode_text(&carrier, Some("secret")).unwrap();
//! assert_eq!(message, "meet at noon");
//! assert!(stego::decode(&carrier, Some("guess")).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`stego`]: bit carriers, capacity, framing, scheduling and the codec
//! - [`carrier`]: format detection over raw file bytes
//! - [`config`]: front-end settings

pub mod carrier;
pub mod config;
pub mod stego;

pub use carrier::{Carrier, CarrierKind};
pub use config::Settings;
pub use stego::{BitCarrier, CapacityReport, EncodeSummary, StegoError};

/// Hides `message` in an encoded carrier file and returns the new file bytes.
///
/// The output has the same medium, container format, dimensions and sample
/// count as the input; only the LSBs covered by the frame differ.
pub fn encode_carrier(
    carrier_bytes: &[u8],
    message: &str,
    password: Option<&str>,
) -> Result<Vec<u8>, StegoError> {
    let mut carrier = Carrier::from_bytes(carrier_bytes)?;
    stego::encode(&mut carrier, message.as_bytes(), password)?;
    carrier.to_bytes()
}

/// Extracts the hidden message from an encoded carrier file.
///
/// Returns `Ok(None)` when there is no message or the password is wrong.
/// Errors are reserved for carriers that cannot be read at all.
pub fn decode_carrier(
    carrier_bytes: &[u8],
    password: Option<&str>,
) -> Result<Option<String>, StegoError> {
    let carrier = Carrier::from_bytes(carrier_bytes)?;
    match stego::decode_text(&carrier, password) {
        Ok(message) => Ok(Some(message)),
        Err(StegoError::NoHiddenMessage) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Checks whether `message` fits into an encoded carrier file.
pub fn check_capacity(
    carrier_bytes: &[u8],
    message: &str,
    password_used: bool,
) -> Result<CapacityReport, StegoError> {
    let carrier = Carrier::from_bytes(carrier_bytes)?;
    Ok(stego::check_capacity(&carrier, message, password_used))
}
