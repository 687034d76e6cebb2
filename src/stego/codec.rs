//! Embedding and extraction.
//!
//! The codec is written once against [`BitCarrier`]: it frames the message,
//! draws a schedule over the carrier's usable bits, and writes or reads the
//! frame through the schedule. It keeps no state between calls.

use super::capacity::compute_capacity;
use super::error::StegoError;
use super::frame::{frame, frame_bit_len, unframe};
use super::schedule::schedule;
use super::BitCarrier;

/// Outcome of a successful [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Carrier bits actually written.
    pub bits_written: usize,
    /// Capacity of the carrier in bytes.
    pub capacity: usize,
}

/// Hides `message` in the carrier, in place.
///
/// Every check happens before the first bit is written, so on error the
/// carrier is left exactly as it was. Only the scheduled positions covered by
/// the frame are touched.
pub fn encode<C: BitCarrier + ?Sized>(
    carrier: &mut C,
    message: &[u8],
    password: Option<&str>,
) -> Result<EncodeSummary, StegoError> {
    let usable_bits = carrier.sample_count();
    if usable_bits == 0 {
        return Err(StegoError::EmptyCarrier);
    }
    if message.is_empty() {
        return Err(StegoError::EmptyMessage);
    }

    let password = normalize_password(password);
    let capacity = compute_capacity(carrier, password.is_some());
    if message.len() > capacity {
        return Err(StegoError::CapacityExceeded {
            needed: message.len(),
            capacity,
        });
    }

    let bits = frame(message, password.is_some())?;
    debug_assert_eq!(bits.len(), frame_bit_len(message.len()));

    let order = schedule(usable_bits, password);
    log::debug!(
        "Embedding {} frame bits into {} usable bits ({} schedule)",
        bits.len(),
        usable_bits,
        if order.is_keyed() { "keyed" } else { "sequential" }
    );

    for (&bit, index) in bits.iter().zip(order) {
        carrier.set_lsb(index, bit)?;
    }

    Ok(EncodeSummary {
        bits_written: bits.len(),
        capacity,
    })
}

/// Extracts the hidden message bytes from the carrier.
///
/// Any framing failure is reported as [`StegoError::NoHiddenMessage`]; a
/// wrong password is indistinguishable from an empty carrier. Partial content
/// is never returned.
pub fn decode<C: BitCarrier + ?Sized>(
    carrier: &C,
    password: Option<&str>,
) -> Result<Vec<u8>, StegoError> {
    let usable_bits = carrier.sample_count();
    if usable_bits == 0 {
        return Err(StegoError::EmptyCarrier);
    }

    let password = normalize_password(password);
    let bits = schedule(usable_bits, password).map(|index| carrier.get_lsb(index));

    let unframed = match unframe(bits, usable_bits) {
        Ok(unframed) => unframed,
        Err(StegoError::MalformedFrame) => return Err(StegoError::NoHiddenMessage),
        Err(e) => return Err(e),
    };

    if unframed.message.is_empty() {
        return Err(StegoError::NoHiddenMessage);
    }
    if unframed.password_used && password.is_none() {
        return Err(StegoError::NoHiddenMessage);
    }
    if !unframed.password_used && password.is_some() {
        // Best effort: the frame parsed under the caller's schedule, hand it back.
        log::debug!("Frame was written without a password, returning it anyway");
    }

    Ok(unframed.message)
}

/// Extracts the hidden message as UTF-8 text.
pub fn decode_text<C: BitCarrier + ?Sized>(
    carrier: &C,
    password: Option<&str>,
) -> Result<String, StegoError> {
    let bytes = decode(carrier, password)?;
    String::from_utf8(bytes).map_err(|_| StegoError::NoHiddenMessage)
}

fn normalize_password(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.is_empty())
}
