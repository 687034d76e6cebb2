//! Payload frame serialization.
//!
//! Bit layout, in embedding order:
//!
//! ```text
//! [length: 32 bits, big-endian] [password flag: 1 bit] [content: length * 8 bits] [terminator: 8 bits]
//! ```
//!
//! Bytes are written most significant bit first. The length prefix is
//! authoritative; the terminator is only checked as a sanity boundary after
//! the content has been read.

use super::error::StegoError;

/// Width of the length header in bits.
pub const LENGTH_BITS: usize = 32;

/// Width of the password flag in bits.
pub const FLAG_BITS: usize = 1;

/// Fixed terminator pattern closing every frame.
pub const TERMINATOR: u8 = 0b1010_0101;

/// Width of the terminator in bits.
pub const TERMINATOR_BITS: usize = 8;

/// Total fixed overhead of a frame, excluding content.
pub const FRAME_OVERHEAD_BITS: usize = LENGTH_BITS + FLAG_BITS + TERMINATOR_BITS;

/// Result of parsing a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unframed {
    pub message: Vec<u8>,
    pub password_used: bool,
}

/// Number of carrier bits needed to embed a message of `message_len` bytes.
pub fn frame_bit_len(message_len: usize) -> usize {
    FRAME_OVERHEAD_BITS + message_len * 8
}

/// Serializes a message into frame bits.
pub fn frame(message: &[u8], password_used: bool) -> Result<Vec<bool>, StegoError> {
    let length = u32::try_from(message.len()).map_err(|_| StegoError::CapacityExceeded {
        needed: message.len(),
        capacity: u32::MAX as usize,
    })?;

    let mut bits = Vec::with_capacity(frame_bit_len(message.len()));
    push_bits(&mut bits, &length.to_be_bytes());
    bits.push(password_used);
    push_bits(&mut bits, message);
    push_bits(&mut bits, &[TERMINATOR]);
    Ok(bits)
}

/// Parses a frame from a lazy bit source.
///
/// `available_bits` is the total number of bits the source can yield. A
/// declared length that would need more than that is rejected before any
/// content bit is read, so garbage headers never trigger large allocations.
pub fn unframe<I>(bits: I, available_bits: usize) -> Result<Unframed, StegoError>
where
    I: IntoIterator<Item = Result<bool, StegoError>>,
{
    if available_bits < FRAME_OVERHEAD_BITS {
        return Err(StegoError::MalformedFrame);
    }

    let mut bits = bits.into_iter();

    let length = read_uint(&mut bits, LENGTH_BITS)? as usize;
    let needed = length
        .checked_mul(8)
        .and_then(|content| content.checked_add(FRAME_OVERHEAD_BITS))
        .ok_or(StegoError::MalformedFrame)?;
    if needed > available_bits {
        log::debug!(
            "Declared length {} needs {} bits, only {} available",
            length,
            needed,
            available_bits
        );
        return Err(StegoError::MalformedFrame);
    }

    let password_used = read_bit(&mut bits)?;

    let mut message = Vec::with_capacity(length);
    for _ in 0..length {
        message.push(read_uint(&mut bits, 8)? as u8);
    }

    if read_uint(&mut bits, TERMINATOR_BITS)? as u8 != TERMINATOR {
        return Err(StegoError::MalformedFrame);
    }

    Ok(Unframed {
        message,
        password_used,
    })
}

fn push_bits(bits: &mut Vec<bool>, bytes: &[u8]) {
    for byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
}

fn read_bit<I>(bits: &mut I) -> Result<bool, StegoError>
where
    I: Iterator<Item = Result<bool, StegoError>>,
{
    bits.next().ok_or(StegoError::MalformedFrame)?
}

fn read_uint<I>(bits: &mut I, width: usize) -> Result<u64, StegoError>
where
    I: Iterator<Item = Result<bool, StegoError>>,
{
    let mut value = 0u64;
    for _ in 0..width {
        value = (value << 1) | read_bit(bits)? as u64;
    }
    Ok(value)
}
