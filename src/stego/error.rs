//! Error types shared by every stage of the codec.

use thiserror::Error;

/// Errors that can occur while measuring, embedding into, or extracting from
/// a carrier.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Carrier has no usable samples")]
    EmptyCarrier,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Message too large for carrier: need {needed} bytes, have capacity for {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    #[error("No hidden message found or incorrect password")]
    NoHiddenMessage,

    /// Raised by the framer; the codec reports it as [`StegoError::NoHiddenMessage`].
    #[error("Malformed payload frame")]
    MalformedFrame,

    #[error("Unsupported carrier format: {0}")]
    UnsupportedFormat(String),

    #[error("Sample index {index} out of range (carrier has {len} samples)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Carrier too large: {size} bytes exceeds limit of {limit}")]
    CarrierTooLarge { size: u64, limit: u64 },

    #[error("Carrier load error: {0}")]
    CarrierLoad(String),

    #[error("Carrier save error: {0}")]
    CarrierSave(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
