//! Carrier capacity.
//!
//! Capacity is a pure function of the number of usable samples: one bit per
//! sample, minus the fixed frame overhead, rounded down to whole bytes.

use super::frame::FRAME_OVERHEAD_BITS;
use super::BitCarrier;

/// Maximum message size in bytes for a carrier with `usable_bits` samples.
pub fn capacity_for_bits(usable_bits: usize) -> usize {
    usable_bits.saturating_sub(FRAME_OVERHEAD_BITS) / 8
}

/// Maximum message size in bytes the carrier can hold.
///
/// `password_used` is accepted for symmetry with the encoder and has no
/// effect: the keyed schedule reorders bits but never changes how many exist.
pub fn compute_capacity<C: BitCarrier + ?Sized>(carrier: &C, password_used: bool) -> usize {
    let capacity = capacity_for_bits(carrier.sample_count());
    log::debug!(
        "Capacity: {} bytes from {} usable bits (password: {})",
        capacity,
        carrier.sample_count(),
        password_used
    );
    capacity
}

/// Result of checking whether a message fits a carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityReport {
    /// Maximum message size in bytes.
    pub max_capacity: usize,
    /// UTF-8 byte length of the message.
    pub message_size: usize,
    /// `100 * message_size / max_capacity`.
    pub capacity_percent: f64,
    pub can_encode: bool,
}

impl CapacityReport {
    pub fn new(max_capacity: usize, message_size: usize) -> Self {
        let capacity_percent = if max_capacity > 0 {
            100.0 * message_size as f64 / max_capacity as f64
        } else if message_size == 0 {
            0.0
        } else {
            100.0
        };

        Self {
            max_capacity,
            message_size,
            capacity_percent,
            can_encode: message_size <= max_capacity,
        }
    }
}

/// Checks a message against a carrier's capacity.
pub fn check_capacity<C: BitCarrier + ?Sized>(
    carrier: &C,
    message: &str,
    password_used: bool,
) -> CapacityReport {
    CapacityReport::new(compute_capacity(carrier, password_used), message.len())
}
