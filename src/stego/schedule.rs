//! Bit scheduling: which carrier sample receives which frame bit.
//!
//! Without a password the frame is laid down sequentially. With a password
//! the carrier indices are visited in a pseudo-random order derived from it:
//! HKDF-SHA256 turns the password into a 32-byte seed for a ChaCha20 PRNG,
//! which drives a forward Fisher-Yates shuffle.
//!
//! The shuffle is evaluated lazily. Only the swaps that touch positions
//! already handed out are remembered, so drawing `k` indices costs `O(k)`
//! time and memory no matter how large the carrier is.
//!
//! This is obfuscation, not encryption. The message bytes are stored in the
//! clear; the password only decides where they go.
//!
//! # Cross-platform portability
//!
//! Random draws use `u64` ranges rather than `usize` so the PRNG consumes the
//! same entropy on 32-bit and 64-bit targets and the permutation is identical
//! everywhere.

use hkdf::Hkdf;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use std::collections::HashMap;
use std::ops::Range;

/// HKDF salt for the password-keyed schedule.
pub const SALT_SCHEDULE: &[u8] = b"LSBHIDE-SCHEDULE-V1";

/// Ordered, duplicate-free sequence of carrier bit indices.
pub enum Schedule {
    Sequential(Range<usize>),
    Keyed(KeyedPermutation),
}

impl Schedule {
    pub fn is_keyed(&self) -> bool {
        matches!(self, Self::Keyed(_))
    }
}

impl Iterator for Schedule {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Self::Sequential(range) => range.next(),
            Self::Keyed(permutation) => permutation.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Sequential(range) => range.size_hint(),
            Self::Keyed(permutation) => permutation.size_hint(),
        }
    }
}

/// Builds the schedule over `carrier_bits` positions.
///
/// An empty password is treated the same as no password.
pub fn schedule(carrier_bits: usize, password: Option<&str>) -> Schedule {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => {
            Schedule::Keyed(KeyedPermutation::seed(password.as_bytes(), carrier_bits))
        }
        None => Schedule::Sequential(0..carrier_bits),
    }
}

/// Lazily evaluated, password-seeded permutation of `0..len`.
pub struct KeyedPermutation {
    rng: ChaCha20Rng,
    /// Slots whose content differs from their own index.
    swapped: HashMap<u64, u64>,
    position: u64,
    len: u64,
}

impl KeyedPermutation {
    /// Seeds a permutation of `0..len` from password bytes.
    pub fn seed(password: &[u8], len: usize) -> Self {
        let seed = derive_seed(password, SALT_SCHEDULE);
        Self {
            rng: ChaCha20Rng::from_seed(seed),
            swapped: HashMap::new(),
            position: 0,
            len: len as u64,
        }
    }

    fn slot(&self, index: u64) -> u64 {
        self.swapped.get(&index).copied().unwrap_or(index)
    }
}

impl Iterator for KeyedPermutation {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.position >= self.len {
            return None;
        }

        let i = self.position;
        let j = self.rng.gen_range(i..self.len);
        let at_i = self.slot(i);
        let at_j = self.slot(j);

        // Slot i is never visited again, only j needs to remember the swap.
        self.swapped.insert(j, at_i);
        self.swapped.remove(&i);
        self.position += 1;

        Some(at_j as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.position) as usize;
        (remaining, Some(remaining))
    }
}

/// Derives a 32-byte seed using HKDF-SHA256.
fn derive_seed(input: &[u8], salt: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(Some(salt), input);
    let mut output = [0u8; 32];
    hk.expand(b"seed", &mut output)
        .expect("HKDF expand should not fail");
    output
}
