//! Portable CRC32-C implementation using slicing-by-8.
//!
//! # Algorithm
//!
//! For each 8-byte chunk:
//! 1. XOR the low 4 bytes with the current CRC
//! 2. Look up each byte in its corresponding table
//! 3. XOR all 8 table entries to get the new CRC
//!
//! The remainder (`len % 8` bytes) goes through table 0 one byte at a time.

use crate::constants::crc32c::TABLES;

macro_rules! table {
  ($idx:literal) => {
    TABLES.0[$idx]
  };
}

/// Compute CRC32-C using slicing-by-8.
///
/// `crc` is the raw register value (no pre/post inversion); so is the result.
#[inline]
pub fn compute(crc: u32, data: &[u8]) -> u32 {
  let mut crc = crc;
  let mut chunks = data.chunks_exact(8);

  for chunk in chunks.by_ref() {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(chunk);
    let d = u64::from_le_bytes(bytes);

    let lo = u64::from(crc) ^ (d & 0xFFFF_FFFF);
    let hi = d >> 32;

    // table[7] corresponds to byte 0 (furthest from the end of the chunk),
    // table[0] to byte 7.
    crc = table!(7)[lo as u8 as usize]
      ^ table!(6)[(lo >> 8) as u8 as usize]
      ^ table!(5)[(lo >> 16) as u8 as usize]
      ^ table!(4)[(lo >> 24) as u8 as usize]
      ^ table!(3)[hi as u8 as usize]
      ^ table!(2)[(hi >> 8) as u8 as usize]
      ^ table!(1)[(hi >> 16) as u8 as usize]
      ^ table!(0)[(hi >> 24) as u8 as usize];
  }

  for &byte in chunks.remainder() {
    crc = compute_byte(crc, byte);
  }

  crc
}

/// Fold a single byte into the register.
#[inline]
pub fn compute_byte(crc: u32, byte: u8) -> u32 {
  let idx = (crc as u8 ^ byte) as usize;
  (crc >> 8) ^ table!(0)[idx]
}
