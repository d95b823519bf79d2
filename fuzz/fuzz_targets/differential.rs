//! Differential fuzzing of the hardware kernel against the software kernel.
//!
//! A no-op on machines without the CRC32C instruction.

#![no_main]

use checksum::crc32c::{hw_crc32c, sw_crc32c};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let init = data.first().map_or(0, |&b| u32::from(b).wrapping_mul(0x0101_0101));
  let sw = sw_crc32c(init, data);

  if let Some(hw) = hw_crc32c(init, data) {
    assert_eq!(
      hw, sw,
      "hardware/software mismatch: hw={hw:#010x}, sw={sw:#010x}, len={}",
      data.len()
    );
  }
});
