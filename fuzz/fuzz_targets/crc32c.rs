//! Fuzz target for CRC32-C chaining.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Chained calls produce the same result as one-shot
//! - The hasher agrees with the engine

#![no_main]

use arbitrary::Arbitrary;
use checksum::{Crc32cEngine, Crc32cHash};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
  initial: u32,
}

fuzz_target!(|input: Input| {
  let engine = Crc32cEngine::software();
  let data = &input.data;
  let split = input.split_point % (data.len() + 1);

  let oneshot = engine.checksum(data, input.initial);

  let (a, b) = data.split_at(split);
  let chained = engine.checksum(b, engine.checksum(a, input.initial));
  assert_eq!(oneshot, chained, "chaining mismatch");

  let mut hasher = Crc32cHash::new(engine);
  hasher.update(a);
  hasher.update(b);
  assert_eq!(hasher.checksum(), engine.checksum(data, 0), "hasher mismatch");
});
