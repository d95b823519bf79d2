//! CRC32-C (Castagnoli) constants.
//!
//! Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78)
//! Used by: iSCSI, SCTP, Btrfs, ext4, RocksDB, LevelDB

/// CRC32-C polynomial in reflected (bit-reversed) form.
///
/// The normal form is 0x1EDC6F41; the reflected form drives LSB-first
/// processing.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// Slicing-by-8 lookup tables.
///
/// Total size: 8 * 256 * 4 = 8KB
pub static TABLES: super::Aligned64<[[u32; 256]; 8]> =
  super::Aligned64(super::tables::generate_slicing_tables_32(POLYNOMIAL));
