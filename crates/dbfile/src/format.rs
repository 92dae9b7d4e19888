//! Format constants shared by the header and record codecs.

/// Magic number identifying staffdb files (ASCII "LLAD").
pub const HEADER_MAGIC: u32 = 0x4c4c_4144;

/// The only header version this crate reads or writes.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the header in bytes: 4 (`magic`) + 2 (`version`) + 2 (`count`) + 4 (`filesize`).
pub const HEADER_SIZE: usize = 4 + 2 + 2 + 4;

/// On-disk width of the `name` field.
pub const NAME_WIDTH: usize = 256;

/// On-disk width of the `address` field.
pub const ADDRESS_WIDTH: usize = 256;

/// On-disk width of the `hours` field.
pub const HOURS_WIDTH: usize = 4;

/// Size of one employee record in bytes.
pub const RECORD_SIZE: usize = NAME_WIDTH + ADDRESS_WIDTH + HOURS_WIDTH;
