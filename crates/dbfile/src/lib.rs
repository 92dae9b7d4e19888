//! # dbfile — staffdb on-disk format
//!
//! Codecs for the single-file employee database used by the staffdb tool.
//! A database file is a fixed 12-byte header followed by `count`
//! fixed-size employee records.
//!
//! ## File layout (v1)
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ HEADER (12 bytes)                             │
//! │                                               │
//! │ magic (u32) | version (u16) | count (u16)     │
//! │ filesize (u32)                                │
//! ├───────────────────────────────────────────────┤
//! │ RECORDS (516 bytes each)                      │
//! │                                               │
//! │ name [256] | address [256] | hours (u32)      │
//! │                                               │
//! │ ... repeated `count` times ...                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! All integers are big-endian (network order). Text fields are
//! NUL-padded; see [`FixedText`] for the truncation rules.

mod error;
mod format;
mod header;
mod record;
mod text;

pub use error::FormatError;
pub use format::{
    ADDRESS_WIDTH, FORMAT_VERSION, HEADER_MAGIC, HEADER_SIZE, HOURS_WIDTH, NAME_WIDTH,
    RECORD_SIZE,
};
pub use header::{decode_header, encode_header, Header};
pub use record::{decode_record, encode_record, Record};
pub use text::FixedText;
