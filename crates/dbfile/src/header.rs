use byteorder::{BigEndian, ByteOrder};
use std::io::{self, Write};

use crate::error::FormatError;
use crate::format::{FORMAT_VERSION, HEADER_MAGIC, HEADER_SIZE, RECORD_SIZE};

/// The 12-byte block at offset 0 of every staffdb file.
///
/// `Header` is a plain `Copy` value. Code that changes the record count or
/// the file size builds a new header ([`Header::with_count`],
/// [`Header::committed`]) and swaps it in whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u16,
    /// Number of records following the header.
    pub count: u16,
    /// Total file length in bytes, header included.
    pub filesize: u32,
}

impl Header {
    /// Header of an empty database: no records, file is just the header.
    pub fn new() -> Self {
        Self {
            magic: HEADER_MAGIC,
            version: FORMAT_VERSION,
            count: 0,
            filesize: HEADER_SIZE as u32,
        }
    }

    /// File size implied by `count` records.
    ///
    /// `u16::MAX` records still fit in a `u32` file size.
    pub fn expected_filesize(count: u16) -> u64 {
        HEADER_SIZE as u64 + u64::from(count) * RECORD_SIZE as u64
    }

    /// Number of record bytes that follow this header.
    pub fn records_len(&self) -> usize {
        usize::from(self.count) * RECORD_SIZE
    }

    /// Same header with a different record count. `filesize` is left as is
    /// until the header is [`committed`](Header::committed).
    pub fn with_count(self, count: u16) -> Self {
        Self { count, ..self }
    }

    /// The header as it must appear on disk for `count` records.
    pub fn committed(self, count: u16) -> Self {
        Self {
            magic: HEADER_MAGIC,
            version: FORMAT_VERSION,
            count,
            filesize: Self::expected_filesize(count) as u32,
        }
    }

    /// Checks version and magic.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.version != FORMAT_VERSION {
            return Err(FormatError::BadVersion {
                found: self.version,
            });
        }
        if self.magic != HEADER_MAGIC {
            return Err(FormatError::BadMagic { found: self.magic });
        }
        Ok(())
    }

    /// Checks that `filesize` agrees with `count`.
    pub fn check_count(&self) -> Result<(), FormatError> {
        let expected = Self::expected_filesize(self.count);
        if u64::from(self.filesize) != expected {
            return Err(FormatError::CountMismatch {
                count: self.count,
                expected,
                filesize: self.filesize,
            });
        }
        Ok(())
    }

    /// Writes the encoded header to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&encode_header(self))
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes `header` in network byte order:
///
/// ```text
/// [magic: u32 BE][version: u16 BE][count: u16 BE][filesize: u32 BE]
/// ```
pub fn encode_header(header: &Header) -> [u8; HEADER_SIZE] {
    let mut buf = [0u8; HEADER_SIZE];
    BigEndian::write_u32(&mut buf[0..4], header.magic);
    BigEndian::write_u16(&mut buf[4..6], header.version);
    BigEndian::write_u16(&mut buf[6..8], header.count);
    BigEndian::write_u32(&mut buf[8..12], header.filesize);
    buf
}

/// Decodes the first [`HEADER_SIZE`] bytes of `bytes`.
///
/// No field is checked here; see [`Header::validate`].
pub fn decode_header(bytes: &[u8]) -> Result<Header, FormatError> {
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::Truncated {
            what: "header",
            need: HEADER_SIZE,
            got: bytes.len(),
        });
    }
    Ok(Header {
        magic: BigEndian::read_u32(&bytes[0..4]),
        version: BigEndian::read_u16(&bytes[4..6]),
        count: BigEndian::read_u16(&bytes[6..8]),
        filesize: BigEndian::read_u32(&bytes[8..12]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_header_is_empty_database() {
        let h = Header::new();
        assert_eq!(h.magic, HEADER_MAGIC);
        assert_eq!(h.version, 1);
        assert_eq!(h.count, 0);
        assert_eq!(h.filesize, 12);
        assert!(h.validate().is_ok());
        assert!(h.check_count().is_ok());
    }

    #[test]
    fn encode_is_big_endian() {
        let h = Header {
            magic: HEADER_MAGIC,
            version: 1,
            count: 2,
            filesize: 0x0000_040e,
        };
        let bytes = encode_header(&h);
        assert_eq!(&bytes[0..4], b"LLAD");
        assert_eq!(&bytes[4..6], &[0x00, 0x01]);
        assert_eq!(&bytes[6..8], &[0x00, 0x02]);
        assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x04, 0x0e]);
    }

    #[test]
    fn decode_inverts_encode() {
        let h = Header {
            magic: 0xdead_beef,
            version: 7,
            count: 513,
            filesize: 123_456,
        };
        assert_eq!(decode_header(&encode_header(&h)).unwrap(), h);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut bytes = encode_header(&Header::new()).to_vec();
        bytes.extend_from_slice(&[0xaa; 20]);
        assert_eq!(decode_header(&bytes).unwrap(), Header::new());
    }

    #[test]
    fn decode_short_input_fails() {
        let err = decode_header(&[0u8; 11]).unwrap_err();
        assert_eq!(
            err,
            FormatError::Truncated {
                what: "header",
                need: 12,
                got: 11
            }
        );
    }

    #[test]
    fn validate_rejects_bad_version() {
        let h = Header {
            version: 2,
            ..Header::new()
        };
        assert_eq!(h.validate(), Err(FormatError::BadVersion { found: 2 }));
    }

    #[test]
    fn validate_rejects_bad_magic() {
        let h = Header {
            magic: 0x1234_5678,
            ..Header::new()
        };
        assert_eq!(
            h.validate(),
            Err(FormatError::BadMagic { found: 0x1234_5678 })
        );
    }

    #[test]
    fn committed_recomputes_filesize() {
        let h = Header::new().with_count(3);
        assert_eq!(h.filesize, 12);
        assert!(h.check_count().is_err());

        let c = h.committed(3);
        assert_eq!(c.count, 3);
        assert_eq!(c.filesize, 12 + 3 * 516);
        assert!(c.check_count().is_ok());
    }

    #[test]
    fn max_count_fits_in_filesize() {
        let c = Header::new().committed(u16::MAX);
        assert_eq!(u64::from(c.filesize), Header::expected_filesize(u16::MAX));
    }

    #[test]
    fn write_to_matches_encode() {
        let mut out = Vec::new();
        Header::new().write_to(&mut out).unwrap();
        assert_eq!(out, encode_header(&Header::new()).to_vec());
    }
}
