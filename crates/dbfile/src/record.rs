use byteorder::{BigEndian, ByteOrder};
use std::io::{self, Write};

use crate::error::FormatError;
use crate::format::{ADDRESS_WIDTH, NAME_WIDTH, RECORD_SIZE};
use crate::text::FixedText;

const ADDRESS_OFFSET: usize = NAME_WIDTH;
const HOURS_OFFSET: usize = NAME_WIDTH + ADDRESS_WIDTH;

/// One employee entry. Records have no identity beyond their position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub name: FixedText<NAME_WIDTH>,
    pub address: FixedText<ADDRESS_WIDTH>,
    pub hours: u32,
}

impl Record {
    /// Builds a record, truncating `name` and `address` to their field widths.
    pub fn new(name: &str, address: &str, hours: u32) -> Self {
        Self {
            name: FixedText::from_text(name),
            address: FixedText::from_text(address),
            hours,
        }
    }

    /// Writes the encoded record to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&encode_record(self))
    }
}

/// Encodes `record` as
///
/// ```text
/// [name: 256 bytes, NUL-padded][address: 256 bytes, NUL-padded][hours: u32 BE]
/// ```
pub fn encode_record(record: &Record) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    record.name.encode_into(&mut buf[..ADDRESS_OFFSET]);
    record
        .address
        .encode_into(&mut buf[ADDRESS_OFFSET..HOURS_OFFSET]);
    BigEndian::write_u32(&mut buf[HOURS_OFFSET..], record.hours);
    buf
}

/// Decodes the first [`RECORD_SIZE`] bytes of `bytes`.
///
/// Text fields keep their stored bytes, so `encode_record` of the result
/// reproduces the input up to each field's first NUL.
pub fn decode_record(bytes: &[u8]) -> Result<Record, FormatError> {
    if bytes.len() < RECORD_SIZE {
        return Err(FormatError::Truncated {
            what: "record",
            need: RECORD_SIZE,
            got: bytes.len(),
        });
    }
    Ok(Record {
        name: FixedText::from_field(&bytes[..ADDRESS_OFFSET]),
        address: FixedText::from_field(&bytes[ADDRESS_OFFSET..HOURS_OFFSET]),
        hours: BigEndian::read_u32(&bytes[HOURS_OFFSET..RECORD_SIZE]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_layout() {
        let r = Record::new("Alice", "123 Main St", 40);
        let bytes = encode_record(&r);
        assert_eq!(bytes.len(), 516);
        assert_eq!(&bytes[..5], b"Alice");
        assert!(bytes[5..256].iter().all(|&b| b == 0));
        assert_eq!(&bytes[256..267], b"123 Main St");
        assert!(bytes[267..512].iter().all(|&b| b == 0));
        assert_eq!(&bytes[512..], &[0, 0, 0, 40]);
    }

    #[test]
    fn decode_inverts_encode() {
        let r = Record::new("Bob", "456 Oak Ave", 0x0102_0304);
        assert_eq!(decode_record(&encode_record(&r)).unwrap(), r);
    }

    #[test]
    fn non_utf8_fields_reencode_byte_for_byte() {
        let mut raw = [0u8; RECORD_SIZE];
        raw[..3].copy_from_slice(&[0xe9, b'v', b'a']);
        raw[256..260].copy_from_slice(&[b'r', 0xfc, b'e', 0xff]);
        raw[512..].copy_from_slice(&[0, 0, 1, 0]);

        let r = decode_record(&raw).unwrap();
        assert_eq!(r.name.as_bytes(), &[0xe9, b'v', b'a']);
        assert_eq!(r.hours, 256);
        assert_eq!(encode_record(&r), raw);
    }

    #[test]
    fn long_name_is_truncated_not_rejected() {
        let long = "n".repeat(400);
        let r = Record::new(&long, "addr", 1);
        let back = decode_record(&encode_record(&r)).unwrap();
        assert_eq!(back.name.to_str_lossy(), &long[..255]);
        assert_eq!(back.address.to_str_lossy(), "addr");
    }

    #[test]
    fn empty_fields_roundtrip() {
        let r = Record::default();
        let back = decode_record(&encode_record(&r)).unwrap();
        assert!(back.name.is_empty());
        assert!(back.address.is_empty());
        assert_eq!(back.hours, 0);
    }

    #[test]
    fn decode_short_input_fails() {
        let err = decode_record(&[0u8; 515]).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { what: "record", .. }));
    }

    #[test]
    fn write_to_emits_record_size() {
        let mut out = Vec::new();
        Record::new("a", "b", 3).write_to(&mut out).unwrap();
        assert_eq!(out.len(), RECORD_SIZE);
    }
}
