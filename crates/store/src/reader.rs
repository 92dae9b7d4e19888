use dbfile::{decode_header, decode_record, FormatError, HEADER_SIZE, RECORD_SIZE};
use log::debug;
use std::io::{self, Read, Seek, SeekFrom};

use crate::{Store, StoreError};

/// Loads a store from `stream`, validating it on the way.
///
/// # Validation
///
/// - The stream must hold at least a full header (short read is an I/O error).
/// - Version must be 1 and magic must be `0x4c4c_4144` ("LLAD").
/// - `filesize` in the header must equal the physical stream length.
/// - `filesize` must equal `HEADER_SIZE + count * RECORD_SIZE`.
///
/// Reading always starts at offset 0. On success the cursor sits at the
/// end of the last record.
///
/// # Errors
///
/// [`StoreError::Io`] on read/seek failures and short reads,
/// [`StoreError::Format`] on any header check, [`StoreError::Resource`] if
/// the record buffer cannot be allocated.
pub fn open_store<R: Read + Seek>(stream: &mut R) -> Result<Store, StoreError> {
    stream.seek(SeekFrom::Start(0))?;

    let mut raw = [0u8; HEADER_SIZE];
    stream.read_exact(&mut raw)?;
    let header = decode_header(&raw)?;
    header.validate()?;

    let actual = stream_len(stream)?;
    if actual != u64::from(header.filesize) {
        return Err(FormatError::Corrupted {
            header: u64::from(header.filesize),
            actual,
        }
        .into());
    }
    header.check_count()?;

    let mut body = Vec::new();
    body.try_reserve_exact(header.records_len()).map_err(|e| {
        StoreError::Resource(format!("cannot allocate {} records: {e}", header.count))
    })?;
    body.resize(header.records_len(), 0);
    stream.read_exact(&mut body)?;

    let records = body
        .chunks_exact(RECORD_SIZE)
        .map(decode_record)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "opened store: {} records, {} bytes",
        header.count, header.filesize
    );
    Ok(Store::from_parts(header, records))
}

/// Physical length of `stream`, leaving the cursor where it was.
fn stream_len<S: Seek>(stream: &mut S) -> io::Result<u64> {
    let pos = stream.stream_position()?;
    let len = stream.seek(SeekFrom::End(0))?;
    if pos != len {
        stream.seek(SeekFrom::Start(pos))?;
    }
    Ok(len)
}
