use dbfile::{Header, Record};
use log::{debug, warn};
use std::io::{BufWriter, Seek, SeekFrom, Write};

use crate::StoreError;

/// Rewrites `stream` from offset 0 with `header` and `records`.
///
/// The header is re-derived from the record list before it is written:
/// `count = records.len()` and `filesize = HEADER_SIZE + count * RECORD_SIZE`.
/// The header actually written is returned.
///
/// # Truncation
///
/// Bytes already in `stream` past the new `filesize` are **not** removed.
/// Callers rewriting a file must truncate it to the returned `filesize`,
/// otherwise the next [`open_store`](crate::open_store) reports corruption.
///
/// # Errors
///
/// [`StoreError::Io`] on any seek/write failure, [`StoreError::Resource`] if
/// there are more records than the header can count.
pub fn write_store<W: Write + Seek>(
    stream: &mut W,
    header: &Header,
    records: &[Record],
) -> Result<Header, StoreError> {
    let count = u16::try_from(records.len()).map_err(|_| {
        StoreError::Resource(format!(
            "{} records exceed the format limit of {}",
            records.len(),
            u16::MAX
        ))
    })?;
    if header.count != count {
        warn!(
            "header count {} disagrees with {} records; writing {}",
            header.count, count, count
        );
    }
    let committed = header.committed(count);

    stream.seek(SeekFrom::Start(0))?;
    let mut out = BufWriter::new(&mut *stream);
    committed.write_to(&mut out)?;
    for record in records {
        record.write_to(&mut out)?;
    }
    out.flush()?;

    debug!(
        "wrote store: {} records, {} bytes",
        committed.count, committed.filesize
    );
    Ok(committed)
}
