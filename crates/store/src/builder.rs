use dbfile::{FormatError, Record};
use log::debug;

use crate::{Store, StoreError};

/// Appends one employee given as a `name,address,hours` line.
///
/// Name and address longer than their fields are truncated. `hours` is
/// parsed leniently, see [`parse_hours`].
///
/// Either the header count and the record list both grow by one, or the
/// store is left untouched.
///
/// # Errors
///
/// [`StoreError::Format`] if the line does not split into three non-empty
/// fields, [`StoreError::Resource`] if the store already holds `u16::MAX`
/// records or the record list cannot grow.
pub fn append_record(store: &mut Store, raw_line: &str) -> Result<(), StoreError> {
    let (name, address, hours) = parse_line(raw_line)?;

    let count = store.header.count.checked_add(1).ok_or_else(|| {
        StoreError::Resource(format!("store already holds {} records", u16::MAX))
    })?;
    store
        .records
        .try_reserve(1)
        .map_err(|e| StoreError::Resource(format!("cannot grow record list: {e}")))?;

    let record = Record::new(name, address, parse_hours(hours));
    store.header = store.header.with_count(count);
    store.records.push(record);

    debug!("appended record {} ({})", count, name);
    Ok(())
}

/// Splits `name,address,hours` into its three fields.
///
/// A trailing newline is ignored. Missing, empty or extra fields are rejected.
pub fn parse_line(raw_line: &str) -> Result<(&str, &str, &str), FormatError> {
    let line = raw_line.trim_end_matches(['\r', '\n']);
    let mut fields = line.split(',');
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(address), Some(hours), None)
            if !name.is_empty() && !address.is_empty() && !hours.is_empty() =>
        {
            Ok((name, address, hours))
        }
        _ => Err(FormatError::MalformedLine {
            line: line.to_owned(),
        }),
    }
}

/// Lenient unsigned parse: leading whitespace, an optional `+`, then as many
/// decimal digits as are present. Anything else yields 0; overflow saturates.
///
/// `"40"` → 40, `" 7h"` → 7, `"abc"` → 0, `"-5"` → 0.
pub fn parse_hours(text: &str) -> u32 {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    text.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, d| {
            acc.saturating_mul(10).saturating_add(u32::from(d - b'0'))
        })
}
