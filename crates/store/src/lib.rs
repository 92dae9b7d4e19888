//! # Store — load, append, rewrite
//!
//! A [`Store`] is one staffdb file held in memory: a [`Header`] plus the
//! ordered list of [`Record`]s it describes. The store is loaded in one go
//! ([`open_store`]), mutated in memory ([`append_record`]) and persisted by
//! rewriting the whole stream from offset 0 ([`write_store`]). There is no
//! partial update.
//!
//! `records.len() == header.count` holds for every `Store` handed out by
//! this crate.

mod builder;
mod reader;
mod writer;

use dbfile::{FormatError, Header, Record};
use std::io::{self, Read, Seek, Write};
use thiserror::Error;

pub use builder::{append_record, parse_hours, parse_line};
pub use reader::open_store;
pub use writer::write_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("out of resources: {0}")]
    Resource(String),
}

impl StoreError {
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, StoreError::Format(_))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, StoreError::Resource(_))
    }
}

/// An in-memory staffdb database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    header: Header,
    records: Vec<Record>,
}

impl Store {
    /// An empty store with a fresh header.
    pub fn new() -> Self {
        Self {
            header: Header::new(),
            records: Vec::new(),
        }
    }

    pub(crate) fn from_parts(header: Header, records: Vec<Record>) -> Self {
        debug_assert_eq!(usize::from(header.count), records.len());
        Self { header, records }
    }

    /// Loads and validates a store from `stream`. See [`open_store`].
    pub fn open<R: Read + Seek>(stream: &mut R) -> Result<Self, StoreError> {
        open_store(stream)
    }

    /// Appends one `name,address,hours` line. See [`append_record`].
    pub fn append(&mut self, raw_line: &str) -> Result<(), StoreError> {
        append_record(self, raw_line)
    }

    /// Rewrites `stream` with this store and adopts the committed header.
    pub fn write_to<W: Write + Seek>(&mut self, stream: &mut W) -> Result<Header, StoreError> {
        let committed = write_store(stream, &self.header, &self.records)?;
        self.header = committed;
        Ok(committed)
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
