use thiserror::Error;

/// Structural faults in a staffdb file or in input destined for one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("truncated {what}: need {need} bytes, got {got}")]
    Truncated {
        what: &'static str,
        need: usize,
        got: usize,
    },
    #[error("improper header magic: {found:#010x}")]
    BadMagic { found: u32 },
    #[error("improper header version: {found}")]
    BadVersion { found: u16 },
    #[error("corrupted database: header says {header} bytes, file has {actual}")]
    Corrupted { header: u64, actual: u64 },
    #[error("corrupted database: {count} records need {expected} bytes, header says {filesize}")]
    CountMismatch {
        count: u16,
        expected: u64,
        filesize: u32,
    },
    #[error("malformed employee line {line:?}: expected name,address,hours")]
    MalformedLine { line: String },
}
