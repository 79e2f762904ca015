use std::{fmt, io};

use disk::DiskError;
use memory::MemoryError;

/// Fatal failures of the translation pipeline. None of them is retried.
#[derive(Debug, PartialEq)]
pub enum TranslationError {
    StoreUnavailable(io::ErrorKind),
    TruncatedRead { page_number: u32, available: usize },
    OutOfRange,
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::StoreUnavailable(kind) => {
                write!(f, "backing store unavailable: {}", kind)
            }
            TranslationError::TruncatedRead {
                page_number,
                available,
            } => write!(
                f,
                "backing store truncated: page {} has only {} bytes",
                page_number, available
            ),
            TranslationError::OutOfRange => write!(f, "index outside configured bounds"),
        }
    }
}

impl std::error::Error for TranslationError {}

impl From<DiskError> for TranslationError {
    fn from(err: DiskError) -> Self {
        match err {
            DiskError::StoreUnavailable(kind) => TranslationError::StoreUnavailable(kind),
            DiskError::TruncatedRead {
                block_number,
                available,
            } => TranslationError::TruncatedRead {
                page_number: block_number as u32,
                available,
            },
            DiskError::OverCapacity => TranslationError::OutOfRange,
        }
    }
}

impl From<MemoryError> for TranslationError {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::OutOfRange => TranslationError::OutOfRange,
        }
    }
}
