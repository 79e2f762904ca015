use std::{fmt, io};

use disk::DiskError;
use mmu::TranslationError;

/// Errors that end a simulation run.
#[derive(Debug)]
pub enum Error {
    Translation(TranslationError),
    /// Reading the address stream or writing results failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Translation(e) => write!(f, "{}", e),
            Error::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Translation(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<TranslationError> for Error {
    fn from(err: TranslationError) -> Self {
        Error::Translation(err)
    }
}

impl From<DiskError> for Error {
    fn from(err: DiskError) -> Self {
        Error::Translation(err.into())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
