use std::{
    fmt,
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
};

use log::info;

#[derive(Debug, PartialEq)]
pub enum DiskError {
    /// The store could not be opened or positioned.
    StoreUnavailable(io::ErrorKind),
    /// Fewer than a whole block was available at the block's offset.
    TruncatedRead { block_number: usize, available: usize },
    OverCapacity,
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskError::StoreUnavailable(kind) => write!(f, "backing store unavailable: {}", kind),
            DiskError::TruncatedRead {
                block_number,
                available,
            } => write!(
                f,
                "truncated read of block[{}]: only {} bytes available",
                block_number, available
            ),
            DiskError::OverCapacity => write!(f, "block number over disk capacity"),
        }
    }
}

impl std::error::Error for DiskError {}

/// Read-only store of `BLOCKS` fixed-size blocks laid out back to back with no header.
/// Block `n` lives at byte offset `n * BLOCKSIZE`.
#[derive(Debug)]
pub struct Disk<S, const BLOCKSIZE: usize, const BLOCKS: usize> {
    store: S,
}

impl<const BLOCKSIZE: usize, const BLOCKS: usize> Disk<File, BLOCKSIZE, BLOCKS> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DiskError> {
        let path = path.as_ref();
        let file = File::options()
            .read(true)
            .open(path)
            .map_err(|e| DiskError::StoreUnavailable(e.kind()))?;
        info!("Opened backing store {}", path.display());
        Ok(Self::connect(file))
    }
}

impl<S: Read + Seek, const BLOCKSIZE: usize, const BLOCKS: usize> Disk<S, BLOCKSIZE, BLOCKS> {
    /// Wraps an already opened read handle.
    pub fn connect(store: S) -> Self {
        assert!(
            BLOCKSIZE.is_power_of_two(),
            "Block size {} is not a power of 2",
            BLOCKSIZE
        );
        assert!(BLOCKS > 0, "Disk must hold at least one block");
        Self { store }
    }

    pub const fn capacity() -> usize {
        BLOCKSIZE * BLOCKS
    }

    pub fn read_block(&mut self, block_number: usize) -> Result<Box<[u8; BLOCKSIZE]>, DiskError> {
        info!("Start reading block[{}]", block_number);
        if block_number >= BLOCKS {
            return Err(DiskError::OverCapacity);
        }
        self.store
            .seek(SeekFrom::Start((block_number * BLOCKSIZE) as u64))
            .map_err(|e| DiskError::StoreUnavailable(e.kind()))?;

        let mut bytes = Vec::with_capacity(BLOCKSIZE);
        (&mut self.store)
            .take(BLOCKSIZE as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| DiskError::StoreUnavailable(e.kind()))?;
        if bytes.len() < BLOCKSIZE {
            return Err(DiskError::TruncatedRead {
                block_number,
                available: bytes.len(),
            });
        }

        let mut buf = Box::new([0; BLOCKSIZE]);
        buf.copy_from_slice(&bytes);
        info!("Done reading block[{}]", block_number);
        Ok(buf)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
