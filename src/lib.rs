//! Virtual memory manager simulator.
//!
//! Logical addresses are read from a text stream, translated through a
//! 16-entry TLB and a 256-entry page table, and served from a pool of frames
//! filled on demand from a backing store. Each translation yields the physical
//! address and the signed byte stored there.

use std::io::{BufRead, Read, Seek, Write};

use disk::Disk;
use mmu::{Statistics, Translator};

pub mod address_stream;
pub mod error;
pub mod report;

pub use address_stream::{parse_address, AddressStream, MalformedAddress};
pub use error::Error;
pub use report::ResultWriter;

pub const PAGE_SIZE: usize = 256;
pub const NUM_PAGES: usize = 256;
pub const TLB_ENTRIES: usize = 16;
/// Physical memory is half the logical address space, so frames get recycled.
pub const NUM_FRAMES: usize = 128;
/// One frame per page: no frame is ever recycled.
pub const FULL_MEMORY_FRAMES: usize = 256;

pub const BACKING_STORE_FILENAME: &str = "BACKING_STORE.bin";

pub type BackingStore<S> = Disk<S, PAGE_SIZE, NUM_PAGES>;
pub type Simulator<S, const FRAMES: usize> =
    Translator<S, PAGE_SIZE, NUM_PAGES, FRAMES, TLB_ENTRIES>;

/// Translates every address of `stream` in order and records each result.
/// Stops at the first fatal error; the result of the failing address is not recorded.
pub fn simulate<S, R, W, const FRAMES: usize>(
    translator: &mut Simulator<S, FRAMES>,
    stream: &mut AddressStream<R>,
    writer: &mut ResultWriter<W>,
) -> Result<Statistics, Error>
where
    S: Read + Seek,
    R: BufRead,
    W: Write,
{
    for address in stream {
        let translation = translator.translate(address?)?;
        writer.record(&translation)?;
    }
    writer.flush()?;
    Ok(translator.statistics())
}
