use std::io::{Read, Seek};

use disk::Disk;
use log::debug;
use memory::PhysicalMemory;

use crate::{AddressCodec, Lookup, PageTable, Statistics, Tlb, TranslationError};

/// Outcome of translating one logical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: u32,
    pub physical: u32,
    pub value: i8,
    pub lookup: Lookup,
}

/// A broken agreement between the TLB and the page table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// A live TLB entry disagrees with the page table about its page.
    StaleTlbEntry {
        slot: usize,
        page_number: u32,
        tlb_frame: u32,
        table_frame: Option<u32>,
    },
    /// Two live TLB entries cache the same page.
    DuplicateTlbEntry { page_number: u32 },
    /// Two live page table entries claim the same frame.
    SharedFrame { frame_number: u32, pages: [u32; 2] },
}

/// Demand-paging MMU: TLB in front of a page table, faults served from a
/// backing store into a FIFO-recycled pool of `FRAMES` frames.
///
/// The TLB and the frame pool keep independent FIFO cursors. Whenever a frame
/// is handed to a new page, every page table and TLB entry still naming it is
/// invalidated before the new mapping is installed.
pub struct Translator<
    S,
    const PAGE_SIZE: usize,
    const PAGES: usize,
    const FRAMES: usize,
    const TLB_ENTRIES: usize,
> {
    codec: AddressCodec,
    disk: Disk<S, PAGE_SIZE, PAGES>,
    memory: PhysicalMemory<PAGE_SIZE, FRAMES>,
    page_table: PageTable<PAGES, FRAMES>,
    tlb: Tlb<TLB_ENTRIES>,
    frame_cursor: u32,
    tlb_cursor: usize,
    statistics: Statistics,
}

impl<
        S: Read + Seek,
        const PAGE_SIZE: usize,
        const PAGES: usize,
        const FRAMES: usize,
        const TLB_ENTRIES: usize,
    > Translator<S, PAGE_SIZE, PAGES, FRAMES, TLB_ENTRIES>
{
    pub fn new(disk: Disk<S, PAGE_SIZE, PAGES>) -> Self {
        Self {
            codec: AddressCodec::for_sizes(PAGES, PAGE_SIZE),
            disk,
            memory: PhysicalMemory::create(),
            page_table: PageTable::init(),
            tlb: Tlb::init(),
            frame_cursor: 0,
            tlb_cursor: 0,
            statistics: Statistics::default(),
        }
    }

    pub fn translate(&mut self, logical: u32) -> Result<Translation, TranslationError> {
        let (page_number, offset) = self.codec.decode(logical);

        let (frame_number, lookup) = match self.tlb.lookup(page_number) {
            Some(frame_number) => (frame_number, Lookup::TlbHit),
            None => {
                let (frame_number, lookup) = match self.page_table.lookup(page_number)? {
                    Some(frame_number) => (frame_number, Lookup::PageTableHit),
                    None => (self.handle_page_fault(page_number)?, Lookup::PageFault),
                };
                self.tlb.invalidate_by_frame(frame_number);
                self.tlb_cursor = self
                    .tlb
                    .install(page_number, frame_number, self.tlb_cursor)?;
                (frame_number, lookup)
            }
        };

        let physical = self.codec.encode(frame_number, offset);
        let value = self
            .memory
            .read_i8(frame_number as usize, offset as usize)?;
        self.statistics.record(lookup);
        debug!(
            "{} (page {}, offset {}) -> {} [{:?}]",
            logical, page_number, offset, physical, lookup
        );

        Ok(Translation {
            logical,
            physical,
            value,
            lookup,
        })
    }

    /// Translates addresses in order, stopping at the first fatal error.
    pub fn translate_all<I>(&mut self, addresses: I) -> Result<Vec<Translation>, TranslationError>
    where
        I: IntoIterator<Item = u32>,
    {
        addresses
            .into_iter()
            .map(|address| self.translate(address))
            .collect()
    }

    fn handle_page_fault(&mut self, page_number: u32) -> Result<u32, TranslationError> {
        if page_number as usize >= PAGES {
            return Err(TranslationError::OutOfRange);
        }
        let frame_number = self.frame_cursor;
        debug!("Page fault on page {}, loading into frame {}", page_number, frame_number);

        let page = self.disk.read_block(page_number as usize)?;
        self.memory.load(frame_number as usize, &page)?;
        self.page_table.install(page_number, frame_number)?;
        let dropped = self.tlb.invalidate_by_frame(frame_number);
        if dropped > 0 {
            debug!("Dropped {} TLB entries for frame {}", dropped, frame_number);
        }

        self.frame_cursor = PageTable::<PAGES, FRAMES>::next_victim_frame(frame_number);
        Ok(frame_number)
    }

    pub fn check_consistency(&self) -> Vec<Inconsistency> {
        let mut found = Vec::new();

        let live_tlb = self
            .tlb
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.valid);
        let mut cached_pages = Vec::new();
        for (slot, entry) in live_tlb {
            let table_frame = self.page_table.lookup(entry.page_number).unwrap_or(None);
            if table_frame != Some(entry.frame_number) {
                found.push(Inconsistency::StaleTlbEntry {
                    slot,
                    page_number: entry.page_number,
                    tlb_frame: entry.frame_number,
                    table_frame,
                });
            }
            if cached_pages.contains(&entry.page_number) {
                found.push(Inconsistency::DuplicateTlbEntry {
                    page_number: entry.page_number,
                });
            }
            cached_pages.push(entry.page_number);
        }

        let mut owners: Vec<Option<u32>> = vec![None; FRAMES];
        for (page_number, entry) in self.page_table.iter().filter(|(_, e)| e.is_valid()) {
            let frame_number = entry.get_frame_number();
            match owners.get_mut(frame_number as usize) {
                Some(Some(owner)) => found.push(Inconsistency::SharedFrame {
                    frame_number,
                    pages: [*owner, page_number],
                }),
                Some(slot) => *slot = Some(page_number),
                None => {}
            }
        }

        found
    }

    pub fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    pub fn page_table(&self) -> &PageTable<PAGES, FRAMES> {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb<TLB_ENTRIES> {
        &self.tlb
    }

    pub fn memory(&self) -> &PhysicalMemory<PAGE_SIZE, FRAMES> {
        &self.memory
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn frame_cursor(&self) -> u32 {
        self.frame_cursor
    }

    pub fn tlb_cursor(&self) -> usize {
        self.tlb_cursor
    }
}
