mod iter;
mod page_table_entry;

use log::debug;

pub use iter::PageTableIterator;
pub use page_table_entry::PageTableEntry;

use crate::TranslationError;

/// Direct-indexed table of `ENTRIES` pages mapping onto a pool of `FRAMES` frames.
pub struct PageTable<const ENTRIES: usize, const FRAMES: usize> {
    entries: [PageTableEntry; ENTRIES],
}

impl<const ENTRIES: usize, const FRAMES: usize> PageTable<ENTRIES, FRAMES> {
    pub fn init() -> Self {
        assert!(
            ENTRIES.is_power_of_two(),
            "Page table size {} is not a power of 2",
            ENTRIES
        );
        assert!(FRAMES > 0, "Page table must map onto at least one frame");
        Self {
            entries: [PageTableEntry::INVALID; ENTRIES],
        }
    }

    pub fn entry(&self, page_number: u32) -> Option<PageTableEntry> {
        self.entries.get(page_number as usize).copied()
    }

    /// Frame holding `page_number`, if the page is mapped.
    pub fn lookup(&self, page_number: u32) -> Result<Option<u32>, TranslationError> {
        let entry = self.entry(page_number).ok_or(TranslationError::OutOfRange)?;
        Ok(entry.is_valid().then(|| entry.get_frame_number()))
    }

    /// Maps `page_number` to `frame_number`. Any other entry still naming
    /// `frame_number` loses its mapping first, since the frame is being reused.
    pub fn install(&mut self, page_number: u32, frame_number: u32) -> Result<(), TranslationError> {
        if page_number as usize >= ENTRIES || frame_number as usize >= FRAMES {
            return Err(TranslationError::OutOfRange);
        }
        self.invalidate_by_frame(frame_number);
        self.entries[page_number as usize].map(frame_number);
        Ok(())
    }

    fn invalidate_by_frame(&mut self, frame_number: u32) {
        for (page_number, entry) in self.entries.iter_mut().enumerate() {
            if entry.get_frame_number() == frame_number && entry.is_valid() {
                debug!(
                    "Page {} evicted from frame {}",
                    page_number, frame_number
                );
                entry.invalidate();
            }
        }
    }

    /// FIFO successor of the frame last handed out.
    pub fn next_victim_frame(current_frame: u32) -> u32 {
        ((current_frame as usize + 1) % FRAMES) as u32
    }

    /// Page currently mapped to `frame_number`, if any.
    pub fn owner_of(&self, frame_number: u32) -> Option<u32> {
        self.iter()
            .find(|(_, entry)| entry.is_valid() && entry.get_frame_number() == frame_number)
            .map(|(page_number, _)| page_number)
    }

    pub fn mapped_pages(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_valid()).count()
    }

    pub fn iter(&self) -> PageTableIterator<'_> {
        PageTableIterator::new(&self.entries)
    }
}

impl<const ENTRIES: usize, const FRAMES: usize> Default for PageTable<ENTRIES, FRAMES> {
    fn default() -> Self {
        Self::init()
    }
}
