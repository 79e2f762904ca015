use log::debug;

use crate::TranslationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page_number: u32,
    pub frame_number: u32,
    pub valid: bool,
}

impl TlbEntry {
    const INVALID: TlbEntry = TlbEntry {
        page_number: 0,
        frame_number: 0,
        valid: false,
    };
}

/// Translation lookaside buffer with `ENTRIES` slots.
///
/// Slots are replaced strictly in insertion order: the caller owns the cursor
/// naming the next victim, and a recently used entry gets no protection.
pub struct Tlb<const ENTRIES: usize> {
    entries: [TlbEntry; ENTRIES],
}

impl<const ENTRIES: usize> Tlb<ENTRIES> {
    pub fn init() -> Self {
        assert!(
            ENTRIES.is_power_of_two(),
            "TLB size {} is not a power of 2",
            ENTRIES
        );
        Self {
            entries: [TlbEntry::INVALID; ENTRIES],
        }
    }

    pub fn lookup(&self, page_number: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.valid && entry.page_number == page_number)
            .map(|entry| entry.frame_number)
    }

    /// Writes the mapping into slot `cursor` and returns the cursor of the next victim.
    pub fn install(
        &mut self,
        page_number: u32,
        frame_number: u32,
        cursor: usize,
    ) -> Result<usize, TranslationError> {
        if cursor >= ENTRIES {
            return Err(TranslationError::OutOfRange);
        }
        self.invalidate_by_frame(frame_number);
        let slot = &mut self.entries[cursor];
        if slot.valid {
            debug!(
                "TLB slot {} replaced: page {} -> page {}",
                cursor, slot.page_number, page_number
            );
        }
        *slot = TlbEntry {
            page_number,
            frame_number,
            valid: true,
        };
        Ok((cursor + 1) % ENTRIES)
    }

    /// Drops every entry pointing at `frame_number`. Returns how many were dropped.
    pub fn invalidate_by_frame(&mut self, frame_number: u32) -> usize {
        let mut invalidated = 0;
        for entry in self
            .entries
            .iter_mut()
            .filter(|entry| entry.valid && entry.frame_number == frame_number)
        {
            entry.valid = false;
            invalidated += 1;
        }
        invalidated
    }

    pub fn entries(&self) -> &[TlbEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.valid).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const ENTRIES: usize> Default for Tlb<ENTRIES> {
    fn default() -> Self {
        Self::init()
    }
}
