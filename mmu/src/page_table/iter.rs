use super::PageTableEntry;

/// Walks every entry of a page table in page-number order, valid or not.
pub struct PageTableIterator<'a> {
    current: usize,
    entries: &'a [PageTableEntry],
}

impl<'a> PageTableIterator<'a> {
    pub(super) fn new(entries: &'a [PageTableEntry]) -> Self {
        Self {
            current: 0,
            entries,
        }
    }
}

impl<'a> Iterator for PageTableIterator<'a> {
    type Item = (u32, PageTableEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = *self.entries.get(self.current)?;
        let page_number = self.current as u32;
        self.current += 1;
        Some((page_number, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len().saturating_sub(self.current);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for PageTableIterator<'a> {}
