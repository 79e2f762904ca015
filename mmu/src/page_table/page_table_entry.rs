/// Maps one page to the frame holding it.
/// An invalid entry keeps its stale frame number until the page is mapped again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    frame_number: u32,
    valid: bool,
}

impl PageTableEntry {
    pub(super) const INVALID: PageTableEntry = PageTableEntry {
        frame_number: 0,
        valid: false,
    };

    pub fn get_frame_number(&self) -> u32 {
        self.frame_number
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(super) fn map(&mut self, frame_number: u32) {
        self.frame_number = frame_number;
        self.valid = true;
    }

    pub(super) fn invalidate(&mut self) {
        self.valid = false;
    }
}
