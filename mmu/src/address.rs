/// Splits logical addresses into `(page number, offset)` and joins
/// `(frame number, offset)` back into physical addresses.
///
/// Bits above `page_bits + offset_bits` are ignored when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCodec {
    page_bits: u32,
    offset_bits: u32,
}

impl AddressCodec {
    pub fn new(page_bits: u32, offset_bits: u32) -> Self {
        assert!(
            page_bits + offset_bits <= 32,
            "Page number and offset must fit in 32 bits"
        );
        Self {
            page_bits,
            offset_bits,
        }
    }

    /// Codec for a table of `pages` pages of `page_size` bytes, both powers of two.
    pub fn for_sizes(pages: usize, page_size: usize) -> Self {
        assert!(pages.is_power_of_two(), "Page count {} is not a power of 2", pages);
        assert!(
            page_size.is_power_of_two(),
            "Page size {} is not a power of 2",
            page_size
        );
        Self::new(pages.trailing_zeros(), page_size.trailing_zeros())
    }

    pub fn page_bits(&self) -> u32 {
        self.page_bits
    }

    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    pub fn page_mask(&self) -> u32 {
        mask(self.page_bits)
    }

    pub fn offset_mask(&self) -> u32 {
        mask(self.offset_bits)
    }

    pub fn decode(&self, address: u32) -> (u32, u32) {
        let page_number = address.checked_shr(self.offset_bits).unwrap_or(0) & self.page_mask();
        let offset = address & self.offset_mask();
        (page_number, offset)
    }

    pub fn encode(&self, frame_number: u32, offset: u32) -> u32 {
        frame_number.checked_shl(self.offset_bits).unwrap_or(0) | (offset & self.offset_mask())
    }
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

fn mask(bits: u32) -> u32 {
    match bits {
        32 => u32::MAX,
        _ => (1 << bits) - 1,
    }
}
