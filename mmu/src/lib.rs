//! Address translation for a demand-paged memory: a TLB and a page table in
//! front of a fixed pool of frames filled from a backing store.

mod address;
mod error;
mod page_table;
mod statistics;
mod tlb;
mod translator;

pub use address::AddressCodec;
pub use error::TranslationError;
pub use page_table::{PageTable, PageTableEntry, PageTableIterator};
pub use statistics::{Lookup, Statistics};
pub use tlb::{Tlb, TlbEntry};
pub use translator::{Inconsistency, Translation, Translator};
