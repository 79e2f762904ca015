use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use mmu::{PageTable, Statistics, Tlb, Translation};

pub const LOGICAL_FILENAME: &str = "out1.txt";
pub const PHYSICAL_FILENAME: &str = "out2.txt";
pub const VALUES_FILENAME: &str = "out3.txt";

/// Records translations as three parallel columns, one decimal value per line:
/// logical addresses, physical addresses, and the signed byte values.
pub struct ResultWriter<W> {
    logical: W,
    physical: W,
    values: W,
}

impl ResultWriter<BufWriter<File>> {
    /// Creates (or truncates) `out1.txt`, `out2.txt` and `out3.txt` in `dir`.
    pub fn create<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref();
        let open = |name: &str| File::create(dir.join(name)).map(BufWriter::new);
        Ok(Self::new(
            open(LOGICAL_FILENAME)?,
            open(PHYSICAL_FILENAME)?,
            open(VALUES_FILENAME)?,
        ))
    }
}

impl<W: Write> ResultWriter<W> {
    pub fn new(logical: W, physical: W, values: W) -> Self {
        Self {
            logical,
            physical,
            values,
        }
    }

    pub fn record(&mut self, translation: &Translation) -> io::Result<()> {
        writeln!(self.logical, "{}", translation.logical)?;
        writeln!(self.physical, "{}", translation.physical)?;
        writeln!(self.values, "{}", translation.value)?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.logical.flush()?;
        self.physical.flush()?;
        self.values.flush()
    }

    pub fn into_inner(self) -> (W, W, W) {
        (self.logical, self.physical, self.values)
    }
}

pub fn summary(stats: &Statistics) -> String {
    format!(
        "Page faults = {} / {}, {:.6}\nTLB hits = {} / {}, {:.6}",
        stats.page_faults,
        stats.total_references,
        stats.page_fault_rate(),
        stats.tlb_hits,
        stats.total_references,
        stats.tlb_hit_rate()
    )
}

pub fn dump_page_table<const ENTRIES: usize, const FRAMES: usize>(
    table: &PageTable<ENTRIES, FRAMES>,
) -> String {
    let mut out = String::from("\tfn\tvalid\n");
    for (page_number, entry) in table.iter() {
        out.push_str(&format!(
            "[{}]:\t{}\t{}\n",
            page_number,
            entry.get_frame_number(),
            entry.is_valid() as u8
        ));
    }
    out
}

pub fn dump_tlb<const ENTRIES: usize>(tlb: &Tlb<ENTRIES>) -> String {
    let mut out = String::from("\tpn\tfn\tvalid\n");
    for (slot, entry) in tlb.entries().iter().enumerate() {
        out.push_str(&format!(
            "[{}]:\t{}\t{}\t{}\n",
            slot, entry.page_number, entry.frame_number, entry.valid as u8
        ));
    }
    out
}
