/// Which structure resolved a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    TlbHit,
    PageTableHit,
    PageFault,
}

/// Counters kept over a whole run. All of them only grow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub total_references: u64,
    pub tlb_hits: u64,
    pub page_table_hits: u64,
    pub page_faults: u64,
}

impl Statistics {
    pub(crate) fn record(&mut self, lookup: Lookup) {
        self.total_references += 1;
        match lookup {
            Lookup::TlbHit => self.tlb_hits += 1,
            Lookup::PageTableHit => self.page_table_hits += 1,
            Lookup::PageFault => self.page_faults += 1,
        }
    }

    pub fn tlb_misses(&self) -> u64 {
        self.page_table_hits + self.page_faults
    }

    pub fn page_fault_rate(&self) -> f64 {
        rate(self.page_faults, self.total_references)
    }

    pub fn tlb_hit_rate(&self) -> f64 {
        rate(self.tlb_hits, self.total_references)
    }
}

fn rate(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rates_are_zero() {
        let stats = Statistics::default();
        assert_eq!(stats.page_fault_rate(), 0.0);
        assert_eq!(stats.tlb_hit_rate(), 0.0);
        assert_eq!(stats.tlb_misses(), 0);
    }

    #[test]
    fn record_lookups() {
        let mut stats = Statistics::default();
        stats.record(Lookup::PageFault);
        stats.record(Lookup::PageFault);
        stats.record(Lookup::TlbHit);
        stats.record(Lookup::PageTableHit);
        assert_eq!(stats.total_references, 4);
        assert_eq!(stats.tlb_hits, 1);
        assert_eq!(stats.tlb_misses(), 3);
        assert_eq!(stats.page_faults, 2);
        assert_eq!(stats.page_fault_rate(), 0.5);
        assert_eq!(stats.tlb_hit_rate(), 0.25);
    }
}
