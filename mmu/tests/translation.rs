use std::io::Cursor;

use disk::Disk;
use mmu::{Lookup, Translation, Translator};
use rand::Rng;

const PAGE_SIZE: usize = 256;
const PAGES: usize = 256;

fn byte_at(page: u32, offset: u32) -> u8 {
    (page.wrapping_mul(31) + offset) as u8
}

fn backing_store() -> Disk<Cursor<Vec<u8>>, PAGE_SIZE, PAGES> {
    let bytes: Vec<u8> = (0..PAGES as u32)
        .flat_map(|page| (0..PAGE_SIZE as u32).map(move |offset| byte_at(page, offset)))
        .collect();
    Disk::connect(Cursor::new(bytes))
}

fn address(page: u32, offset: u32) -> u32 {
    (page << 8) | offset
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn small_tlb_scenario() {
    init_logger();
    let mut translator = Translator::<_, PAGE_SIZE, PAGES, 4, 2>::new(backing_store());
    let results: Vec<Translation> = translator
        .translate_all([5, 9, 5, 13, 17, 5].iter().map(|page| address(*page, 10)))
        .unwrap();

    let lookups: Vec<Lookup> = results.iter().map(|t| t.lookup).collect();
    assert_eq!(
        lookups,
        vec![
            Lookup::PageFault,
            Lookup::PageFault,
            Lookup::TlbHit,
            Lookup::PageFault,
            Lookup::PageFault,
            Lookup::PageTableHit,
        ]
    );
    assert_eq!(translator.statistics().page_faults, 4);
    assert_eq!(results[0].physical, results[2].physical);
    assert_eq!(results[0].physical, results[5].physical);
    assert_eq!(results[5].value, byte_at(5, 10) as i8);
}

#[test]
fn fifo_frame_reuse() {
    let mut translator = Translator::<_, PAGE_SIZE, PAGES, 4, 16>::new(backing_store());
    let results = translator
        .translate_all((0..5).map(|page| address(page, 0)))
        .unwrap();

    assert!(results.iter().all(|t| t.lookup == Lookup::PageFault));
    assert_eq!(results[4].physical >> 8, results[0].physical >> 8);
    assert_eq!(translator.page_table().lookup(0).unwrap(), None);
    assert_eq!(translator.page_table().lookup(4).unwrap(), Some(0));
    assert_eq!(translator.tlb().lookup(0), None);
    assert_eq!(translator.frame_cursor(), 1);
}

#[test]
fn reuse_ignores_recent_use() {
    let mut translator = Translator::<_, PAGE_SIZE, PAGES, 2, 16>::new(backing_store());
    translator.translate(address(1, 0)).unwrap();
    translator.translate(address(2, 0)).unwrap();
    // page 1 is touched again, yet it still owns the oldest frame
    assert_eq!(translator.translate(address(1, 0)).unwrap().lookup, Lookup::TlbHit);
    translator.translate(address(3, 0)).unwrap();
    assert_eq!(translator.page_table().lookup(1).unwrap(), None);
    assert_eq!(translator.page_table().lookup(2).unwrap(), Some(1));
}

#[test]
fn full_memory_never_recycles() {
    let mut translator = Translator::<_, PAGE_SIZE, PAGES, 256, 16>::new(backing_store());
    translator
        .translate_all((0..PAGES as u32).map(|page| address(page, 1)))
        .unwrap();
    translator
        .translate_all((0..PAGES as u32).map(|page| address(page, 2)))
        .unwrap();
    let stats = translator.statistics();
    assert_eq!(stats.page_faults, 256);
    assert_eq!(stats.page_table_hits, 256);
    assert_eq!(translator.page_table().mapped_pages(), 256);
}

#[test]
fn logical_zero_is_translated() {
    let mut translator = Translator::<_, PAGE_SIZE, PAGES, 4, 2>::new(backing_store());
    let translation = translator.translate(0).unwrap();
    assert_eq!(translation.physical, 0);
    assert_eq!(translation.value, byte_at(0, 0) as i8);
}

#[test]
fn random_trace_stays_consistent() {
    init_logger();
    let mut rng = rand::thread_rng();
    let mut translator = Translator::<_, PAGE_SIZE, PAGES, 8, 4>::new(backing_store());
    let mut previous = translator.statistics();

    for _ in 0..5000 {
        let page = rng.gen_range(0..24);
        let offset = rng.gen_range(0..PAGE_SIZE as u32);
        let high = rng.gen::<u16>() as u32;
        let translation = translator.translate((high << 16) | address(page, offset)).unwrap();

        assert_eq!(translator.check_consistency(), vec![]);
        assert_eq!(translation.value, byte_at(page, offset) as i8);
        assert_eq!(translation.physical & 0xFF, offset);
        assert!(((translation.physical >> 8) as usize) < 8);

        let stats = translator.statistics();
        assert_eq!(stats.tlb_hits + stats.tlb_misses(), stats.total_references);
        assert!(stats.page_faults <= stats.tlb_misses());
        assert!(stats.total_references > previous.total_references);
        assert!(stats.tlb_hits >= previous.tlb_hits);
        assert!(stats.page_faults >= previous.page_faults);
        previous = stats;
    }
}

#[test]
fn consecutive_translations_of_a_page_agree() {
    let mut rng = rand::thread_rng();
    let mut translator = Translator::<_, PAGE_SIZE, PAGES, 4, 2>::new(backing_store());
    for _ in 0..500 {
        let page = rng.gen_range(0..PAGES as u32);
        let first = translator.translate(address(page, rng.gen_range(0..256))).unwrap();
        let second = translator.translate(address(page, rng.gen_range(0..256))).unwrap();
        assert_eq!(second.lookup, Lookup::TlbHit);
        assert_eq!(first.physical >> 8, second.physical >> 8);
    }
}
