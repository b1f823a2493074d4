//! Behavioral laws of the replacement policies, checked through the
//! engine, plus property-based fuzzing over random reference streams.

use pagesim::{references_from_pages, AccessKind, PagingEngine, PolicyKind, SimConfig};
use proptest::prelude::*;
use tempfile::TempDir;

const PAGE_BYTES: usize = 64;
const FRAMES: usize = 3;
const VIRTUAL_PAGES: usize = 8;

fn create_test_engine(kind: PolicyKind) -> (PagingEngine, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = SimConfig::new(FRAMES * PAGE_BYTES, PAGE_BYTES, VIRTUAL_PAGES).unwrap();
    let engine = PagingEngine::new(config, kind, &temp_dir.path().join("swap.bin")).unwrap();
    (engine, temp_dir)
}

#[test]
fn test_cold_start_never_evicts() {
    // The first `total_frames` distinct references always fault and
    // never push anything out.
    for kind in PolicyKind::ALL {
        let (mut engine, _temp) = create_test_engine(kind);
        engine.run(&references_from_pages(&[4, 1, 6])).unwrap();

        let stats = engine.stats();
        assert_eq!(stats.faults, 3, "{}", kind.name());
        assert_eq!(stats.hits, 0, "{}", kind.name());
        assert_eq!(stats.swaps_out, 0, "{}", kind.name());
        assert_eq!(engine.resident_pages(), vec![1, 4, 6], "{}", kind.name());
    }
}

#[test]
fn test_fifo_faults_on_every_access_of_a_long_cycle() {
    // A repeating cycle of more distinct pages than frames defeats FIFO
    // entirely: after the initial fills, every access faults.
    let (mut engine, _temp) = create_test_engine(PolicyKind::Fifo);
    let cycle = [0usize, 1, 2, 3];
    let stream: Vec<usize> = cycle.iter().copied().cycle().take(40).collect();
    engine.run(&references_from_pages(&stream)).unwrap();

    let stats = engine.stats();
    assert_eq!(stats.accesses, 40);
    assert_eq!(stats.faults, 40);
    assert_eq!(stats.hits, 0);
}

#[test]
fn test_lru_matches_fifo_on_loop_free_streams() {
    // With every page referenced at most once there is nothing for
    // recency to exploit; both policies fault once per distinct page.
    let stream: Vec<usize> = (0..VIRTUAL_PAGES).collect();

    let (mut fifo, _t1) = create_test_engine(PolicyKind::Fifo);
    fifo.run(&references_from_pages(&stream)).unwrap();

    let (mut lru, _t2) = create_test_engine(PolicyKind::Lru);
    lru.run(&references_from_pages(&stream)).unwrap();

    assert_eq!(fifo.stats().faults, lru.stats().faults);
    assert_eq!(fifo.stats().faults, VIRTUAL_PAGES as u64);
}

#[test]
fn test_lru_beats_fifo_on_a_reuse_heavy_stream() {
    // Sanity check that the policies actually differ: tight reuse of a
    // hot page favors LRU.
    let stream = [0usize, 1, 2, 0, 3, 0, 1, 0, 2, 0, 3, 0];

    let (mut fifo, _t1) = create_test_engine(PolicyKind::Fifo);
    fifo.run(&references_from_pages(&stream)).unwrap();

    let (mut lru, _t2) = create_test_engine(PolicyKind::Lru);
    lru.run(&references_from_pages(&stream)).unwrap();

    assert!(lru.stats().faults <= fifo.stats().faults);
}

#[test]
fn test_clock_terminates_under_pressure() {
    // Every access re-arms the reference bits, the worst case for the
    // sweep; the run must still complete with the resident bound held.
    let (mut engine, _temp) = create_test_engine(PolicyKind::Clock);
    let stream: Vec<usize> = (0..VIRTUAL_PAGES).cycle().take(200).collect();
    engine.run(&references_from_pages(&stream)).unwrap();

    assert_eq!(engine.stats().accesses, 200);
    assert!(engine.resident_pages().len() <= FRAMES);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_counters_and_tables_stay_consistent(
        stream in prop::collection::vec((0..VIRTUAL_PAGES, prop::bool::ANY), 1..200)
    ) {
        for kind in PolicyKind::ALL {
            let (mut engine, _temp) = create_test_engine(kind);
            for &(page, write) in &stream {
                let access = if write { AccessKind::Write } else { AccessKind::Read };
                engine.access(page, access).unwrap();
            }

            let stats = engine.stats();
            prop_assert_eq!(stats.accesses, stream.len() as u64);
            prop_assert_eq!(stats.hits + stats.faults, stats.accesses);
            prop_assert!(stats.swaps_out <= stats.faults);
            prop_assert!(stats.swaps_in <= stats.faults);

            let resident = engine.resident_pages();
            prop_assert!(resident.len() <= FRAMES);
            for &page in &resident {
                let frame = engine.page_entry(page).unwrap().frame.unwrap();
                prop_assert_eq!(engine.frame_occupant(frame), Some(page));
            }
        }
    }

    #[test]
    fn prop_every_referenced_page_round_trips(
        stream in prop::collection::vec(0..VIRTUAL_PAGES, 1..100)
    ) {
        // After any stream, re-referencing a page must succeed and leave
        // it resident, whether it comes from a frame, the store, or a
        // first touch.
        let (mut engine, _temp) = create_test_engine(PolicyKind::Lru);
        engine.run(&references_from_pages(&stream)).unwrap();

        for &page in &stream {
            engine.access(page, AccessKind::Read).unwrap();
            prop_assert!(engine.is_resident(page));
        }
    }
}
