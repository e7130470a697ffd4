/*!
 * Placement Policy Tests
 * Best-fit and worst-fit selection over a fragmented pool
 */

use pagemem::memory::{PageAllocator, PlacementPolicy};
use pretty_assertions::assert_eq;

/// Free runs of 3, 7, 2 and 9 pages, each followed by a one-page guard
fn fragmented(policy: PlacementPolicy) -> PageAllocator {
    let mut pool = PageAllocator::new(policy, 25, 4).unwrap();
    let layout = [
        ("f1", 12),
        ("g1", 4),
        ("f2", 28),
        ("g2", 4),
        ("f3", 8),
        ("g3", 4),
        ("f4", 36),
        ("g4", 4),
    ];
    for (name, units) in layout {
        pool.allocate(units, name).unwrap();
    }
    for name in ["f1", "f2", "f3", "f4"] {
        pool.free(name).unwrap();
    }

    let free_sizes: Vec<_> = pool
        .blocks()
        .into_iter()
        .filter(|b| b.is_free())
        .map(|b| b.size)
        .collect();
    assert_eq!(free_sizes, vec![3, 7, 2, 9]);
    pool
}

#[test]
fn test_best_fit_selects_smallest_adequate_block() {
    let mut pool = fragmented(PlacementPolicy::BestFit);
    let chosen = pool.find_space(3).unwrap();
    assert_eq!((chosen.base, chosen.size), (0, 3));

    pool.allocate(12, "P").unwrap();
    assert_eq!(pool.find_program("P").unwrap().base, 0);
    assert_eq!(pool.fragment_count(), 3);
}

#[test]
fn test_worst_fit_selects_largest_block() {
    let mut pool = fragmented(PlacementPolicy::WorstFit);
    let chosen = pool.find_space(3).unwrap();
    assert_eq!((chosen.base, chosen.size), (15, 9));

    pool.allocate(12, "P").unwrap();
    let placed = pool.find_program("P").unwrap();
    assert_eq!((placed.base, placed.size), (15, 3));
    assert_eq!(pool.fragment_count(), 4);
}

#[test]
fn test_best_fit_skips_too_small_blocks() {
    let pool = fragmented(PlacementPolicy::BestFit);
    let chosen = pool.find_space(5).unwrap();
    assert_eq!((chosen.base, chosen.size), (4, 7));
}

#[test]
fn test_policies_agree_when_one_block_fits() {
    for policy in [PlacementPolicy::BestFit, PlacementPolicy::WorstFit] {
        let pool = fragmented(policy);
        let chosen = pool.find_space(8).unwrap();
        assert_eq!(chosen.base, 15, "{policy}");
        assert!(pool.find_space(10).is_none(), "{policy}");
    }
}

#[test]
fn test_worst_fit_spreads_allocations() {
    let mut pool = PageAllocator::new(PlacementPolicy::WorstFit, 32, 4).unwrap();
    pool.allocate(16, "A").unwrap();
    pool.allocate(16, "B").unwrap();
    pool.allocate(16, "C").unwrap();
    pool.free("A").unwrap();

    // Free runs: 4 pages at 0, 20 pages at 12
    pool.allocate(8, "D").unwrap();
    assert_eq!(pool.find_program("D").unwrap().base, 12);

    let mut best = PageAllocator::new(PlacementPolicy::BestFit, 32, 4).unwrap();
    best.allocate(16, "A").unwrap();
    best.allocate(16, "B").unwrap();
    best.allocate(16, "C").unwrap();
    best.free("A").unwrap();

    best.allocate(8, "D").unwrap();
    assert_eq!(best.find_program("D").unwrap().base, 0);
}
