/*!
 * Page Allocator Tests
 * Allocation, deallocation, coalescing and the reference session
 */

use pagemem::memory::{
    AllocError, Allocator, FreeError, MemoryInfo, MemoryPressure, PageAllocator, PlacementPolicy,
};
use pagemem::{ConfigError, PoolConfig};
use pretty_assertions::assert_eq;

fn reference_pool() -> PageAllocator {
    PageAllocator::new(PlacementPolicy::BestFit, 32, 4).expect("valid reference sizing")
}

#[test]
fn test_reference_session() {
    let mut pool = reference_pool();
    assert_eq!(pool.fragment_count(), 1);

    assert_eq!(pool.allocate(32, "A"), Ok(8));
    assert_eq!(pool.fragment_count(), 1);

    assert_eq!(pool.allocate(16, "B"), Ok(4));
    assert_eq!(pool.fragment_count(), 1);

    // 25 pages needed, 20 remain
    assert_eq!(
        pool.allocate(100, "C"),
        Err(AllocError::OutOfMemory {
            requested: 25,
            largest_free: 20
        })
    );
    assert_eq!(pool.fragment_count(), 1);

    assert_eq!(pool.free("A"), Ok(8));
    assert_eq!(pool.fragment_count(), 2);

    assert_eq!(pool.free("B"), Ok(4));
    assert_eq!(pool.fragment_count(), 1);
    assert_eq!(pool.block_count(), 1);
}

#[test]
fn test_sixty_four_kb_fits_in_remaining_space() {
    let mut pool = reference_pool();
    pool.allocate(32, "A").unwrap();
    pool.allocate(16, "B").unwrap();
    assert_eq!(pool.allocate(64, "C"), Ok(16));
    assert_eq!(pool.stats().free_pages, 4);
}

#[test]
fn test_initialization_from_config() {
    let config = PoolConfig::default()
        .with_capacity(64)
        .with_policy(PlacementPolicy::WorstFit);
    let pool = PageAllocator::from_config(&config).unwrap();

    assert_eq!(pool.capacity(), 64);
    assert_eq!(pool.policy(), PlacementPolicy::WorstFit);
    assert_eq!(pool.units_per_page(), 4);
    assert_eq!(pool.render_map(), vec!["Free"; 64]);
}

#[test]
fn test_invalid_construction() {
    assert_eq!(
        PageAllocator::new(PlacementPolicy::BestFit, 0, 4).unwrap_err(),
        ConfigError::ZeroCapacity
    );
    assert_eq!(
        PageAllocator::new(PlacementPolicy::BestFit, 32, 0).unwrap_err(),
        ConfigError::ZeroUnitsPerPage
    );
}

#[test]
fn test_zero_and_negative_sizes_rejected() {
    let mut pool = reference_pool();
    assert_eq!(pool.allocate(0, "A"), Err(AllocError::InvalidSize(0)));
    assert_eq!(pool.allocate(-4, "A"), Err(AllocError::InvalidSize(-4)));
    assert_eq!(pool.block_count(), 1);
    assert!(pool.find_program("A").is_none());
}

#[test]
fn test_partial_page_rounds_up() {
    let mut pool = reference_pool();
    assert_eq!(pool.allocate(1, "tiny"), Ok(1));
    assert_eq!(pool.allocate(5, "small"), Ok(2));
    assert_eq!(pool.find_program("small").unwrap().base, 1);
}

#[test]
fn test_exact_fit_keeps_block_count() {
    let mut pool = reference_pool();
    pool.allocate(16, "A").unwrap();
    pool.allocate(16, "B").unwrap();
    pool.allocate(16, "C").unwrap();
    pool.free("B").unwrap();
    let blocks_before = pool.block_count();

    assert_eq!(pool.allocate(16, "D"), Ok(4));
    assert_eq!(pool.block_count(), blocks_before);
    assert_eq!(pool.find_program("D").unwrap().base, 4);
}

#[test]
fn test_coalesce_both_sides() {
    let mut pool = reference_pool();
    pool.allocate(16, "A").unwrap();
    pool.allocate(16, "B").unwrap();
    pool.allocate(16, "C").unwrap();
    pool.allocate(80, "D").unwrap();

    pool.free("A").unwrap();
    pool.free("C").unwrap();
    assert_eq!(pool.fragment_count(), 2);

    pool.free("B").unwrap();
    let blocks = pool.blocks();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].is_free());
    assert_eq!((blocks[0].base, blocks[0].end()), (0, 12));
    assert_eq!(pool.fragment_count(), 1);
}

#[test]
fn test_round_trip_restores_layout() {
    let mut pool = reference_pool();
    pool.allocate(8, "A").unwrap();
    pool.allocate(12, "B").unwrap();
    pool.allocate(20, "C").unwrap();
    pool.free("B").unwrap();
    let before = pool.blocks();

    pool.allocate(4, "P").unwrap();
    pool.free("P").unwrap();
    assert_eq!(pool.blocks(), before);

    pool.allocate(12, "Q").unwrap();
    pool.free("Q").unwrap();
    assert_eq!(pool.blocks(), before);
}

#[test]
fn test_name_is_reusable_after_free() {
    let mut pool = reference_pool();
    pool.allocate(8, "A").unwrap();
    assert_eq!(
        pool.allocate(8, "A"),
        Err(AllocError::AlreadyRunning("A".to_string()))
    );
    pool.free("A").unwrap();
    assert_eq!(pool.allocate(8, "A"), Ok(2));
}

#[test]
fn test_free_missing_program() {
    let mut pool = reference_pool();
    assert_eq!(pool.free("ghost"), Err(FreeError::NotFound("ghost".into())));
    assert_eq!(pool.free("Free"), Err(FreeError::NotFound("Free".into())));
}

#[test]
fn test_pressure_rises_with_usage() {
    let mut pool = reference_pool();
    assert_eq!(pool.pressure(), MemoryPressure::Low);
    pool.allocate(80, "A").unwrap();
    assert_eq!(pool.pressure(), MemoryPressure::Medium);
    pool.allocate(28, "B").unwrap();
    assert_eq!(pool.pressure(), MemoryPressure::High);
    pool.allocate(20, "C").unwrap();
    assert_eq!(pool.pressure(), MemoryPressure::Critical);
    assert_eq!(pool.stats().usage_percentage, 100.0);
}

#[test]
fn test_trait_objects_drive_allocator() {
    fn churn<A: Allocator + MemoryInfo>(alloc: &mut A) -> usize {
        alloc.allocate(8, "x").unwrap();
        alloc.allocate(8, "y").unwrap();
        alloc.free("x").unwrap();
        alloc.fragment_count()
    }

    let mut pool = reference_pool();
    assert_eq!(churn(&mut pool), 2);
}

#[test]
fn test_stats_serialize() {
    let mut pool = reference_pool();
    pool.allocate(32, "A").unwrap();
    let json = serde_json::to_value(pool.stats()).unwrap();

    assert_eq!(json["policy"], "BestFit");
    assert_eq!(json["used_pages"], 8);
    assert_eq!(json["fragments"], 1);
    assert_eq!(json["pressure"], "Low");
}
