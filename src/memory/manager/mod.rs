/*!
 * Page Allocator
 *
 * Contiguous free-list allocator over a fixed pool of pages.
 *
 * ## Layout
 *
 * The pool is an address-ordered sequence of blocks, each a maximal run of
 * pages that is either free or occupied by one named program. The sequence
 * lives in an index-addressed arena with explicit prev/next links
 * ([`block_list`]).
 *
 * ## Operations
 *
 * - **Placement**: linear scan over free blocks, best-fit or worst-fit,
 *   first match wins ties
 * - **Split**: the occupied part takes the low-address side, the remainder
 *   becomes a new free block right after it
 * - **Coalesce**: a freed block merges with a free predecessor, then with a
 *   free successor
 *
 * ## Pool invariants
 *
 * 1. The sequence is non-empty
 * 2. Block sizes sum to the pool capacity
 * 3. No two adjacent blocks are free
 * 4. No two occupied blocks share a name
 * 5. Every block has at least one page
 *
 * Every public operation either commits fully or leaves the pool untouched.
 */

mod allocator;
mod block_list;
mod deallocator;
mod placement;
mod query;

use super::traits::{Allocator, MemoryInfo};
use super::types::{
    AllocResult, Block, BlockInfo, FreeResult, PlacementPolicy, PoolStats,
};
use crate::config::PoolConfig;
use crate::core::errors::ConfigError;
use crate::core::types::{Pages, Units};
use block_list::{BlockId, BlockList};
use tracing::info;

/// Page allocator owning the block sequence
///
/// Single-threaded by design. Callers sharing one allocator across threads
/// wrap it in a mutex and hold the lock for one whole operation.
#[derive(Debug)]
pub struct PageAllocator {
    blocks: BlockList,
    policy: PlacementPolicy,
    capacity: Pages,
    units_per_page: u64,
}

impl PageAllocator {
    /// Create a pool of `capacity` free pages
    pub fn new(
        policy: PlacementPolicy,
        capacity: Pages,
        units_per_page: u64,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if units_per_page == 0 {
            return Err(ConfigError::ZeroUnitsPerPage);
        }

        info!(
            policy = %policy,
            capacity_pages = capacity,
            units_per_page,
            "Page allocator initialized"
        );
        Ok(Self {
            blocks: BlockList::new(Block::free(capacity)),
            policy,
            capacity,
            units_per_page,
        })
    }

    /// Create a pool from validated configuration
    pub fn from_config(config: &PoolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config.policy, config.capacity_pages, config.units_per_page)
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Pool size in pages
    pub fn capacity(&self) -> Pages {
        self.capacity
    }

    pub fn units_per_page(&self) -> u64 {
        self.units_per_page
    }

    /// Number of blocks, free and occupied
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Locate the occupied block holding `name`
    fn find_by_name(&self, name: &str) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|(_, block)| block.state.program().is_some_and(|p| p == name))
            .map(|(id, _)| id)
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.check_invariants().is_ok(),
            "pool invariant broken: {:?}",
            self.check_invariants()
        );
    }
}

impl Default for PageAllocator {
    fn default() -> Self {
        let config = PoolConfig::default();
        Self {
            blocks: BlockList::new(Block::free(config.capacity_pages)),
            policy: config.policy,
            capacity: config.capacity_pages,
            units_per_page: config.units_per_page,
        }
    }
}

// Implement trait interfaces
impl Allocator for PageAllocator {
    fn allocate(&mut self, requested: Units, name: &str) -> AllocResult<Pages> {
        PageAllocator::allocate(self, requested, name)
    }

    fn free(&mut self, name: &str) -> FreeResult<Pages> {
        PageAllocator::free(self, name)
    }
}

impl MemoryInfo for PageAllocator {
    fn fragment_count(&self) -> usize {
        PageAllocator::fragment_count(self)
    }

    fn render_map(&self) -> Vec<&str> {
        PageAllocator::render_map(self)
    }

    fn stats(&self) -> PoolStats {
        PageAllocator::stats(self)
    }

    fn find_program(&self, name: &str) -> Option<BlockInfo> {
        PageAllocator::find_program(self, name)
    }
}
