/*!
 * Memory Traits
 * Allocator abstractions used by front ends
 */

use super::types::*;
use crate::core::types::{Pages, Units};

/// Page allocator interface
pub trait Allocator {
    /// Place a program of `requested` capacity units, returning pages used
    fn allocate(&mut self, requested: Units, name: &str) -> AllocResult<Pages>;

    /// Release a program's block, returning pages reclaimed
    fn free(&mut self, name: &str) -> FreeResult<Pages>;
}

/// Read-only pool queries
pub trait MemoryInfo {
    /// Number of disjoint free blocks
    fn fragment_count(&self) -> usize;

    /// One label per page in address order
    fn render_map(&self) -> Vec<&str>;

    /// Overall pool statistics
    fn stats(&self) -> PoolStats;

    /// Snapshot of the block holding a program
    fn find_program(&self, name: &str) -> Option<BlockInfo>;

    /// Current memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().pressure
    }
}
