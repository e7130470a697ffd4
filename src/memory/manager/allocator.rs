/*!
 * Allocation
 * Page rounding, placement and block splitting
 */

use super::super::types::{AllocError, AllocResult, Block, BlockState, MemoryPressure};
use super::PageAllocator;
use crate::core::types::{Pages, Units};
use crate::core::ProgramName;
use tracing::{debug, info, warn};

impl PageAllocator {
    /// Convert a request in capacity units to whole pages, rounding up
    ///
    /// Zero and negative requests are `InvalidSize`. A page count too large
    /// for the page counter can never be satisfied and is `OutOfMemory`.
    pub fn pages_for(&self, requested: Units) -> AllocResult<Pages> {
        if requested <= 0 {
            return Err(AllocError::InvalidSize(requested));
        }
        let pages = (requested as u64).div_ceil(self.units_per_page);
        Pages::try_from(pages).map_err(|_| AllocError::OutOfMemory {
            requested: Pages::MAX,
            largest_free: self.largest_free_block(),
        })
    }

    /// Place a program of `requested` capacity units, returning pages used
    ///
    /// Checks run in order: name validity, duplicate name, size, placement.
    /// Nothing is mutated until all checks pass.
    pub fn allocate(&mut self, requested: Units, name: &str) -> AllocResult<Pages> {
        let program = ProgramName::parse(name).ok_or_else(|| {
            warn!(program = name, "Rejected allocation with invalid program name");
            AllocError::InvalidName(name.to_string())
        })?;

        if self.find_by_name(name).is_some() {
            warn!(program = name, "Program is already running");
            return Err(AllocError::AlreadyRunning(name.to_string()));
        }

        let pages = self.pages_for(requested).map_err(|e| {
            warn!(program = name, requested, error = %e, "Rejected allocation size");
            e
        })?;

        let Some(id) = self.find_space_id(pages) else {
            let largest_free = self.largest_free_block();
            warn!(
                program = name,
                pages,
                largest_free,
                policy = %self.policy,
                "OOM: no free block large enough"
            );
            return Err(AllocError::OutOfMemory {
                requested: pages,
                largest_free,
            });
        };

        let block_size = self.blocks.get(id).map_or(0, |b| b.size);
        if block_size > pages {
            let remainder = block_size - pages;
            self.blocks.insert_after(id, Block::free(remainder));
            debug!(
                program = name,
                kept = pages,
                remainder,
                "Split free block"
            );
        }
        if let Some(block) = self.blocks.get_mut(id) {
            block.size = pages;
            block.state = BlockState::Occupied(program);
        }

        self.debug_check();

        let used = self.used_pages();
        let pressure = MemoryPressure::from_usage(used, self.capacity);
        if pressure >= MemoryPressure::High {
            warn!(
                program = name,
                pages,
                used,
                capacity = self.capacity,
                pressure = %pressure,
                "Memory pressure after allocation"
            );
        } else {
            info!(program = name, pages, used, "Allocated pages");
        }

        Ok(pages)
    }
}
