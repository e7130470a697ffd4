/*!
 * Deallocation
 * Releasing programs and coalescing free neighbours
 */

use super::super::types::{BlockState, FreeError, FreeResult};
use super::PageAllocator;
use crate::core::types::Pages;
use tracing::{debug, info, warn};

impl PageAllocator {
    /// Release the block held by `name`, returning pages reclaimed
    ///
    /// The freed block merges backward into a free predecessor, then forward
    /// with a free successor, so no two free blocks remain adjacent.
    pub fn free(&mut self, name: &str) -> FreeResult<Pages> {
        let Some(mut current) = self.find_by_name(name) else {
            warn!(program = name, "Attempted to free unknown program");
            return Err(FreeError::NotFound(name.to_string()));
        };

        let freed = match self.blocks.get_mut(current) {
            Some(block) => {
                block.state = BlockState::Free;
                block.size
            }
            None => return Err(FreeError::NotFound(name.to_string())),
        };

        // Backward: the predecessor absorbs the freed block and becomes current
        if let Some(prev) = self.blocks.prev(current) {
            if self.blocks.get(prev).is_some_and(|b| b.is_free()) {
                self.blocks.absorb_next(prev);
                current = prev;
                debug!(program = name, "Coalesced with free predecessor");
            }
        }

        // Forward
        if let Some(next) = self.blocks.next(current) {
            if self.blocks.get(next).is_some_and(|b| b.is_free()) {
                self.blocks.absorb_next(current);
                debug!(program = name, "Coalesced with free successor");
            }
        }

        self.debug_check();

        info!(
            program = name,
            freed,
            available = self.capacity - self.used_pages(),
            fragments = self.fragment_count(),
            "Freed pages"
        );
        Ok(freed)
    }
}
