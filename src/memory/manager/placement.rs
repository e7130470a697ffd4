/*!
 * Placement Search
 * Best-fit and worst-fit selection over the free blocks
 */

use super::super::types::{BlockInfo, PlacementPolicy};
use super::block_list::BlockId;
use super::PageAllocator;
use crate::core::types::{PageIndex, Pages};

impl PageAllocator {
    /// Find the free block the placement policy would use for `pages`
    ///
    /// Linear scan in address order. Best-fit takes the smallest adequate
    /// block, worst-fit the largest; ties go to the lowest address.
    pub fn find_space(&self, pages: Pages) -> Option<BlockInfo> {
        let (id, base) = self.find_space_with_base(pages)?;
        let block = self.blocks.get(id)?;
        Some(BlockInfo {
            base,
            size: block.size,
            state: block.state.clone(),
        })
    }

    pub(super) fn find_space_id(&self, pages: Pages) -> Option<BlockId> {
        self.find_space_with_base(pages).map(|(id, _)| id)
    }

    fn find_space_with_base(&self, pages: Pages) -> Option<(BlockId, PageIndex)> {
        let mut fit: Option<(BlockId, PageIndex, Pages)> = None;
        let mut base = 0;

        for (id, block) in self.blocks.iter() {
            if block.is_free() && block.size >= pages {
                let better = match fit {
                    None => true,
                    Some((_, _, fit_size)) => match self.policy {
                        PlacementPolicy::BestFit => block.size < fit_size,
                        PlacementPolicy::WorstFit => block.size > fit_size,
                    },
                };
                if better {
                    fit = Some((id, base, block.size));
                }
            }
            base += block.size;
        }

        fit.map(|(id, base, _)| (id, base))
    }
}
