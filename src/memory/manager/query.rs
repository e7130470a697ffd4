/*!
 * Pool Queries
 * Fragmentation, memory map, statistics and consistency checks
 */

use super::super::types::{BlockInfo, InvariantViolation, MemoryPressure, PoolStats};
use super::PageAllocator;
use crate::core::types::Pages;
use std::collections::HashSet;

impl PageAllocator {
    /// Number of disjoint free blocks
    pub fn fragment_count(&self) -> usize {
        self.blocks.iter().filter(|(_, b)| b.is_free()).count()
    }

    /// One label per page in address order: `"Free"` or the program name
    pub fn render_map(&self) -> Vec<&str> {
        let mut map = Vec::with_capacity(self.capacity);
        for (_, block) in self.blocks.iter() {
            let label = block.state.label();
            map.extend(std::iter::repeat(label).take(block.size));
        }
        map
    }

    /// Address-ordered snapshot of every block
    pub fn blocks(&self) -> Vec<BlockInfo> {
        let mut base = 0;
        self.blocks
            .iter()
            .map(|(_, block)| {
                let info = BlockInfo {
                    base,
                    size: block.size,
                    state: block.state.clone(),
                };
                base += block.size;
                info
            })
            .collect()
    }

    /// Snapshot of the block holding `name`
    pub fn find_program(&self, name: &str) -> Option<BlockInfo> {
        self.blocks()
            .into_iter()
            .find(|info| info.state.program().is_some_and(|p| p == name))
    }

    pub fn used_pages(&self) -> Pages {
        self.blocks
            .iter()
            .filter(|(_, b)| !b.is_free())
            .map(|(_, b)| b.size)
            .sum()
    }

    pub fn largest_free_block(&self) -> Pages {
        self.blocks
            .iter()
            .filter(|(_, b)| b.is_free())
            .map(|(_, b)| b.size)
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> PoolStats {
        let used = self.used_pages();
        let occupied = self.blocks.iter().filter(|(_, b)| !b.is_free()).count();
        PoolStats {
            policy: self.policy,
            capacity_pages: self.capacity,
            used_pages: used,
            free_pages: self.capacity - used,
            largest_free_block: self.largest_free_block(),
            fragments: self.fragment_count(),
            occupied_blocks: occupied,
            usage_percentage: (used as f64 / self.capacity as f64) * 100.0,
            pressure: MemoryPressure::from_usage(used, self.capacity),
        }
    }

    /// Verify the pool invariants and arena link consistency
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.blocks.check_links()?;
        if self.blocks.len() == 0 {
            return Err(InvariantViolation::EmptySequence);
        }

        let mut names = HashSet::new();
        let mut total = 0;
        let mut prev_free: Option<Pages> = None;

        for (_, block) in self.blocks.iter() {
            if block.size == 0 {
                return Err(InvariantViolation::EmptyBlock(total));
            }
            match block.state.program() {
                Some(name) => {
                    if !names.insert(name.as_str()) {
                        return Err(InvariantViolation::DuplicateName(name.to_string()));
                    }
                    prev_free = None;
                }
                None => {
                    if let Some(first) = prev_free {
                        return Err(InvariantViolation::UncoalescedFree {
                            first,
                            second: total,
                        });
                    }
                    prev_free = Some(total);
                }
            }
            total += block.size;
        }

        if total != self.capacity {
            return Err(InvariantViolation::CapacityMismatch {
                expected: self.capacity,
                actual: total,
            });
        }
        Ok(())
    }
}
