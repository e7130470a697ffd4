/*!
 * Block List
 * Index-addressed arena holding the address-ordered block sequence
 */

use super::super::types::{Block, InvariantViolation};
use crate::core::types::Pages;

/// Generation-checked handle to a block in the arena
///
/// A handle is only valid until the block it names is merged away. Slots are
/// recycled, but every removal bumps the slot's generation, so a stale handle
/// resolves to `None` instead of silently naming a different block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct BlockId {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Entry {
    block: Block,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Doubly linked block sequence stored in a vector
///
/// The head never changes: merges always remove the higher-addressed block
/// of a pair, and the head has no lower neighbour.
#[derive(Debug)]
pub(super) struct BlockList {
    slots: Vec<Slot>,
    vacant: Vec<usize>,
    head: usize,
    len: usize,
}

impl BlockList {
    pub fn new(initial: Block) -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                entry: Some(Entry {
                    block: initial,
                    prev: None,
                    next: None,
                }),
            }],
            vacant: Vec::new(),
            head: 0,
            len: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn head(&self) -> BlockId {
        self.id_of(self.head)
    }

    fn id_of(&self, index: usize) -> BlockId {
        BlockId {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn entry(&self, id: BlockId) -> Option<&Entry> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: BlockId) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.entry(id).map(|e| &e.block)
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.entry_mut(id).map(|e| &mut e.block)
    }

    pub fn next(&self, id: BlockId) -> Option<BlockId> {
        let next = self.entry(id)?.next?;
        Some(self.id_of(next))
    }

    pub fn prev(&self, id: BlockId) -> Option<BlockId> {
        let prev = self.entry(id)?.prev?;
        Some(self.id_of(prev))
    }

    /// Link a new block directly after `id`
    pub fn insert_after(&mut self, id: BlockId, block: Block) -> Option<BlockId> {
        let successor = self.entry(id)?.next;
        let entry = Entry {
            block,
            prev: Some(id.index),
            next: successor,
        };

        let index = match self.vacant.pop() {
            Some(index) => {
                self.slots[index].entry = Some(entry);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                self.slots.len() - 1
            }
        };

        if let Some(succ) = successor {
            if let Some(e) = self.slots[succ].entry.as_mut() {
                e.prev = Some(index);
            }
        }
        if let Some(e) = self.slots[id.index].entry.as_mut() {
            e.next = Some(index);
        }
        self.len += 1;
        Some(self.id_of(index))
    }

    /// Merge the successor of `id` into `id`, returning the absorbed size
    ///
    /// The successor's handle is invalidated.
    pub fn absorb_next(&mut self, id: BlockId) -> Option<Pages> {
        let victim = self.entry(id)?.next?;
        let removed = self.slots[victim].entry.take()?;
        self.slots[victim].generation = self.slots[victim].generation.wrapping_add(1);
        self.vacant.push(victim);

        if let Some(after) = removed.next {
            if let Some(e) = self.slots[after].entry.as_mut() {
                e.prev = Some(id.index);
            }
        }
        let survivor = self.entry_mut(id)?;
        survivor.next = removed.next;
        survivor.block.size += removed.block.size;
        self.len -= 1;
        Some(removed.block.size)
    }

    /// Walk blocks in address order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: Some(self.head),
        }
    }

    /// Verify that forward and backward links agree and cover every live slot
    pub fn check_links(&self) -> Result<(), InvariantViolation> {
        let mut visited = 0;
        let mut prev: Option<usize> = None;
        let mut cursor = Some(self.head);

        while let Some(index) = cursor {
            let entry = self.slots[index]
                .entry
                .as_ref()
                .ok_or(InvariantViolation::BrokenLink(index))?;
            if entry.prev != prev {
                return Err(InvariantViolation::BrokenLink(index));
            }
            visited += 1;
            if visited > self.slots.len() {
                // cycle
                return Err(InvariantViolation::BrokenLink(index));
            }
            prev = Some(index);
            cursor = entry.next;
        }

        let live = self.slots.iter().filter(|s| s.entry.is_some()).count();
        if visited != self.len || live != self.len {
            return Err(InvariantViolation::BrokenLink(self.head));
        }
        Ok(())
    }
}

/// Address-ordered iterator over `(BlockId, &Block)`
pub(super) struct Iter<'a> {
    list: &'a BlockList,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let entry = self.list.slots[index].entry.as_ref()?;
        self.cursor = entry.next;
        Some((self.list.id_of(index), &entry.block))
    }
}
