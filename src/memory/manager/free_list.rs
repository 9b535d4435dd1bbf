/*!
 * Free Block Discovery
 * Left-to-right scan of the memory map for maximal empty runs
 *
 * Blocks are recomputed on every call rather than cached, so they can never
 * drift from the memory map.
 */

use super::super::types::{FreeBlock, Mode};
use super::MemoryManager;
use crate::core::types::Size;

impl MemoryManager {
    /// Maximal runs of empty units in ascending start order
    pub fn free_blocks(&self) -> Vec<FreeBlock> {
        let mut blocks = Vec::new();
        let mut current: Option<FreeBlock> = None;

        for (offset, cell) in self.memory.iter().enumerate() {
            if cell.is_free() {
                current
                    .get_or_insert(FreeBlock {
                        start: offset,
                        size: 0,
                    })
                    .size += 1;
            } else if let Some(block) = current.take() {
                blocks.push(block);
            }
        }

        blocks.extend(current);
        blocks
    }

    /// Smallest free block that can hold `size`; the leftmost wins a tie
    pub(super) fn find_best_fit(&self, size: Size) -> Option<FreeBlock> {
        self.free_blocks()
            .into_iter()
            .filter(|block| block.size >= size)
            .min_by_key(|block| block.size)
    }

    pub(super) fn largest_free_block(&self) -> Size {
        self.free_blocks()
            .iter()
            .map(|block| block.size)
            .max()
            .unwrap_or(0)
    }

    /// Free units that are not part of the largest free run
    ///
    /// Zero when free space is one run or there is none.
    pub fn external_fragmentation(&self) -> Size {
        let blocks = self.free_blocks();
        let total: Size = blocks.iter().map(|b| b.size).sum();
        let largest = blocks.iter().map(|b| b.size).max().unwrap_or(0);
        total - largest
    }

    /// Recompute the stored metric; only maintained in segmentation mode
    pub(super) fn refresh_external_fragmentation(&mut self) {
        if self.mode == Mode::Segmentation {
            self.counters.external_fragmentation = self.external_fragmentation();
        }
    }
}
