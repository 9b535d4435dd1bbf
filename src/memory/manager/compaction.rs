/*!
 * Compaction
 * Slide every segment to the low end of memory, merging all free space
 */

use super::super::types::Mode;
use super::MemoryManager;
use crate::monitoring::Severity;
use log::debug;

impl MemoryManager {
    /// Relocate segments so that occupied memory is one run starting at 0
    ///
    /// Sizes, owners and the process registry are untouched; only start offsets
    /// change. Returns how many segments moved. Outside segmentation mode this is
    /// a no-op returning 0.
    pub fn compact(&mut self) -> usize {
        if self.mode != Mode::Segmentation {
            debug!("Compaction ignored in {} mode", self.mode);
            return 0;
        }

        self.segments.sort_by_key(|s| s.start);

        let mut next_free = 0;
        let mut moved = 0;
        for segment in self.segments.iter_mut() {
            if segment.start != next_free {
                // Everything in [next_free, start) is free, so rotating the window
                // moves the segment down and leaves the vacated units empty behind it
                self.memory[next_free..segment.end()].rotate_left(segment.start - next_free);
                segment.start = next_free;
                moved += 1;
            }
            next_free += segment.size;
        }

        self.refresh_external_fragmentation();
        self.notify(
            Severity::Info,
            format!("Memory compacted ({} segments relocated)", moved),
        );
        self.memory_changed();
        moved
    }
}
