/*!
 * Paging
 * First-fit frame allocation with internal fragmentation tracking
 */

use super::super::types::{Cell, MemoryError, MemoryResult, Page, PageCell, ProcessRecord};
use super::MemoryManager;
use crate::core::types::{Address, FrameIndex, Pid, Size};
use crate::monitoring::Severity;
use std::ops::Range;
use std::sync::Arc;

impl MemoryManager {
    /// Unit range backing a frame
    #[inline]
    pub(super) fn frame_range(&self, frame: FrameIndex) -> Range<Address> {
        let base = frame * self.page_size;
        base..base + self.page_size
    }

    /// Lowest-indexed empty frames, at most `limit` of them
    fn first_free_frames(&self, limit: usize) -> Vec<FrameIndex> {
        self.frame_table
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(frame, _)| frame)
            .take(limit)
            .collect()
    }

    pub(super) fn allocate_paged(&mut self, pid: Pid, name: &str, size: Size) -> MemoryResult<()> {
        let required = size.div_ceil(self.page_size);
        let frames = self.first_free_frames(required);
        if frames.len() < required {
            return Err(MemoryError::InsufficientContiguousPages {
                required,
                available: frames.len(),
            });
        }

        // Waste lives entirely in the last page, in allocation order
        let remainder = size % self.page_size;
        let internal_fragmentation = if remainder > 0 {
            self.page_size - remainder
        } else {
            0
        };

        let shared_name: Arc<str> = Arc::from(name);
        let last = frames.len() - 1;
        let mut pages = Vec::with_capacity(frames.len());
        for (number, &frame) in frames.iter().enumerate() {
            self.frame_table[frame] = Some(pid);
            let range = self.frame_range(frame);
            for cell in &mut self.memory[range] {
                *cell = Cell::Page(PageCell {
                    pid,
                    name: Arc::clone(&shared_name),
                    page_number: number,
                    frame,
                });
            }
            let used = if number == last && remainder > 0 {
                remainder
            } else {
                self.page_size
            };
            pages.push(Page { number, frame, used });
        }

        let page_count = pages.len();
        self.processes.insert(
            pid,
            ProcessRecord::paged(pid, name, size, pages, internal_fragmentation),
        );
        self.counters.add_allocation(size, internal_fragmentation);

        self.notify(
            Severity::Info,
            format!(
                "Allocated {} units ({} pages) to process {} (PID: {})",
                size, page_count, name, pid
            ),
        );
        if internal_fragmentation > 0 {
            self.notify(
                Severity::Info,
                format!("Internal fragmentation: {} units", internal_fragmentation),
            );
        }
        Ok(())
    }

    /// Clear frame-table entries and every unit of the given pages
    pub(super) fn release_pages(&mut self, pages: &[Page]) {
        for page in pages {
            self.frame_table[page.frame] = None;
            let range = self.frame_range(page.frame);
            self.memory[range].fill(Cell::Free);
        }
    }
}
