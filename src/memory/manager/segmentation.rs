/*!
 * Segmentation
 * Best-fit placement of variable-size contiguous segments
 */

use super::super::types::{
    Cell, MemoryError, MemoryResult, ProcessLayout, ProcessRecord, Segment, SegmentCell, SegmentKind,
};
use super::MemoryManager;
use crate::core::types::{Address, Pid, SegmentId, Size};
use crate::monitoring::Severity;
use log::error;
use std::sync::Arc;

impl MemoryManager {
    pub(super) fn allocate_segmented(
        &mut self,
        pid: Pid,
        name: &str,
        size: Size,
        kind: SegmentKind,
    ) -> MemoryResult<()> {
        let Some(block) = self.find_best_fit(size) else {
            return Err(MemoryError::NoSuitableBlock {
                requested: size,
                largest: self.largest_free_block(),
            });
        };

        let placed = self.place_segment(pid, name, block.start, size, kind);
        debug_assert!(placed.is_some(), "fresh PID {} already has a record", pid);
        self.refresh_external_fragmentation();

        self.notify(
            Severity::Info,
            format!(
                "Allocated {} units {} segment to process {} (PID: {})",
                size, kind, name, pid
            ),
        );
        let external = self.counters.external_fragmentation;
        if external > 0 {
            self.notify(
                Severity::Info,
                format!("External fragmentation: {} units", external),
            );
        }
        Ok(())
    }

    /// Claim `[start, start + size)` for `pid`, creating its record on first use
    ///
    /// A process may accumulate several segments under one PID; the public
    /// allocation path always mints a new PID, so it only ever places one.
    /// Returns `None` and changes nothing if `pid` holds pages.
    pub(super) fn place_segment(
        &mut self,
        pid: Pid,
        name: &str,
        start: Address,
        size: Size,
        kind: SegmentKind,
    ) -> Option<SegmentId> {
        if let Some(ProcessLayout::Paged { .. }) = self.processes.get(&pid).map(|r| &r.layout) {
            error!("PID {} holds pages while segmentation is active", pid);
            return None;
        }

        let id = self.next_segment_id;
        self.next_segment_id += 1;

        self.memory[start..start + size].fill(Cell::Segment(SegmentCell { pid, segment: id }));
        self.segments.push(Segment {
            id,
            pid,
            name: Arc::from(name),
            start,
            size,
            kind,
        });

        let record = self
            .processes
            .entry(pid)
            .or_insert_with(|| ProcessRecord::segmented(pid, name));
        if let ProcessLayout::Segmented { segments } = &mut record.layout {
            segments.push(id);
        }
        record.size += size;
        self.counters.add_allocation(size, 0);

        Some(id)
    }

    /// Clear and drop every segment owned by `pid`, returning how many were removed
    pub(super) fn release_segments(&mut self, pid: Pid) -> usize {
        let before = self.segments.len();
        for segment in self.segments.iter().filter(|s| s.pid == pid) {
            self.memory[segment.start..segment.end()].fill(Cell::Free);
        }
        self.segments.retain(|s| s.pid != pid);
        before - self.segments.len()
    }
}
