/*!
 * Memory Allocator Implementation
 * Mode-dispatching allocation and deallocation entry points
 */

use super::super::types::{MemoryError, MemoryResult, Mode, ProcessLayout, ProcessRecord, SegmentKind};
use super::MemoryManager;
use crate::core::types::{Pid, Size};
use crate::monitoring::Severity;
use log::debug;

impl MemoryManager {
    /// Allocate `size` units for a new process named `name`
    ///
    /// `kind` only matters in segmentation mode and defaults to code. On success the
    /// freshly minted PID is returned; a failed request consumes no PID.
    pub fn allocate(&mut self, name: &str, size: Size, kind: Option<SegmentKind>) -> MemoryResult<Pid> {
        if size == 0 {
            return Err(self.reject(MemoryError::InvalidSize { size }));
        }

        let available = self.free_memory();
        if size > available {
            return Err(self.reject(MemoryError::InsufficientMemory {
                requested: size,
                available,
            }));
        }

        let pid = self.next_pid;
        let placed = match self.mode {
            Mode::Paging => self.allocate_paged(pid, name, size),
            Mode::Segmentation => {
                self.allocate_segmented(pid, name, size, kind.unwrap_or_default())
            }
        };

        match placed {
            Ok(()) => {
                self.next_pid += 1;
                self.memory_changed();
                Ok(pid)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Release every page or segment owned by `pid`
    pub fn deallocate(&mut self, pid: Pid) -> MemoryResult<ProcessRecord> {
        let Some(record) = self.processes.remove(&pid) else {
            return Err(self.reject(MemoryError::UnknownProcess(pid)));
        };

        let message = match &record.layout {
            ProcessLayout::Paged {
                pages,
                internal_fragmentation,
            } => {
                self.release_pages(pages);
                self.counters
                    .remove_allocation(record.size, *internal_fragmentation);
                format!(
                    "Deallocated {} units ({} pages) from process {} (PID: {})",
                    record.size,
                    pages.len(),
                    record.name,
                    pid
                )
            }
            ProcessLayout::Segmented { segments } => {
                let released = self.release_segments(pid);
                debug_assert_eq!(released, segments.len());
                self.counters.remove_allocation(record.size, 0);
                self.refresh_external_fragmentation();
                format!(
                    "Deallocated {} units ({} segments) from process {} (PID: {})",
                    record.size,
                    segments.len(),
                    record.name,
                    pid
                )
            }
        };

        self.notify(Severity::Info, message);
        self.memory_changed();
        Ok(record)
    }

    /// Report a failed request and hand the error back to the caller
    pub(super) fn reject(&mut self, err: MemoryError) -> MemoryError {
        debug!("Rejected request in {} mode: {:?}", self.mode, err);
        self.notify(Severity::Error, err.to_string());
        err
    }
}
