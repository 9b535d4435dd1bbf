/*!
 * Mode Control and Simulated Faults
 * Destructive mode switches and the two pedagogical fault counters
 */

use super::super::types::{Cell, MemoryResult, Mode};
use super::tracking::Counters;
use super::MemoryManager;
use crate::core::limits::FIRST_PID;
use crate::monitoring::{Event, Severity};

impl MemoryManager {
    /// Enter `mode`, discarding every process, the layout and all statistics
    ///
    /// Re-entering the active mode performs the same full reset.
    pub fn set_mode(&mut self, mode: Mode) {
        self.memory.fill(Cell::Free);
        self.frame_table.fill(None);
        self.segments.clear();
        self.processes.clear();
        self.next_pid = FIRST_PID;
        self.next_segment_id = 0;
        self.counters = Counters::default();
        self.mode = mode;

        self.notify(Severity::Info, format!("Switched to {} mode", mode));
        self.memory_changed();
    }

    /// Parse and enter a mode; an unrecognized name changes nothing
    pub fn set_mode_str(&mut self, mode: &str) -> MemoryResult<()> {
        let mode = mode.parse::<Mode>().map_err(|e| self.reject(e))?;
        self.set_mode(mode);
        Ok(())
    }

    /// Count a simulated page fault; ignored unless paging is active
    pub fn simulate_page_fault(&mut self) -> bool {
        if self.mode != Mode::Paging {
            return false;
        }
        self.counters.page_faults += 1;
        self.emit(Event::PageFault);
        self.notify(Severity::Warning, "Page fault simulated".to_string());
        true
    }

    /// Count a simulated segment violation; ignored unless segmentation is active
    pub fn simulate_segment_violation(&mut self) -> bool {
        if self.mode != Mode::Segmentation {
            return false;
        }
        self.counters.segment_violations += 1;
        self.emit(Event::SegmentViolation);
        self.notify(Severity::Error, "Segment violation simulated".to_string());
        true
    }
}
