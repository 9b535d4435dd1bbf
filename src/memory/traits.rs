/*!
 * Memory Traits
 * Allocation engine abstractions for drivers
 */

use super::types::*;
use crate::core::types::{Pid, Size};

/// Allocation interface
pub trait Allocator {
    /// Allocate `size` units for a new process, returning its PID
    fn allocate(&mut self, name: &str, size: Size, kind: Option<SegmentKind>) -> MemoryResult<Pid>;

    /// Release everything a process owns, returning its record
    fn deallocate(&mut self, pid: Pid) -> MemoryResult<ProcessRecord>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get units held by a specific process (0 if unknown)
    fn process_memory(&self, pid: Pid) -> Size;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
