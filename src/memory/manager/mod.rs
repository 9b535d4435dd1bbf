/*!
 * Memory Management
 *
 * Allocation engine simulating two classical disciplines over one finite,
 * unit-addressed memory.
 *
 * ## Modes
 *
 * - **Paging**: fixed-size frames handed out first-fit in ascending frame order.
 *   The unused tail of a process's last page is internal fragmentation.
 * - **Segmentation**: variable-size contiguous segments placed best-fit into the
 *   free runs of the memory map. Free space that is not part of the largest run
 *   is external fragmentation; compaction slides every segment down to remove it.
 *
 * Switching mode discards all processes and statistics.
 *
 * ## Ownership
 *
 * The memory map, frame table, segment list and process registry are all owned
 * here. Pages and segments refer to memory by frame index or offset, never by
 * reference, so compaction is a local move within one buffer.
 *
 * Every operation is synchronous and all-or-nothing; failures are reported as
 * `MemoryError` plus an error-severity log event, and leave state untouched.
 */

mod allocator;
mod compaction;
mod free_list;
mod layout;
mod mode;
mod paging;
mod segmentation;
mod tracking;

use super::config::EngineConfig;
use super::traits::{Allocator, MemoryInfo};
use super::types::{
    Cell, MemoryResult, MemoryStats, Mode, ProcessRecord, Segment, SegmentKind,
};
use crate::core::limits::FIRST_PID;
use crate::core::types::{Pid, SegmentId, Size};
use crate::monitoring::{Collector, Event, Severity, StreamStats, Subscriber};
use ahash::RandomState;
use log::{error, info, warn};
use std::collections::HashMap;
use tracking::Counters;

/// Allocation engine
#[derive(Debug)]
pub struct MemoryManager {
    pub(super) total_memory: Size,
    pub(super) page_size: Size,
    /// Fixed at construction: floor(total_memory / page_size)
    pub(super) total_pages: usize,
    pub(super) mode: Mode,
    /// Authoritative per-unit occupancy
    pub(super) memory: Vec<Cell>,
    /// Frame index -> owner (paging only; all empty in segmentation mode)
    pub(super) frame_table: Vec<Option<Pid>>,
    /// Segment list (segmentation only); unordered until compaction sorts it
    pub(super) segments: Vec<Segment>,
    pub(super) processes: HashMap<Pid, ProcessRecord, RandomState>,
    pub(super) next_pid: Pid,
    pub(super) next_segment_id: SegmentId,
    pub(super) counters: Counters,
    collector: Collector,
}

impl MemoryManager {
    /// Engine with the default 64-unit memory and 4-unit pages
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create engine with custom sizes (useful for testing)
    pub fn with_capacity(total: Size, page_size: Size) -> MemoryResult<Self> {
        Self::with_config(EngineConfig::new(total, page_size))
    }

    pub fn with_config(config: EngineConfig) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let total_pages = config.total_pages();
        info!(
            "Memory manager initialized with {} units, {} units per page ({} frames), {} mode",
            config.total_memory, config.page_size, total_pages, config.initial_mode
        );
        Self {
            total_memory: config.total_memory,
            page_size: config.page_size,
            total_pages,
            mode: config.initial_mode,
            memory: vec![Cell::Free; config.total_memory],
            frame_table: vec![None; total_pages],
            segments: Vec::new(),
            processes: HashMap::with_hasher(RandomState::new()),
            next_pid: FIRST_PID,
            next_segment_id: 0,
            counters: Counters::default(),
            collector: Collector::new(),
        }
    }

    /// Register a driver for notifications emitted from now on
    pub fn subscribe(&mut self) -> Subscriber {
        self.collector.subscribe()
    }

    pub fn stream_stats(&self) -> StreamStats {
        self.collector.stream_stats()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn total_memory(&self) -> Size {
        self.total_memory
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn used_memory(&self) -> Size {
        self.counters.used
    }

    pub fn free_memory(&self) -> Size {
        self.total_memory - self.counters.used
    }

    /// Per-unit occupancy
    pub fn memory_map(&self) -> &[Cell] {
        &self.memory
    }

    /// Frame index -> owning process
    pub fn frame_table(&self) -> &[Option<Pid>] {
        &self.frame_table
    }

    /// Live segments; unordered, but sorted by start after `compact`
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments owned by one process
    pub fn process_segments(&self, pid: Pid) -> Vec<&Segment> {
        self.segments.iter().filter(|s| s.pid == pid).collect()
    }

    /// Live processes sorted by PID
    pub fn processes(&self) -> Vec<&ProcessRecord> {
        let mut records: Vec<_> = self.processes.values().collect();
        records.sort_by_key(|r| r.pid);
        records
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.get(&pid)
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// PID the next successful allocation will receive
    pub fn next_pid(&self) -> Pid {
        self.next_pid
    }

    /// Aggregate statistics; `fragmentation` is internal or external depending on mode
    pub fn stats(&self) -> MemoryStats {
        let used = self.counters.used;
        let fragmentation = match self.mode {
            Mode::Paging => self.counters.internal_fragmentation,
            Mode::Segmentation => self.counters.external_fragmentation,
        };
        MemoryStats {
            mode: self.mode,
            total_memory: self.total_memory,
            used_memory: used,
            free_memory: self.total_memory - used,
            fragmentation,
            internal_fragmentation: self.counters.internal_fragmentation,
            external_fragmentation: self.counters.external_fragmentation,
            page_faults: self.counters.page_faults,
            segment_violations: self.counters.segment_violations,
            process_count: self.processes.len(),
            usage_percentage: (used as f64 / self.total_memory as f64) * 100.0,
        }
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        (self.total_memory, self.counters.used, self.free_memory())
    }

    pub fn process_memory(&self, pid: Pid) -> Size {
        self.processes.get(&pid).map_or(0, |r| r.size)
    }

    /// Log through the `log` facade and forward to subscribers
    pub(super) fn notify(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Info => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
        self.collector.log(severity, message);
    }

    pub(super) fn emit(&mut self, event: Event) {
        self.collector.emit(event);
    }

    pub(super) fn memory_changed(&mut self) {
        self.collector.memory_changed();
    }
}

// Implement trait interfaces
impl Allocator for MemoryManager {
    fn allocate(&mut self, name: &str, size: Size, kind: Option<SegmentKind>) -> MemoryResult<Pid> {
        MemoryManager::allocate(self, name, size, kind)
    }

    fn deallocate(&mut self, pid: Pid) -> MemoryResult<ProcessRecord> {
        MemoryManager::deallocate(self, pid)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }

    fn process_memory(&self, pid: Pid) -> Size {
        MemoryManager::process_memory(self, pid)
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
