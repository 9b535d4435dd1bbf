/*!
 * Memory Simulator Library
 * Paging and segmentation allocation engine exposed as a library
 */

pub mod core;
pub mod driver;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use memory::{
    Allocator, Cell, CellInfo, EngineConfig, FreeBlock, MemoryError, MemoryInfo, MemoryManager,
    MemoryPressure, MemoryResult, MemoryStats, Mode, Page, ProcessLayout, ProcessRecord, Region,
    Segment, SegmentKind,
};
pub use monitoring::{init_tracing, Collector, Event, Severity, Subscriber};
