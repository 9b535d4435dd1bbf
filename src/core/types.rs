/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Unit offset into the simulated address space
pub type Address = usize;

/// Size type for memory operations (in units)
pub type Size = usize;

/// Index of a physical frame in paging mode
pub type FrameIndex = usize;

/// Stable identifier of a segment; survives compaction
pub type SegmentId = u64;
