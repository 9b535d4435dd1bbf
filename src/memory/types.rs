/*!
 * Memory Types
 * Common types for the allocation engine
 */

use crate::core::limits::{PRESSURE_CRITICAL_PCT, PRESSURE_HIGH_PCT, PRESSURE_MEDIUM_PCT};
use crate::core::types::{Address, FrameIndex, Pid, SegmentId, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is recoverable: the engine reports it and leaves its state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Invalid size: {size} units")]
    #[diagnostic(code(memory::invalid_size), help("Requested size must be a positive number of units."))]
    InvalidSize { size: Size },

    #[error("Not enough memory: requested {requested} units, available {available} units")]
    #[diagnostic(
        code(memory::insufficient_memory),
        help("Deallocate a process or request less memory.")
    )]
    InsufficientMemory { requested: Size, available: Size },

    #[error("Not enough free pages: needed {required}, found {available}")]
    #[diagnostic(
        code(memory::insufficient_pages),
        help("Free frames are exhausted even though unaddressable units may remain.")
    )]
    InsufficientContiguousPages { required: usize, available: usize },

    #[error("Could not find suitable memory block of size {requested} units (largest free block: {largest})")]
    #[diagnostic(
        code(memory::no_suitable_block),
        help("Free memory is fragmented. Try compacting memory.")
    )]
    NoSuitableBlock { requested: Size, largest: Size },

    #[error("Process with PID {0} not found")]
    #[diagnostic(code(memory::unknown_process), help("The process may already have been deallocated."))]
    UnknownProcess(Pid),

    #[error("Mode must be either 'paging' or 'segmentation', got '{0}'")]
    #[diagnostic(code(memory::invalid_mode))]
    InvalidMode(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(memory::invalid_config))]
    InvalidConfig(String),
}

/// Allocation discipline; exactly one is active at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Paging,
    Segmentation,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Paging => write!(f, "paging"),
            Mode::Segmentation => write!(f, "segmentation"),
        }
    }
}

impl FromStr for Mode {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paging" => Ok(Mode::Paging),
            "segmentation" => Ok(Mode::Segmentation),
            _ => Err(MemoryError::InvalidMode(s.to_string())),
        }
    }
}

/// Descriptive segment tag; has no effect on placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    #[default]
    Code,
    Data,
    Stack,
    Heap,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SegmentKind::Code => write!(f, "code"),
            SegmentKind::Data => write!(f, "data"),
            SegmentKind::Stack => write!(f, "stack"),
            SegmentKind::Heap => write!(f, "heap"),
        }
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "code" => Ok(SegmentKind::Code),
            "data" => Ok(SegmentKind::Data),
            "stack" => Ok(SegmentKind::Stack),
            "heap" => Ok(SegmentKind::Heap),
            other => Err(format!("unknown segment kind '{}'", other)),
        }
    }
}

/// Occupant of a unit claimed through paging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCell {
    pub pid: Pid,
    pub name: Arc<str>,
    /// Logical page number within the owning process (allocation order)
    pub page_number: usize,
    pub frame: FrameIndex,
}

/// Occupant of a unit claimed through segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCell {
    pub pid: Pid,
    pub segment: SegmentId,
}

/// One unit of the simulated address space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Free,
    Page(PageCell),
    Segment(SegmentCell),
}

impl Cell {
    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }

    /// Owning process, if the unit is claimed
    #[inline]
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Cell::Free => None,
            Cell::Page(page) => Some(page.pid),
            Cell::Segment(segment) => Some(segment.pid),
        }
    }
}

/// A process's claim on one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Logical page number (0-based, allocation order)
    pub number: usize,
    pub frame: FrameIndex,
    /// Units actually used; below the page size only for a trailing partial page
    pub used: Size,
}

/// Contiguous run of units owned by one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub pid: Pid,
    pub name: Arc<str>,
    pub start: Address,
    pub size: Size,
    pub kind: SegmentKind,
}

impl Segment {
    /// One past the last unit
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    #[inline]
    pub fn contains(&self, offset: Address) -> bool {
        offset >= self.start && offset < self.end()
    }

    #[inline]
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Maximal run of empty units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeBlock {
    pub start: Address,
    pub size: Size,
}

impl FreeBlock {
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    #[inline]
    pub fn contains(&self, offset: Address) -> bool {
        offset >= self.start && offset < self.end()
    }
}

/// Mode-specific part of a process record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ProcessLayout {
    Paged {
        pages: Vec<Page>,
        internal_fragmentation: Size,
    },
    /// Segments live in the engine's segment list; the record keeps their ids
    Segmented { segments: Vec<SegmentId> },
}

/// A live process and what it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub name: String,
    /// Total requested units
    pub size: Size,
    pub layout: ProcessLayout,
}

impl ProcessRecord {
    pub fn paged(pid: Pid, name: &str, size: Size, pages: Vec<Page>, internal_fragmentation: Size) -> Self {
        Self {
            pid,
            name: name.to_string(),
            size,
            layout: ProcessLayout::Paged {
                pages,
                internal_fragmentation,
            },
        }
    }

    /// Empty segmented record; segments are appended as they are placed
    pub fn segmented(pid: Pid, name: &str) -> Self {
        Self {
            pid,
            name: name.to_string(),
            size: 0,
            layout: ProcessLayout::Segmented { segments: Vec::new() },
        }
    }

    pub fn mode(&self) -> Mode {
        match self.layout {
            ProcessLayout::Paged { .. } => Mode::Paging,
            ProcessLayout::Segmented { .. } => Mode::Segmentation,
        }
    }

    pub fn pages(&self) -> &[Page] {
        match &self.layout {
            ProcessLayout::Paged { pages, .. } => pages,
            ProcessLayout::Segmented { .. } => &[],
        }
    }

    /// Frames claimed, in allocation order
    pub fn frames(&self) -> Vec<FrameIndex> {
        self.pages().iter().map(|p| p.frame).collect()
    }

    pub fn segment_ids(&self) -> &[SegmentId] {
        match &self.layout {
            ProcessLayout::Segmented { segments } => segments,
            ProcessLayout::Paged { .. } => &[],
        }
    }

    /// Wasted units inside this process's last page (always 0 when segmented)
    pub fn internal_fragmentation(&self) -> Size {
        match self.layout {
            ProcessLayout::Paged {
                internal_fragmentation,
                ..
            } => internal_fragmentation,
            ProcessLayout::Segmented { .. } => 0,
        }
    }
}

/// One entry of the ordered address-space layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "region", rename_all = "snake_case")]
pub enum Region {
    Frame {
        index: FrameIndex,
        start: Address,
        size: Size,
        owner: Option<Pid>,
    },
    Segment(Segment),
    Free(FreeBlock),
}

impl Region {
    pub fn start(&self) -> Address {
        match self {
            Region::Frame { start, .. } => *start,
            Region::Segment(segment) => segment.start,
            Region::Free(block) => block.start,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Region::Frame { size, .. } => *size,
            Region::Segment(segment) => segment.size,
            Region::Free(block) => block.size,
        }
    }

    pub fn owner(&self) -> Option<Pid> {
        match self {
            Region::Frame { owner, .. } => *owner,
            Region::Segment(segment) => Some(segment.pid),
            Region::Free(_) => None,
        }
    }
}

/// Details about a single unit, for selection and inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum CellInfo {
    Free {
        offset: Address,
        block: FreeBlock,
    },
    Page {
        offset: Address,
        pid: Pid,
        name: Arc<str>,
        page_number: usize,
        frame: FrameIndex,
        frame_offset: usize,
    },
    Segment {
        offset: Address,
        segment: Segment,
    },
}

impl CellInfo {
    pub fn pid(&self) -> Option<Pid> {
        match self {
            CellInfo::Free { .. } => None,
            CellInfo::Page { pid, .. } => Some(*pid),
            CellInfo::Segment { segment, .. } => Some(segment.pid),
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub mode: Mode,
    pub total_memory: Size,
    pub used_memory: Size,
    pub free_memory: Size,
    /// Internal fragmentation in paging mode, external in segmentation mode
    pub fragmentation: Size,
    pub internal_fragmentation: Size,
    pub external_fragmentation: Size,
    pub page_faults: u64,
    pub segment_violations: u64,
    pub process_count: usize,
    pub usage_percentage: f64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        if self.usage_percentage >= PRESSURE_CRITICAL_PCT {
            MemoryPressure::Critical
        } else if self.usage_percentage >= PRESSURE_HIGH_PCT {
            MemoryPressure::High
        } else if self.usage_percentage >= PRESSURE_MEDIUM_PCT {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
