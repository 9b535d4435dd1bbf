/*!
 * Layout Queries
 * Ordered region view and per-unit inspection for drivers that render or select
 */

use super::super::types::{Cell, CellInfo, Mode, Region};
use super::MemoryManager;
use crate::core::types::{Address, Pid};

impl MemoryManager {
    /// Address space as ordered regions
    ///
    /// Paging: one region per frame in frame order. Segmentation: segments and
    /// free blocks merged by start offset.
    pub fn layout(&self) -> Vec<Region> {
        match self.mode {
            Mode::Paging => self
                .frame_table
                .iter()
                .enumerate()
                .map(|(index, owner)| Region::Frame {
                    index,
                    start: index * self.page_size,
                    size: self.page_size,
                    owner: *owner,
                })
                .collect(),
            Mode::Segmentation => {
                let mut regions: Vec<Region> = self
                    .segments
                    .iter()
                    .cloned()
                    .map(Region::Segment)
                    .chain(self.free_blocks().into_iter().map(Region::Free))
                    .collect();
                regions.sort_by_key(Region::start);
                regions
            }
        }
    }

    /// Owner of the unit at `offset`
    pub fn owner_at(&self, offset: Address) -> Option<Pid> {
        self.memory.get(offset).and_then(Cell::pid)
    }

    /// Everything known about one unit; `None` past the end of memory
    pub fn inspect(&self, offset: Address) -> Option<CellInfo> {
        match self.memory.get(offset)? {
            Cell::Free => self
                .free_blocks()
                .into_iter()
                .find(|block| block.contains(offset))
                .map(|block| CellInfo::Free { offset, block }),
            Cell::Page(cell) => Some(CellInfo::Page {
                offset,
                pid: cell.pid,
                name: cell.name.clone(),
                page_number: cell.page_number,
                frame: cell.frame,
                frame_offset: offset - cell.frame * self.page_size,
            }),
            Cell::Segment(cell) => self
                .segments
                .iter()
                .find(|segment| segment.id == cell.segment)
                .map(|segment| CellInfo::Segment {
                    offset,
                    segment: segment.clone(),
                }),
        }
    }
}
