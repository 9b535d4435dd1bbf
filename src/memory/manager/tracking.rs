/*!
 * Statistics Tracking
 * Aggregate counters maintained alongside the memory map
 */

use crate::core::types::Size;

/// Running counters; free memory is always `total - used`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Counters {
    pub used: Size,
    /// Sum of every live paged process's last-page waste
    pub internal_fragmentation: Size,
    /// Free units outside the largest free run (segmentation only)
    pub external_fragmentation: Size,
    pub page_faults: u64,
    pub segment_violations: u64,
}

impl Counters {
    pub fn add_allocation(&mut self, size: Size, internal_fragmentation: Size) {
        self.used += size;
        self.internal_fragmentation += internal_fragmentation;
    }

    pub fn remove_allocation(&mut self, size: Size, internal_fragmentation: Size) {
        self.used = self.used.saturating_sub(size);
        self.internal_fragmentation = self
            .internal_fragmentation
            .saturating_sub(internal_fragmentation);
    }
}
