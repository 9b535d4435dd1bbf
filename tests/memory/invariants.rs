/*!
 * Shared invariant checks for engine states
 */

use memsim::{Cell, MemoryManager, Mode};
use std::collections::HashSet;

/// Assert every structural invariant of the current state
pub fn assert_invariants(manager: &MemoryManager) {
    let stats = manager.stats();
    assert_eq!(
        stats.used_memory + stats.free_memory,
        stats.total_memory,
        "conservation violated"
    );

    let recorded: usize = manager.processes().iter().map(|p| p.size).sum();
    assert_eq!(recorded, stats.used_memory, "process sizes disagree with used memory");

    match manager.mode() {
        Mode::Paging => assert_paging(manager),
        Mode::Segmentation => assert_segmentation(manager),
    }
}

fn assert_paging(manager: &MemoryManager) {
    assert!(manager.segments().is_empty());

    let mut claimed = HashSet::new();
    let mut fragmentation = 0;
    for process in manager.processes() {
        let used: usize = process.pages().iter().map(|p| p.used).sum();
        assert_eq!(used, process.size, "PID {} page usage mismatch", process.pid);
        fragmentation += process.internal_fragmentation();

        for page in process.pages() {
            assert!(claimed.insert(page.frame), "frame {} claimed twice", page.frame);
            assert_eq!(manager.frame_table()[page.frame], Some(process.pid));
        }
    }
    assert_eq!(fragmentation, manager.stats().internal_fragmentation);

    let owned_frames = manager.frame_table().iter().filter(|f| f.is_some()).count();
    assert_eq!(owned_frames, claimed.len(), "orphaned frame-table entries");

    let page_size = manager.page_size();
    for (frame, owner) in manager.frame_table().iter().enumerate() {
        for cell in &manager.memory_map()[frame * page_size..(frame + 1) * page_size] {
            assert_eq!(cell.pid(), *owner, "frame {} cells disagree with frame table", frame);
        }
    }
}

fn assert_segmentation(manager: &MemoryManager) {
    assert!(manager.frame_table().iter().all(Option::is_none));

    let segments = manager.segments();
    for (i, a) in segments.iter().enumerate() {
        assert!(a.end() <= manager.total_memory(), "segment out of bounds");
        for b in &segments[i + 1..] {
            assert!(!a.overlaps(b), "segments {} and {} overlap", a.id, b.id);
        }
        for cell in &manager.memory_map()[a.start..a.end()] {
            assert_eq!(cell.pid(), Some(a.pid));
        }
    }

    let total: usize = segments.iter().map(|s| s.size).sum();
    assert_eq!(total, manager.used_memory());

    let claimed_cells = manager.memory_map().iter().filter(|c| !c.is_free()).count();
    assert_eq!(claimed_cells, total, "stray claimed cells");
    assert!(manager.memory_map().iter().all(|c| matches!(c, Cell::Free | Cell::Segment(_))));

    assert_eq!(manager.stats().external_fragmentation, manager.external_fragmentation());
}
