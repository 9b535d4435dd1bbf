/*!
 * Scenario Tests
 * End-to-end walkthroughs of both modes
 */

use crate::invariants::assert_invariants;
use memsim::{FreeBlock, MemoryError, MemoryManager, Mode};
use pretty_assertions::assert_eq;

#[test]
fn test_paging_walkthrough() {
    let mut manager = MemoryManager::with_capacity(64, 4).unwrap();
    assert_eq!(manager.total_pages(), 16);

    let kernel = manager.allocate("OS Kernel", 8, None).unwrap();
    assert_eq!(manager.process(kernel).unwrap().frames(), vec![0, 1]);
    let stats = manager.stats();
    assert_eq!((stats.used_memory, stats.free_memory, stats.fragmentation), (8, 56, 0));

    let browser = manager.allocate("Browser", 12, None).unwrap();
    assert_eq!(manager.process(browser).unwrap().frames(), vec![2, 3, 4]);
    let stats = manager.stats();
    assert_eq!((stats.used_memory, stats.free_memory), (20, 44));

    manager.deallocate(kernel).unwrap();
    assert_eq!(manager.frame_table()[0], None);
    assert_eq!(manager.frame_table()[1], None);
    let stats = manager.stats();
    assert_eq!((stats.used_memory, stats.free_memory), (12, 52));
    assert_invariants(&manager);
}

#[test]
fn test_segmentation_walkthrough() {
    let mut manager = MemoryManager::with_capacity(20, 4).unwrap();
    manager.set_mode(Mode::Segmentation);

    let a = manager.allocate("A", 5, None).unwrap();
    let b = manager.allocate("B", 8, None).unwrap();
    assert_eq!(manager.process_segments(a)[0].start, 0);
    assert_eq!(manager.process_segments(b)[0].start, 5);
    assert_eq!(manager.free_blocks(), vec![FreeBlock { start: 13, size: 7 }]);

    // 6 <= 7 free, so this request does fit
    let c = manager.allocate("C", 6, None).unwrap();
    assert_eq!(manager.process_segments(c)[0].start, 13);
    manager.deallocate(c).unwrap();

    // Only 7 units remain, in one block; 8 exceeds free memory entirely
    assert_eq!(
        manager.allocate("D", 8, None),
        Err(MemoryError::InsufficientMemory {
            requested: 8,
            available: 7
        })
    );

    let layout = manager.layout();
    assert_eq!(manager.compact(), 0);
    assert_eq!(manager.layout(), layout);
    assert_eq!(manager.stats().external_fragmentation, 0);
    assert_invariants(&manager);
}

#[test]
fn test_no_suitable_block_scenario() {
    let mut manager = MemoryManager::with_capacity(20, 4).unwrap();
    manager.set_mode(Mode::Segmentation);
    let a = manager.allocate("A", 5, None).unwrap();
    manager.allocate("B", 8, None).unwrap();
    manager.deallocate(a).unwrap();
    // Free: [0,5) and [13,20) -> 12 units total, largest 7

    assert_eq!(
        manager.allocate("C", 8, None),
        Err(MemoryError::NoSuitableBlock {
            requested: 8,
            largest: 7
        })
    );
    assert_eq!(manager.stats().external_fragmentation, 5);
}

#[test]
fn test_mode_round_trip_resets() {
    let mut manager = MemoryManager::new();
    manager.allocate("A", 10, None).unwrap();
    manager.set_mode(Mode::Segmentation);
    manager.allocate("B", 10, None).unwrap();
    manager.set_mode(Mode::Paging);

    assert_eq!(manager.process_count(), 0);
    assert_eq!(manager.used_memory(), 0);
    assert_eq!(manager.stats().fragmentation, 0);
    assert!(manager.segments().is_empty());
    assert_invariants(&manager);
}
