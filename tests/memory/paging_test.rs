/*!
 * Paging Tests
 * Frame allocation, internal fragmentation and release
 */

use crate::invariants::assert_invariants;
use memsim::{MemoryError, MemoryManager, Mode};
use pretty_assertions::assert_eq;

#[test]
fn test_page_count_and_fragmentation() {
    let mut manager = MemoryManager::with_capacity(64, 4).unwrap();
    let pid = manager.allocate("P", 10, None).unwrap();

    let record = manager.process(pid).unwrap();
    assert_eq!(record.pages().len(), 3);
    assert_eq!(record.internal_fragmentation(), 2);
    assert_eq!(record.mode(), Mode::Paging);
    assert_eq!(manager.stats().fragmentation, 2);
    assert_invariants(&manager);
}

#[test]
fn test_exact_multiple_has_no_fragmentation() {
    let mut manager = MemoryManager::new();
    let pid = manager.allocate("P", 16, None).unwrap();
    assert_eq!(manager.process(pid).unwrap().internal_fragmentation(), 0);
    assert!(manager.process(pid).unwrap().pages().iter().all(|p| p.used == 4));
}

#[test]
fn test_fill_all_frames() {
    let mut manager = MemoryManager::new();
    for i in 0..16 {
        manager.allocate(&format!("P{}", i), 4, None).unwrap();
    }
    assert_eq!(manager.free_memory(), 0);
    assert!(manager.frame_table().iter().all(Option::is_some));
    assert_eq!(
        manager.allocate("Overflow", 1, None),
        Err(MemoryError::InsufficientMemory {
            requested: 1,
            available: 0
        })
    );
    assert_invariants(&manager);
}

#[test]
fn test_fragmented_frames_still_satisfy_request() {
    // Paging has no external fragmentation: scattered frames are fine
    let mut manager = MemoryManager::with_capacity(16, 4).unwrap();
    let a = manager.allocate("A", 4, None).unwrap();
    manager.allocate("B", 4, None).unwrap();
    let c = manager.allocate("C", 4, None).unwrap();
    manager.allocate("D", 4, None).unwrap();
    manager.deallocate(a).unwrap();
    manager.deallocate(c).unwrap();

    let e = manager.allocate("E", 7, None).unwrap();
    assert_eq!(manager.process(e).unwrap().frames(), vec![0, 2]);
    assert_invariants(&manager);
}

#[test]
fn test_pages_exhausted_before_units() {
    // Internal fragmentation consumes frames faster than units
    let mut manager = MemoryManager::with_capacity(8, 4).unwrap();
    manager.allocate("A", 1, None).unwrap();
    manager.allocate("B", 1, None).unwrap();
    assert_eq!(manager.free_memory(), 6);

    let before = manager.stats();
    assert_eq!(
        manager.allocate("C", 1, None),
        Err(MemoryError::InsufficientContiguousPages {
            required: 1,
            available: 0
        })
    );
    assert_eq!(manager.stats(), before);
    assert_eq!(manager.next_pid(), 3);
}

#[test]
fn test_deallocate_twice_fails() {
    let mut manager = MemoryManager::new();
    let pid = manager.allocate("A", 5, None).unwrap();
    manager.deallocate(pid).unwrap();
    assert_eq!(manager.deallocate(pid), Err(MemoryError::UnknownProcess(pid)));
}

#[test]
fn test_pids_not_reused_within_mode() {
    let mut manager = MemoryManager::new();
    let a = manager.allocate("A", 4, None).unwrap();
    manager.deallocate(a).unwrap();
    let b = manager.allocate("B", 4, None).unwrap();
    assert_eq!((a, b), (1, 2));
}
