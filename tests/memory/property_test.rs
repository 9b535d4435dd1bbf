/*!
 * Property Tests
 * Random operation sequences against the engine invariants
 */

use crate::invariants::assert_invariants;
use memsim::{MemoryManager, Mode, ProcessRecord, SegmentKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Alloc(usize, SegmentKind),
    /// Index into the live PIDs (or an unknown PID when none are live)
    Free(usize),
    Compact,
    SetMode(Mode),
    PageFault,
    SegmentViolation,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let kind = prop_oneof![
        Just(SegmentKind::Code),
        Just(SegmentKind::Data),
        Just(SegmentKind::Stack),
        Just(SegmentKind::Heap),
    ];
    prop_oneof![
        6 => (0usize..24, kind).prop_map(|(size, kind)| Op::Alloc(size, kind)),
        4 => (0usize..16).prop_map(Op::Free),
        1 => Just(Op::Compact),
        1 => prop_oneof![Just(Mode::Paging), Just(Mode::Segmentation)].prop_map(Op::SetMode),
        1 => Just(Op::PageFault),
        1 => Just(Op::SegmentViolation),
    ]
}

fn snapshot(manager: &MemoryManager) -> (String, Vec<memsim::Cell>, Vec<ProcessRecord>) {
    (
        format!("{:?}", manager.stats()),
        manager.memory_map().to_vec(),
        manager.processes().into_iter().cloned().collect(),
    )
}

fn apply(manager: &mut MemoryManager, op: &Op) {
    match op {
        Op::Alloc(size, kind) => {
            let before = snapshot(manager);
            let next = manager.next_pid();
            match manager.allocate("p", *size, Some(*kind)) {
                Ok(pid) => assert_eq!(pid, next),
                Err(_) => assert_eq!(snapshot(manager), before, "failed allocation mutated state"),
            }
        }
        Op::Free(index) => {
            let pids: Vec<_> = manager.processes().iter().map(|p| p.pid).collect();
            let before = snapshot(manager);
            match pids.get(index % pids.len().max(1)) {
                Some(&pid) => {
                    let size = manager.process_memory(pid);
                    let used = manager.used_memory();
                    let record = manager.deallocate(pid).unwrap();
                    assert_eq!(record.size, size);
                    assert_eq!(manager.used_memory(), used - size);
                }
                None => {
                    assert!(manager.deallocate(9999).is_err());
                    assert_eq!(snapshot(manager), before);
                }
            }
        }
        Op::Compact => {
            let used = manager.used_memory();
            let sizes: Vec<_> = manager.processes().iter().map(|p| (p.pid, p.size)).collect();
            manager.compact();
            assert_eq!(manager.used_memory(), used);
            let after: Vec<_> = manager.processes().iter().map(|p| (p.pid, p.size)).collect();
            assert_eq!(sizes, after);
            if manager.mode() == Mode::Segmentation {
                assert_eq!(manager.stats().external_fragmentation, 0);
                assert_eq!(manager.compact(), 0);
            }
        }
        Op::SetMode(mode) => {
            manager.set_mode(*mode);
            assert_eq!(manager.used_memory(), 0);
            assert_eq!(manager.process_count(), 0);
            assert_eq!(manager.next_pid(), 1);
        }
        Op::PageFault => {
            let faults = manager.stats().page_faults;
            let counted = manager.simulate_page_fault();
            assert_eq!(counted, manager.mode() == Mode::Paging);
            assert_eq!(manager.stats().page_faults, faults + counted as u64);
        }
        Op::SegmentViolation => {
            let violations = manager.stats().segment_violations;
            let counted = manager.simulate_segment_violation();
            assert_eq!(counted, manager.mode() == Mode::Segmentation);
            assert_eq!(manager.stats().segment_violations, violations + counted as u64);
        }
    }
}

proptest! {
    #[test]
    fn prop_invariants_hold(
        segmentation in any::<bool>(),
        page_size in prop_oneof![Just(2usize), Just(4), Just(5)],
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut manager = MemoryManager::with_capacity(64, page_size).unwrap();
        if segmentation {
            manager.set_mode(Mode::Segmentation);
        }
        for op in &ops {
            apply(&mut manager, op);
            assert_invariants(&manager);
        }
    }

    #[test]
    fn prop_paging_fragmentation_formula(page_size in 1usize..9, size in 1usize..64) {
        // 64 frames, so any size below 64 always fits
        let mut manager = MemoryManager::with_capacity(64 * page_size, page_size).unwrap();
        let pid = manager.allocate("p", size, None).unwrap();
        let record = manager.process(pid).unwrap();

        prop_assert_eq!(record.pages().len(), size.div_ceil(page_size));
        let expected = if size % page_size == 0 { 0 } else { page_size - size % page_size };
        prop_assert_eq!(record.internal_fragmentation(), expected);
    }
}
