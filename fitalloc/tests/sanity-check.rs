//! Smoke test over the process-wide arenas. Everything lives in one `#[test]`
//! because the arenas are shared process state and the harness runs tests
//! concurrently.

use fitalloc::{
    alloc_best, alloc_buddy, alloc_first, alloc_next, alloc_worst, buddy_heap_stats,
    current_strategy, fit_heap_stats, free, strategy_name, Strategy, MAX_ORDER,
};

fn smoke(label: Strategy, alloc: fn(usize) -> *mut u8) {
    let ptr = alloc(8 * core::mem::size_of::<u32>());
    assert!(!ptr.is_null(), "{} returned null", label.name());
    assert_eq!(current_strategy(), label);
    unsafe {
        let words = core::slice::from_raw_parts_mut(ptr as *mut u32, 8);
        for (i, w) in words.iter_mut().enumerate() {
            *w = i as u32 * 17;
        }
        for (i, w) in words.iter().enumerate() {
            assert_eq!(*w, i as u32 * 17);
        }
        free(ptr);
    }
}

#[test]
fn sanity_check() {
    smoke(Strategy::FirstFit, alloc_first);
    smoke(Strategy::NextFit, alloc_next);
    smoke(Strategy::BestFit, alloc_best);
    smoke(Strategy::WorstFit, alloc_worst);
    smoke(Strategy::Buddy, alloc_buddy);

    assert_eq!(strategy_name(current_strategy()), "buddy");

    // every failed attempt still records its policy
    assert!(alloc_worst(0).is_null());
    assert_eq!(current_strategy(), Strategy::WorstFit);

    // both arenas are whole again after the round trips
    let fit = fit_heap_stats();
    assert_eq!(fit.free_blocks, 1);
    assert_eq!(fit.free_bytes, fitalloc::FitHeap::CAPACITY);
    let buddy = buddy_heap_stats();
    assert_eq!(buddy.free_per_order[MAX_ORDER - 1], 1);

    unsafe {
        // null and foreign pointers fall through silently
        free(core::ptr::null_mut());
        let boxed = Box::new(0u64);
        free(&*boxed as *const u64 as *mut u8);
    }
    assert_eq!(fit_heap_stats(), fit);
    assert_eq!(buddy_heap_stats(), buddy);

    // the dispatcher routes by arena, not by call site
    let a = alloc_first(96);
    let b = alloc_buddy(96);
    unsafe {
        free(b);
        free(a);
    }
    assert_eq!(fit_heap_stats(), fit);
    assert_eq!(buddy_heap_stats(), buddy);
}
