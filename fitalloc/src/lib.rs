//! A placement-policy laboratory allocator.
//!
//! Five classical block-placement policies (first-fit, next-fit, best-fit,
//! worst-fit, binary buddy) over arenas obtained directly from the OS's
//! anonymous-mapping facility. Each policy has its own allocation entry
//! point so a benchmark harness or trace replayer can observe fragmentation,
//! latency, and placement behavior of one strategy in isolation; a single
//! [`free`] routes every returned pointer back to the arena that owns it.
//!
//! The fit policies share one 4 KiB arena whose free blocks are indexed
//! twice (address-ordered list plus a size-keyed skip list); the buddy
//! policy has an independent 4 KiB arena of its own. All metadata lives
//! inside the arenas; the host allocator is never consulted.
//!
//! Not thread-safe by contract: callers serialize externally. Every failure
//! mode is quiet: null on exhaustion, silent no-op on bad frees. The only
//! loud path is a failed arena mapping, which is fatal.
//!
//! ```
//! let p = fitalloc::alloc_best(64);
//! assert!(!p.is_null());
//! assert_eq!(fitalloc::current_strategy().name(), "best-fit");
//! unsafe { fitalloc::free(p) };
//! ```

mod buddy_system;
mod consts;
mod error;
mod fit_system;
mod pal;
mod rng;
mod strategy;

pub use buddy_system::{BuddyHeap, BuddyStats};
pub use consts::{HEAP_BYTES, MAX_ORDER, MIN_TAIL, SKIP_HEIGHT};
pub use fit_system::{FitHeap, HeapStats};
pub use strategy::{current_strategy, strategy_name, Strategy};

use spin::Mutex;

static FIT_HEAP: Mutex<FitHeap> = Mutex::new(FitHeap::new());
static BUDDY_HEAP: Mutex<BuddyHeap> = Mutex::new(BuddyHeap::new());

/// First-fit allocation from the process-wide fit arena. Null on failure.
pub fn alloc_first(size: usize) -> *mut u8 {
    strategy::record(Strategy::FirstFit);
    FIT_HEAP.lock().first_fit(size)
}

/// Next-fit allocation from the process-wide fit arena. Null on failure.
pub fn alloc_next(size: usize) -> *mut u8 {
    strategy::record(Strategy::NextFit);
    FIT_HEAP.lock().next_fit(size)
}

/// Best-fit allocation from the process-wide fit arena. Null on failure.
pub fn alloc_best(size: usize) -> *mut u8 {
    strategy::record(Strategy::BestFit);
    FIT_HEAP.lock().best_fit(size)
}

/// Worst-fit allocation from the process-wide fit arena. Null on failure.
pub fn alloc_worst(size: usize) -> *mut u8 {
    strategy::record(Strategy::WorstFit);
    FIT_HEAP.lock().worst_fit(size)
}

/// Buddy allocation from the process-wide buddy arena. Null on failure.
pub fn alloc_buddy(size: usize) -> *mut u8 {
    strategy::record(Strategy::Buddy);
    BUDDY_HEAP.lock().alloc(size)
}

/// Returns `ptr` to whichever process-wide arena owns it.
///
/// Null is a no-op. A pointer into the buddy arena goes down the buddy
/// path, a pointer into the fit arena down the fit path, and anything else
/// (foreign pointers, double frees whose header tag has already flipped,
/// arbitrary garbage) is ignored without a diagnostic.
///
/// # Safety
///
/// `ptr` must be null, a pointer previously returned by one of the
/// `alloc_*` functions in this crate, or a pointer outside both arenas.
/// Passing a forged pointer *into* an arena can corrupt that arena's
/// metadata.
pub unsafe fn free(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    {
        let mut buddy = BUDDY_HEAP.lock();
        if buddy.contains(ptr) {
            let _ = buddy.release(ptr);
            return;
        }
    }
    let mut fit = FIT_HEAP.lock();
    if fit.contains(ptr) {
        let _ = fit.release(ptr);
    }
}

/// Free-space summary of the process-wide fit arena.
pub fn fit_heap_stats() -> HeapStats {
    FIT_HEAP.lock().stats()
}

/// Free-space summary of the process-wide buddy arena.
pub fn buddy_heap_stats() -> BuddyStats {
    BUDDY_HEAP.lock().stats()
}
