//! Walks every placement policy once: allocate two blocks, stamp their
//! payloads, report the recorded strategy, free everything.

use fitalloc::{alloc_best, alloc_buddy, alloc_first, alloc_next, alloc_worst, free};
use fitalloc::{current_strategy, strategy_name};

fn run_strategy(label: &str, alloc: fn(usize) -> *mut u8) {
    println!("=== {label} ===");

    let a = alloc(128);
    let b = alloc(64);
    if a.is_null() || b.is_null() {
        println!("allocation failed");
        unsafe {
            free(a);
            free(b);
        }
        return;
    }

    unsafe {
        core::slice::from_raw_parts_mut(a, 128).fill(b'A');
        core::slice::from_raw_parts_mut(b, 64).fill(b'b');
        println!(
            " block A payload preview: {}...",
            core::str::from_utf8_unchecked(core::slice::from_raw_parts(a, 16))
        );
        println!(
            " block B payload preview: {}...",
            core::str::from_utf8_unchecked(core::slice::from_raw_parts(b, 16))
        );
    }
    println!(
        " strategy recorded as: {}\n",
        strategy_name(current_strategy())
    );

    unsafe {
        free(a);
        free(b);
    }
}

fn main() {
    let cases: [(&str, fn(usize) -> *mut u8); 4] = [
        ("first-fit", alloc_first),
        ("next-fit", alloc_next),
        ("best-fit", alloc_best),
        ("worst-fit", alloc_worst),
    ];
    for (label, alloc) in cases {
        run_strategy(label, alloc);
    }

    println!("=== buddy allocator ===");
    let msg = b"Buddy blocks are power-of-two sized!";
    let buddy = alloc_buddy(256);
    if buddy.is_null() {
        println!(" buddy allocation failed");
        return;
    }
    unsafe {
        core::slice::from_raw_parts_mut(buddy, msg.len()).copy_from_slice(msg);
        println!(
            " buddy block: {}",
            core::str::from_utf8_unchecked(core::slice::from_raw_parts(buddy, msg.len()))
        );
        free(buddy);
    }
}
