//! Binary buddy arena with per-order free lists.

mod heap;

pub use heap::{BuddyHeap, BuddyStats};
