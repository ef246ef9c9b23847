//! Compile-time configuration.
//!
//! Everything here is fixed at compile time so that a given allocation trace
//! produces the same placement decisions on every run.

/// Size of each arena mapping. The fit arena and the buddy arena are both
/// exactly this large, independently.
pub const HEAP_BYTES: usize = 4096;

/// Smallest residual payload that still justifies splitting a block. A split
/// that would leave a tail smaller than `header + MIN_TAIL` bytes is not
/// performed; the caller receives the whole block instead.
pub const MIN_TAIL: usize = 32;

/// Maximum number of forward-link levels in the size index.
pub const SKIP_HEIGHT: usize = 6;

/// One past the largest buddy order. The initial buddy block has order
/// `MAX_ORDER - 1`, i.e. `1 << (MAX_ORDER - 1)` bytes.
pub const MAX_ORDER: usize = 13;

/// Header tag of a free block.
pub const MAGIC_FREE: u32 = 0xFEED_FACE;

/// Header tag of an allocated block.
pub const MAGIC_ALLOC: u32 = 0xDEAD_BEEF;

const _: () = assert!(HEAP_BYTES.is_power_of_two());
const _: () = assert!(1 << (MAX_ORDER - 1) <= HEAP_BYTES);
const _: () = assert!(MIN_TAIL % 8 == 0);
const _: () = assert!(MAGIC_FREE != MAGIC_ALLOC);
