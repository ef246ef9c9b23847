//! Dual-indexed free set of the fit arena.
//!
//! Every free block appears in two structures at once: an address-ordered
//! doubly-linked list (constant-time neighbor lookup for coalescing) and a
//! skip list keyed by `(payload_size, address)` (expected-logarithmic
//! "smallest >= k" and "largest" queries for best- and worst-fit). Both are
//! intrusive; all link storage lives in the block headers inside the arena,
//! never on the host heap.
//!
//! The pair is only ever mutated through [`FreeSet`], so a block is in the
//! address list iff it is in the size index.

use core::ptr;

use crate::consts::{MAGIC_FREE, SKIP_HEIGHT};
use crate::rng::XorShift32;

/// Block header, placed at the base of every block in the fit arena and
/// immediately preceding its payload bytes.
///
/// While the block is free the link fields participate in the two indices.
/// When the block is handed to a caller the header stays in place but is
/// retagged: `magic` flips to the allocated sentinel, `is_free` to false,
/// and the links become meaningless.
#[repr(C)]
pub(crate) struct BlockHeader {
    /// Usable bytes following the header, excluding the header itself.
    pub(crate) payload: usize,
    /// Address-ordered list, next block.
    pub(crate) anext: *mut BlockHeader,
    /// Address-ordered list, previous block.
    pub(crate) aprev: *mut BlockHeader,
    /// Skip-list forward pointers, one per level.
    pub(crate) snext: [*mut BlockHeader; SKIP_HEIGHT],
    /// Number of populated forward levels, 1..=SKIP_HEIGHT.
    pub(crate) height: usize,
    /// FREE or ALLOC sentinel; also the free dispatcher's soft poison value.
    pub(crate) magic: u32,
    /// Mirror of `magic` kept for debug checks.
    pub(crate) is_free: bool,
}

pub(crate) const HEADER_BYTES: usize = core::mem::size_of::<BlockHeader>();
pub(crate) const BLOCK_ALIGN: usize = core::mem::align_of::<BlockHeader>();

impl BlockHeader {
    /// Stamps a fresh, unlinked free header at `at`.
    ///
    /// # Safety
    ///
    /// `at` must be aligned to [`BLOCK_ALIGN`] and point into a live arena
    /// with `HEADER_BYTES + payload` addressable bytes.
    pub(crate) unsafe fn init_free(at: *mut BlockHeader, payload: usize) {
        ptr::write(
            at,
            BlockHeader {
                payload,
                anext: ptr::null_mut(),
                aprev: ptr::null_mut(),
                snext: [ptr::null_mut(); SKIP_HEIGHT],
                height: 1,
                magic: MAGIC_FREE,
                is_free: true,
            },
        );
    }

    /// # Safety
    ///
    /// `blk` must point to a header inside a live arena.
    pub(crate) unsafe fn payload_ptr(blk: *mut BlockHeader) -> *mut u8 {
        (blk as *mut u8).add(HEADER_BYTES)
    }

    /// # Safety
    ///
    /// `ptr` must lie at least `HEADER_BYTES` into a live arena.
    pub(crate) unsafe fn from_payload(ptr: *mut u8) -> *mut BlockHeader {
        ptr.sub(HEADER_BYTES) as *mut BlockHeader
    }
}

/// Two blocks are adjacent iff the first ends exactly where the second
/// starts.
///
/// # Safety
///
/// `a` must point to a live header.
pub(crate) unsafe fn adjacent(a: *mut BlockHeader, b: *mut BlockHeader) -> bool {
    (a as usize) + HEADER_BYTES + (*a).payload == b as usize
}

/// Strict `(payload_size, address)` order. Equal-size blocks order by
/// address, which makes the index a total order and lets best/worst-fit
/// break size ties toward the lowest address.
///
/// # Safety
///
/// Both pointers must reference live free headers.
unsafe fn precedes(a: *mut BlockHeader, b: *mut BlockHeader) -> bool {
    ((*a).payload, a as usize) < ((*b).payload, b as usize)
}

pub(crate) struct FreeSet {
    /// Lowest-addressed free block.
    head: *mut BlockHeader,
    /// Skip-list heads, one per level.
    levels: [*mut BlockHeader; SKIP_HEIGHT],
    /// Drives skip-height selection; reset on bootstrap.
    rng: XorShift32,
}

impl FreeSet {
    pub const fn new() -> Self {
        Self {
            head: ptr::null_mut(),
            levels: [ptr::null_mut(); SKIP_HEIGHT],
            rng: XorShift32::new(),
        }
    }

    pub fn head(&self) -> *mut BlockHeader {
        self.head
    }

    pub fn clear(&mut self) {
        self.head = ptr::null_mut();
        self.levels = [ptr::null_mut(); SKIP_HEIGHT];
    }

    pub fn reset_rng(&mut self) {
        self.rng.reset();
    }

    /// Address-list predecessor and successor of `blk`.
    ///
    /// # Safety
    ///
    /// `blk` must be a member of this set.
    pub unsafe fn neighbors(&self, blk: *mut BlockHeader) -> (*mut BlockHeader, *mut BlockHeader) {
        ((*blk).aprev, (*blk).anext)
    }

    /// Removes `blk` from both indices.
    ///
    /// # Safety
    ///
    /// `blk` must be a member of this set.
    pub unsafe fn remove(&mut self, blk: *mut BlockHeader) {
        self.unlink_addr(blk);
        self.detach_size(blk);
    }

    /// Inserts `blk` between the known address neighbors `prev` and `next`
    /// and into the size index. Used to splice a split tail back in at the
    /// allocated block's former position.
    ///
    /// # Safety
    ///
    /// `prev`/`next` must be the correct address neighbors for `blk` (either
    /// may be null at the list ends), and `blk` must be unlinked.
    pub unsafe fn insert_at(
        &mut self,
        prev: *mut BlockHeader,
        next: *mut BlockHeader,
        blk: *mut BlockHeader,
    ) {
        self.link_addr(prev, next, blk);
        self.attach_size(blk);
    }

    /// Inserts `blk` into both indices, locating the address position by a
    /// linear walk from the head. O(n); only used on free.
    ///
    /// # Safety
    ///
    /// `blk` must be an unlinked free header inside the arena.
    pub unsafe fn insert_sorted(&mut self, blk: *mut BlockHeader) {
        let mut next = self.head;
        let mut prev: *mut BlockHeader = ptr::null_mut();
        while !next.is_null() && (next as usize) < (blk as usize) {
            prev = next;
            next = (*next).anext;
        }
        self.insert_at(prev, next, blk);
    }

    pub(super) unsafe fn unlink_addr(&mut self, blk: *mut BlockHeader) {
        if (*blk).aprev.is_null() {
            self.head = (*blk).anext;
        } else {
            (*(*blk).aprev).anext = (*blk).anext;
        }
        if !(*blk).anext.is_null() {
            (*(*blk).anext).aprev = (*blk).aprev;
        }
        (*blk).aprev = ptr::null_mut();
        (*blk).anext = ptr::null_mut();
    }

    pub(super) unsafe fn link_addr(
        &mut self,
        prev: *mut BlockHeader,
        next: *mut BlockHeader,
        blk: *mut BlockHeader,
    ) {
        (*blk).aprev = prev;
        (*blk).anext = next;
        if prev.is_null() {
            self.head = blk;
        } else {
            (*prev).anext = blk;
        }
        if !next.is_null() {
            (*next).aprev = blk;
        }
    }

    /// For each level, the last node strictly preceding `blk` under
    /// `(payload_size, address)`; null where `blk` would become the level
    /// head.
    unsafe fn skip_predecessors(&self, blk: *mut BlockHeader) -> [*mut BlockHeader; SKIP_HEIGHT] {
        let mut update = [ptr::null_mut(); SKIP_HEIGHT];
        let mut cur: *mut BlockHeader = ptr::null_mut();
        for lvl in (0..SKIP_HEIGHT).rev() {
            let mut probe = if cur.is_null() {
                self.levels[lvl]
            } else {
                (*cur).snext[lvl]
            };
            while !probe.is_null() && precedes(probe, blk) {
                cur = probe;
                probe = (*probe).snext[lvl];
            }
            update[lvl] = cur;
        }
        update
    }

    /// Splices `blk` into the size index with a freshly drawn height.
    ///
    /// # Safety
    ///
    /// `blk` must be a free header not currently in the size index.
    pub(super) unsafe fn attach_size(&mut self, blk: *mut BlockHeader) {
        let height = self.rng.skip_height();
        (*blk).height = height;
        let update = self.skip_predecessors(blk);
        for lvl in 0..height {
            let next = if update[lvl].is_null() {
                self.levels[lvl]
            } else {
                (*update[lvl]).snext[lvl]
            };
            (*blk).snext[lvl] = next;
            if update[lvl].is_null() {
                self.levels[lvl] = blk;
            } else {
                (*update[lvl]).snext[lvl] = blk;
            }
        }
        for lvl in height..SKIP_HEIGHT {
            (*blk).snext[lvl] = ptr::null_mut();
        }
    }

    /// Detaches `blk` from every level where it appears.
    ///
    /// # Safety
    ///
    /// `blk` must be in the size index.
    pub(super) unsafe fn detach_size(&mut self, blk: *mut BlockHeader) {
        let update = self.skip_predecessors(blk);
        for lvl in 0..SKIP_HEIGHT {
            let candidate = if update[lvl].is_null() {
                self.levels[lvl]
            } else {
                (*update[lvl]).snext[lvl]
            };
            if candidate == blk {
                if update[lvl].is_null() {
                    self.levels[lvl] = (*blk).snext[lvl];
                } else {
                    (*update[lvl]).snext[lvl] = (*blk).snext[lvl];
                }
            }
        }
    }

    /// Lowest-addressed block whose payload is at least `need`, or null.
    pub unsafe fn first_ge(&self, need: usize) -> *mut BlockHeader {
        let mut cur: *mut BlockHeader = ptr::null_mut();
        for lvl in (0..SKIP_HEIGHT).rev() {
            let mut probe = if cur.is_null() {
                self.levels[lvl]
            } else {
                (*cur).snext[lvl]
            };
            while !probe.is_null() && (*probe).payload < need {
                cur = probe;
                probe = (*probe).snext[lvl];
            }
        }
        if cur.is_null() {
            self.levels[0]
        } else {
            (*cur).snext[0]
        }
    }

    /// Greatest `(payload_size, address)` element, or null.
    pub unsafe fn max(&self) -> *mut BlockHeader {
        let mut cur: *mut BlockHeader = ptr::null_mut();
        for lvl in (0..SKIP_HEIGHT).rev() {
            let mut probe = if cur.is_null() {
                self.levels[lvl]
            } else {
                (*cur).snext[lvl]
            };
            while !probe.is_null() {
                cur = probe;
                probe = (*probe).snext[lvl];
            }
        }
        cur
    }

    /// Walks both indices and asserts they describe the same set: the skip
    /// list is strictly ordered per level, each node's dead levels are null,
    /// and level 0 holds exactly the address list's members.
    #[cfg(debug_assertions)]
    pub(super) unsafe fn assert_coherent(&self, addr_list_len: usize) {
        for lvl in 0..SKIP_HEIGHT {
            let mut node = self.levels[lvl];
            let mut prev: *mut BlockHeader = ptr::null_mut();
            let mut seen = 0usize;
            while !node.is_null() {
                debug_assert!((*node).height > lvl);
                debug_assert!((1..=SKIP_HEIGHT).contains(&(*node).height));
                for dead in (*node).height..SKIP_HEIGHT {
                    debug_assert!((*node).snext[dead].is_null());
                }
                if !prev.is_null() {
                    debug_assert!(precedes(prev, node));
                }
                seen += 1;
                prev = node;
                node = (*node).snext[lvl];
            }
            if lvl == 0 {
                debug_assert_eq!(seen, addr_list_len);
            }
        }
    }
}
