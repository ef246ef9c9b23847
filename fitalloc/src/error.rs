use core::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct AllocError(i32);

impl AllocError {
    /// No adequate free block
    pub const ENOMEM: Self = AllocError(-1i32);

    /// Pointer outside every arena
    pub const EFOREIGN: Self = AllocError(-2i32);

    /// Header tag is not the allocated sentinel (double free, corruption)
    pub const EBADMAGIC: Self = AllocError(-3i32);

    /// Requested size is zero or unrepresentable
    pub const ESIZE: Self = AllocError(-4i32);
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocator error (errno {})", self.0)
    }
}

pub(crate) type Result<T> = core::result::Result<T, AllocError>;
