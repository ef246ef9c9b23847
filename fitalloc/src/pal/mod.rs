//! Platform abstraction layer.

pub(crate) mod sys_alloc;
