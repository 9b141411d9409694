pub(crate) mod buffer;
pub(crate) mod export;
pub(crate) mod scheduler;
