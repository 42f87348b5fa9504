//! Input parsing: thread documents and action timestamps.

pub mod created;
pub mod thread;
