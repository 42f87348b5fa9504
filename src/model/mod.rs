//! Core data model types for report actions, threads, and extracted attachments.

pub mod attachment;
pub mod message;
pub mod thread;
