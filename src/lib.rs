//! `threadmedia`: extract the media carousel of a chat thread.
//!
//! This crate provides the core library for loading a thread's report
//! actions, deciding which are visible, and scanning their HTML bodies
//! for image and video attachments in chronological order.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod parser;
pub mod stats;
pub mod thread;
