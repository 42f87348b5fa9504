//! Thread-level collaborators of the extractor: ordering and visibility.

pub mod policy;
pub mod sort;

pub use policy::{DefaultThreadPolicy, ThreadPolicy};
pub use sort::sort_chronologically;
