//! Data models for the harvester

pub mod book;
pub mod raw;

// Re-export commonly used types
pub use book::{BookFormat, BookRecord};
pub use raw::RawRecord;
