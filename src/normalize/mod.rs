//! Field normalization and record assembly
//!
//! Turns the uncontrolled string lists of an `oai_dc` record into the
//! canonical [`BookRecord`](crate::models::BookRecord). Every function in
//! [`fields`] is total: malformed input produces the documented default value
//! and a warn-level diagnostic, never an error.

pub mod assembler;
pub mod fields;

pub use assembler::{assemble, eligible_for_publication};
