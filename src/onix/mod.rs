//! ONIX message construction and serialization
//!
//! [`model`] holds the immutable header/product tree mirroring the ONIX 3.0
//! elements we emit, [`mapper`] reshapes a [`BookRecord`](crate::models::BookRecord)
//! into that tree, and [`writer`] serializes it to an XML file named after the
//! ISBN.

pub mod mapper;
pub mod model;
pub mod writer;

pub use model::{Header, OnixMessage, Product};
pub use writer::write_onix_file;
