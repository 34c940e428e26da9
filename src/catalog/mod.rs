//! Catalog retrieval: where products come from and how one fetch reports back.

pub mod loader;
pub mod source;

pub use loader::*;
pub use source::*;
