//! Turns view state into a page: skeleton while loading, otherwise the grid.

pub mod html;
pub mod page;
pub mod text;

pub use page::*;
