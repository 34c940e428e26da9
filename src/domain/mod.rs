pub mod category;
pub mod product;
pub mod selection;

pub use category::*;
pub use product::*;
pub use selection::*;
