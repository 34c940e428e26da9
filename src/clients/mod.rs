#[macro_use]
pub mod macros;
pub mod view_client;

pub use view_client::*;
