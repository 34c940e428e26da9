//! The product grid view: state, controller and the task that owns them.

pub mod messages;
pub mod route;
pub mod service;
pub mod state;

pub use messages::*;
pub use route::*;
pub use service::*;
pub use state::*;
