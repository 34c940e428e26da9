//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod telemetry;
pub mod view_system;

pub use config::*;
pub use telemetry::*;
pub use view_system::*;
