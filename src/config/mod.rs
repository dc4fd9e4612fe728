// Re-exports so callers can "use crate::config::*".
pub mod api;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod store;

pub use api::*;
pub use config::*;
pub use i18n::*;
pub use logging::*;
pub use store::*;
