//! Session ownership: the shared session cell, the auth store that mutates
//! it and the registration form checks.

pub mod session;
pub mod store;
pub mod validation;

pub use session::{SessionReader, SessionState};
pub use store::AuthStore;
