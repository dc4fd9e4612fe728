//! Error normalization: raw request failures, the closed error taxonomy,
//! the static error map and the handler that turns errors into toasts.

pub mod error_map;
pub mod failure;
pub mod handler;
pub mod kind;

pub use error_map::{describe, ErrorDescriptor};
pub use failure::RequestFailure;
pub use handler::ErrorHandler;
pub use kind::{AppError, FieldError};
