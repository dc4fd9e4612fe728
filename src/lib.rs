//! Session lifecycle and error normalization for the ArticPad client.

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod i18n;
pub mod loading;
pub mod models;
pub mod notify;
pub mod router;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
