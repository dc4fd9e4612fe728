//! Localization: locale negotiation and message lookup.

pub mod catalog;
pub mod locale;

pub use catalog::{Catalog, CatalogError};
pub use locale::negotiate_locale;

/// Resolves localization keys (`errors.net_err`) to display strings.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;

    /// The locale strings are resolved in.
    fn locale(&self) -> &str;
}
