//! Adapters over the `fake` crate.

pub mod catalog;
pub mod locales;

pub use locales::LocaleKey;
