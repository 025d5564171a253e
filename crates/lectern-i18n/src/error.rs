//! # Design
//!
//! - Catalog and settings failures are load-time errors with constant messages.
//! - Context travels in fields; sources are preserved without re-logging.
//! - Lookups and locale changes never produce these errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::locale::LocaleCode;

/// Result alias for catalog and settings operations.
pub type I18nResult<T> = Result<T, I18nError>;

/// Errors raised while loading catalogs or settings.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A catalog was not valid message-tree JSON.
    #[error("failed to parse message catalog")]
    CatalogParse {
        /// Locale whose catalog failed to parse.
        locale: LocaleCode,
        /// Source JSON error.
        source: serde_json::Error,
    },
    /// A catalog file could not be read.
    #[error("failed to read message catalog")]
    CatalogRead {
        /// Path that could not be read.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// A supported locale had no catalog.
    #[error("message catalog missing")]
    MissingCatalog {
        /// Locale without a catalog.
        locale: LocaleCode,
    },
    /// A catalog root was a bare string instead of a mapping.
    #[error("message catalog root must be an object")]
    CatalogRootNotBranch {
        /// Locale whose catalog root was a leaf.
        locale: LocaleCode,
    },
    /// A locale string was outside the supported set.
    #[error("unsupported locale")]
    UnsupportedLocale {
        /// Offending value.
        value: String,
    },
    /// A setting carried an invalid value.
    #[error("invalid setting")]
    InvalidSetting {
        /// Setting name (environment variable).
        field: &'static str,
        /// Offending value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Errors raised by durable preference storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("preference storage io failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The backing file did not hold a JSON object of strings.
    #[error("preference storage payload invalid")]
    Serde {
        /// Operation identifier.
        operation: &'static str,
        /// Source JSON error.
        source: serde_json::Error,
    },
    /// The browser refused the storage operation.
    #[error("browser storage unavailable")]
    Browser {
        /// Operation identifier.
        operation: &'static str,
        /// Detail reported by the browser.
        detail: String,
    },
}
