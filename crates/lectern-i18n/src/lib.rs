#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Locale runtime for the Lectern dashboard.
//!
//! Layout: `locale.rs` (supported locales), `tree.rs` + `catalog.rs` (message
//! trees and per-locale stores), `resolve.rs` (dotted-key lookup), `state.rs`
//! (active locale, persistence, subscriptions), `translator.rs` (view-facing
//! lookups), `storage.rs` + `mirror.rs` (host seams), `settings.rs`, `audit.rs`.

pub mod audit;
pub mod catalog;
pub mod error;
pub mod locale;
pub mod mirror;
pub mod resolve;
pub mod settings;
pub mod state;
pub mod storage;
pub mod translator;
pub mod tree;

pub use audit::{CompletenessReport, audit};
pub use catalog::MessageStore;
pub use error::{I18nError, I18nResult, StorageError};
pub use locale::{DEFAULT_LOCALE, LocaleCode};
#[cfg(target_arch = "wasm32")]
pub use mirror::DocumentLang;
pub use mirror::{LangMirror, NoopMirror};
pub use resolve::resolve;
pub use settings::I18nSettings;
pub use state::{LocaleChange, LocaleManager, LocaleState, Subscription};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage};
pub use translator::{I18n, Translator, interpolate};
pub use tree::MessageTree;
