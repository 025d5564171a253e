//! Supported locale identifiers.
//!
//! # Design
//! - The set is closed; anything outside it is rejected rather than coerced.
//! - Codes are matched exactly so persisted values round-trip unchanged.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// Locales with a bundled message catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// Vietnamese.
    Vi,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Vi]
    }

    /// Canonical tag written to storage and the document `lang` attribute.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }

    /// Native display name for language pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Vi => "Tiếng Việt",
        }
    }

    /// Match a candidate against the supported set. Only exact codes are accepted.
    #[must_use]
    pub fn parse(candidate: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|locale| locale.code() == candidate)
    }
}

impl Display for LocaleCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.pad(self.code())
    }
}

impl FromStr for LocaleCode {
    type Err = I18nError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| I18nError::UnsupportedLocale {
            value: value.to_string(),
        })
    }
}

/// Locale used when nothing valid has been persisted.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;
