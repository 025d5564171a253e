//! Locale runtime settings.
//!
//! # Design
//! - Defaults apply when a variable is unset; a set but invalid value is an error.
//! - Environment access goes through a lookup closure so tests stay hermetic.

use crate::error::{I18nError, I18nResult};
use crate::locale::{DEFAULT_LOCALE, LocaleCode};

/// Environment variable selecting the fallback locale.
pub const ENV_DEFAULT_LOCALE: &str = "LECTERN_DEFAULT_LOCALE";
/// Environment variable naming the storage key prefix.
pub const ENV_APP_NAMESPACE: &str = "LECTERN_APP_NAMESPACE";
/// Environment variable toggling missing-key warnings.
pub const ENV_WARN_MISSING: &str = "LECTERN_WARN_MISSING";

/// Storage key prefix used when none is configured.
pub const DEFAULT_APP_NAMESPACE: &str = "lectern";

/// Settings shared by the locale manager and translators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct I18nSettings {
    /// Locale used when storage holds nothing valid.
    pub default_locale: LocaleCode,
    /// Prefix of the durable storage key.
    pub app_namespace: String,
    /// Emit a warning for every missing translation.
    pub warn_on_missing: bool,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE,
            app_namespace: DEFAULT_APP_NAMESPACE.to_string(),
            warn_on_missing: cfg!(debug_assertions),
        }
    }
}

impl I18nSettings {
    /// Durable storage key holding the active locale code.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}:locale", self.app_namespace)
    }

    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> I18nResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> I18nResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(ENV_DEFAULT_LOCALE) {
            settings.default_locale =
                LocaleCode::parse(value.trim()).ok_or_else(|| I18nError::InvalidSetting {
                    field: ENV_DEFAULT_LOCALE,
                    value: value.clone(),
                    reason: "unsupported_locale",
                })?;
        }

        if let Some(value) = lookup(ENV_APP_NAMESPACE) {
            let trimmed = value.trim();
            if trimmed.is_empty() || trimmed.contains(':') {
                return Err(I18nError::InvalidSetting {
                    field: ENV_APP_NAMESPACE,
                    value,
                    reason: "invalid_namespace",
                });
            }
            settings.app_namespace = trimmed.to_string();
        }

        if let Some(value) = lookup(ENV_WARN_MISSING) {
            settings.warn_on_missing =
                parse_bool(&value).ok_or_else(|| I18nError::InvalidSetting {
                    field: ENV_WARN_MISSING,
                    value: value.clone(),
                    reason: "expected_bool",
                })?;
        }

        Ok(settings)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() -> I18nResult<()> {
        let settings = I18nSettings::from_lookup(lookup_from(&[]))?;
        assert_eq!(settings, I18nSettings::default());
        assert_eq!(settings.storage_key(), "lectern:locale");
        Ok(())
    }

    #[test]
    fn values_override_defaults() -> I18nResult<()> {
        let settings = I18nSettings::from_lookup(lookup_from(&[
            (ENV_DEFAULT_LOCALE, "vi"),
            (ENV_APP_NAMESPACE, " open-notebook "),
            (ENV_WARN_MISSING, "off"),
        ]))?;
        assert_eq!(settings.default_locale, LocaleCode::Vi);
        assert_eq!(settings.storage_key(), "open-notebook:locale");
        assert!(!settings.warn_on_missing);
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        let locale = I18nSettings::from_lookup(lookup_from(&[(ENV_DEFAULT_LOCALE, "xx")]));
        assert!(matches!(
            locale,
            Err(I18nError::InvalidSetting {
                field: ENV_DEFAULT_LOCALE,
                reason: "unsupported_locale",
                ..
            })
        ));

        let namespace = I18nSettings::from_lookup(lookup_from(&[(ENV_APP_NAMESPACE, "a:b")]));
        assert!(matches!(
            namespace,
            Err(I18nError::InvalidSetting {
                reason: "invalid_namespace",
                ..
            })
        ));

        let warn = I18nSettings::from_lookup(lookup_from(&[(ENV_WARN_MISSING, "maybe")]));
        assert!(matches!(
            warn,
            Err(I18nError::InvalidSetting {
                reason: "expected_bool",
                ..
            })
        ));
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for value in ["1", "true", "YES", " on "] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["0", "False", "no", "OFF"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        assert_eq!(parse_bool(""), None);
    }
}
