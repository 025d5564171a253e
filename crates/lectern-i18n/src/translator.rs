//! View-facing translation lookups.
//!
//! # Design
//! - `I18n` is the context object handed to views: catalogs plus the locale manager.
//! - Translators read the active locale on every call; nothing is cached per locale.
//! - Misses never fail: they log a diagnostic and fall back to caller text or the key.

use tracing::warn;

use crate::catalog::MessageStore;
use crate::locale::LocaleCode;
use crate::mirror::LangMirror;
use crate::resolve::resolve;
use crate::settings::I18nSettings;
use crate::state::{LocaleChange, LocaleManager, Subscription};
use crate::storage::PreferenceStorage;
use crate::tree::MessageTree;

/// Catalogs and active locale shared by every view in a session.
#[derive(Clone, Debug)]
pub struct I18n {
    store: MessageStore,
    manager: LocaleManager,
    warn_on_missing: bool,
}

impl I18n {
    /// Combine a catalog store with a locale manager.
    #[must_use]
    pub const fn new(store: MessageStore, manager: LocaleManager, settings: &I18nSettings) -> Self {
        Self {
            store,
            manager,
            warn_on_missing: settings.warn_on_missing,
        }
    }

    /// Context over the compiled-in catalogs with a fresh locale manager.
    pub fn bundled<S, M>(settings: &I18nSettings, storage: S, mirror: M) -> Self
    where
        S: PreferenceStorage + 'static,
        M: LangMirror + 'static,
    {
        let manager = LocaleManager::new(settings, storage, mirror);
        Self::new(MessageStore::bundled().clone(), manager, settings)
    }

    /// Locale manager backing this context.
    #[must_use]
    pub const fn manager(&self) -> &LocaleManager {
        &self.manager
    }

    /// Catalogs backing this context.
    #[must_use]
    pub const fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        self.manager.locale()
    }

    /// Forward a change request to the locale manager.
    #[must_use]
    pub fn request_locale(&self, candidate: &str) -> LocaleChange {
        self.manager.request_locale(candidate)
    }

    /// Forward a typed change to the locale manager.
    #[must_use]
    pub fn set_locale(&self, locale: LocaleCode) -> LocaleChange {
        self.manager.set_locale(locale)
    }

    /// Register for locale changes; see [`LocaleManager::subscribe`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(LocaleCode) + 'static,
    {
        self.manager.subscribe(listener)
    }

    /// Whole message tree for the active locale.
    #[must_use]
    pub fn messages(&self) -> &MessageTree {
        self.store.tree(self.manager.locale())
    }

    /// Translator resolving keys from the catalog root.
    #[must_use]
    pub fn translator(&self) -> Translator {
        Translator {
            i18n: self.clone(),
            namespace: None,
        }
    }

    /// Translator that prefixes every key with `namespace`.
    ///
    /// An empty namespace behaves like [`I18n::translator`].
    #[must_use]
    pub fn namespaced(&self, namespace: &str) -> Translator {
        Translator {
            i18n: self.clone(),
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
        }
    }
}

/// Key lookup bound to an optional namespace and the session's active locale.
#[derive(Clone, Debug)]
pub struct Translator {
    i18n: I18n,
    namespace: Option<String>,
}

impl Translator {
    /// Bound namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Active locale at call time.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        self.i18n.locale()
    }

    /// Key after applying the namespace prefix.
    #[must_use]
    pub fn full_key(&self, key: &str) -> String {
        self.namespace
            .as_ref()
            .map_or_else(|| key.to_string(), |namespace| format!("{namespace}.{key}"))
    }

    /// Translator for a namespace nested under this one.
    #[must_use]
    pub fn scoped(&self, namespace: &str) -> Self {
        if namespace.is_empty() {
            return self.clone();
        }
        Self {
            i18n: self.i18n.clone(),
            namespace: Some(self.full_key(namespace)),
        }
    }

    /// Resolve `key` for the active locale, degrading to `fallback` or the full key.
    #[must_use]
    pub fn lookup(&self, key: &str, fallback: Option<&str>) -> String {
        let full_key = self.full_key(key);
        let locale = self.i18n.locale();
        if let Some(text) = resolve(self.i18n.store.tree(locale), &full_key) {
            return text.to_string();
        }

        if self.i18n.warn_on_missing {
            warn!(key = %full_key, locale = %locale, "missing translation");
        }
        fallback.map_or(full_key, str::to_string)
    }

    /// Resolve `key`, degrading to the full key.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.lookup(key, None)
    }

    /// Resolve `key`, degrading to `fallback`.
    #[must_use]
    pub fn t_or(&self, key: &str, fallback: &str) -> String {
        self.lookup(key, Some(fallback))
    }

    /// Resolve `key` and substitute `{name}` placeholders from `args`.
    ///
    /// Placeholders without a matching argument are left as written.
    #[must_use]
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(key), args)
    }
}

/// Substitute `{name}` placeholders in one pass; substituted text is not rescanned.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..=open + 1 + close]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
