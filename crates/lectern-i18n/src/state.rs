//! Active locale state with durable persistence and change notification.
//!
//! # Design
//! - One manager per session owns the active locale; it is the only writer.
//! - Initialisation is lazy: the first read resolves the persisted value or the default.
//! - Accepted changes persist, mirror, and notify subscribers before `set_locale` returns.
//! - Handles are `Rc`-backed; the runtime is single-threaded like the UI event loop.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::locale::LocaleCode;
use crate::mirror::LangMirror;
use crate::settings::I18nSettings;
use crate::storage::PreferenceStorage;

type Listener = Rc<dyn Fn(LocaleCode)>;

/// Lifecycle of the active locale cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaleState {
    /// Nothing has read the locale yet.
    Uninitialized,
    /// Locale resolved and active.
    Ready(LocaleCode),
}

/// Outcome of a locale change request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaleChange {
    /// The active locale moved.
    Changed {
        /// Locale before the change.
        from: LocaleCode,
        /// Locale after the change.
        to: LocaleCode,
    },
    /// The candidate was already active; nothing happened.
    Unchanged(LocaleCode),
    /// The candidate was not a supported locale; nothing happened.
    Rejected,
}

impl LocaleChange {
    /// Whether the request moved the active locale.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Shared handle to the session's active locale.
#[derive(Clone)]
pub struct LocaleManager {
    inner: Rc<ManagerInner>,
}

struct ManagerInner {
    state: Cell<LocaleState>,
    default_locale: LocaleCode,
    storage_key: String,
    storage: Box<dyn PreferenceStorage>,
    mirror: Box<dyn LangMirror>,
    listeners: RefCell<BTreeMap<u64, Listener>>,
    next_listener: Cell<u64>,
}

impl LocaleManager {
    /// Create an uninitialised manager.
    pub fn new<S, M>(settings: &I18nSettings, storage: S, mirror: M) -> Self
    where
        S: PreferenceStorage + 'static,
        M: LangMirror + 'static,
    {
        Self {
            inner: Rc::new(ManagerInner {
                state: Cell::new(LocaleState::Uninitialized),
                default_locale: settings.default_locale,
                storage_key: settings.storage_key(),
                storage: Box::new(storage),
                mirror: Box::new(mirror),
                listeners: RefCell::new(BTreeMap::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Current lifecycle state without triggering initialisation.
    #[must_use]
    pub fn state(&self) -> LocaleState {
        self.inner.state.get()
    }

    /// Active locale, initialising from storage on first use.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        match self.inner.state.get() {
            LocaleState::Ready(locale) => locale,
            LocaleState::Uninitialized => self.initialize(),
        }
    }

    /// Durable storage key holding the locale code.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    /// Locale used when storage holds nothing valid.
    #[must_use]
    pub fn default_locale(&self) -> LocaleCode {
        self.inner.default_locale
    }

    /// Switch to `next`, persisting and notifying subscribers when it differs.
    #[must_use]
    pub fn set_locale(&self, next: LocaleCode) -> LocaleChange {
        let current = self.locale();
        if current == next {
            return LocaleChange::Unchanged(current);
        }

        self.inner.state.set(LocaleState::Ready(next));
        self.persist(next);
        self.inner.mirror.apply_lang(next.code());
        info!(from = %current, to = %next, "active locale changed");
        self.notify(next);

        LocaleChange::Changed {
            from: current,
            to: next,
        }
    }

    /// Switch to the locale named by `candidate`; unsupported values are ignored.
    #[must_use]
    pub fn request_locale(&self, candidate: &str) -> LocaleChange {
        LocaleCode::parse(candidate).map_or_else(
            || {
                debug!(candidate, "ignoring unsupported locale");
                LocaleChange::Rejected
            },
            |locale| self.set_locale(locale),
        )
    }

    /// Register `listener` for accepted locale changes until the returned guard drops.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(LocaleCode) + 'static,
    {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(listener));
        Subscription {
            manager: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn initialize(&self) -> LocaleCode {
        let stored = self.inner.storage.read(&self.inner.storage_key);
        let locale = match stored.as_deref().map(|value| (value, LocaleCode::parse(value))) {
            Some((_, Some(locale))) => locale,
            Some((value, None)) => {
                debug!(
                    stored = value,
                    default = %self.inner.default_locale,
                    "persisted locale unsupported; using default"
                );
                self.inner.default_locale
            }
            None => self.inner.default_locale,
        };

        self.inner.state.set(LocaleState::Ready(locale));
        self.persist(locale);
        self.inner.mirror.apply_lang(locale.code());
        debug!(locale = %locale, key = %self.inner.storage_key, "locale initialised");
        locale
    }

    fn persist(&self, locale: LocaleCode) {
        if let Err(err) = self
            .inner
            .storage
            .write(&self.inner.storage_key, locale.code())
        {
            warn!(
                key = %self.inner.storage_key,
                locale = %locale,
                error = %err,
                detail = ?err,
                "failed to persist locale"
            );
        }
    }

    /// Stops early once a listener switches the locale again; the nested change
    /// has already notified everyone with the newer value.
    fn notify(&self, locale: LocaleCode) {
        let listeners: Vec<Listener> = self.inner.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            if self.inner.state.get() != LocaleState::Ready(locale) {
                debug!(locale = %locale, "notification superseded by a nested change");
                break;
            }
            listener(locale);
        }
    }
}

impl Debug for LocaleManager {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LocaleManager")
            .field("state", &self.inner.state.get())
            .field("default_locale", &self.inner.default_locale)
            .field("storage_key", &self.inner.storage_key)
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Guard for a locale-change listener; dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    manager: Weak<ManagerInner>,
    id: u64,
}

impl Debug for Subscription {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.manager.upgrade() {
            inner.listeners.borrow_mut().remove(&self.id);
        }
    }
}
