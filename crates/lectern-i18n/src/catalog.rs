//! Per-locale message catalogs.
//!
//! # Design
//! - A store always holds one tree per supported locale; construction fails otherwise.
//! - Bundled catalogs are compiled in and parsed once on first use.
//! - Trees are read-only after construction; clones share them instead of copying.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use tracing::error;

use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleCode;
use crate::tree::MessageTree;

static EMPTY_TREE: MessageTree = MessageTree::EMPTY;

static BUNDLED: LazyLock<MessageStore> = LazyLock::new(|| {
    MessageStore::try_bundled().unwrap_or_else(|err| {
        error!(error = %err, detail = ?err, "bundled message catalog is corrupt");
        MessageStore::empty()
    })
});

/// Immutable mapping from locale to message tree.
///
/// Cloning is cheap: clones point at the same trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageStore {
    trees: Arc<BTreeMap<LocaleCode, MessageTree>>,
}

impl MessageStore {
    /// Catalogs compiled into the binary.
    #[must_use]
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Parse the compiled-in catalogs, surfacing the first failure.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled catalog is not a valid message tree.
    pub fn try_bundled() -> I18nResult<Self> {
        Self::from_sources(LocaleCode::all().map(|locale| (locale, raw_locale(locale))))
    }

    /// Build a store from JSON sources, one per locale.
    ///
    /// Later entries for the same locale replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a source does not parse, if a root is not an object,
    /// or if a supported locale has no source.
    pub fn from_sources<'a, I>(sources: I) -> I18nResult<Self>
    where
        I: IntoIterator<Item = (LocaleCode, &'a str)>,
    {
        let mut trees = BTreeMap::new();
        for (locale, raw) in sources {
            trees.insert(locale, parse_tree(locale, raw)?);
        }
        Self::from_trees(trees)
    }

    /// Load `<code>.json` for every supported locale from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or unreadable, or if it does not parse.
    pub fn from_dir(dir: &Path) -> I18nResult<Self> {
        let mut trees = BTreeMap::new();
        for locale in LocaleCode::all() {
            let path = dir.join(format!("{}.json", locale.code()));
            let raw = fs::read_to_string(&path)
                .map_err(|source| I18nError::CatalogRead { path, source })?;
            trees.insert(locale, parse_tree(locale, &raw)?);
        }
        Self::from_trees(trees)
    }

    /// Assemble a store from already-built trees.
    ///
    /// # Errors
    ///
    /// Returns an error if a supported locale has no tree.
    pub fn from_trees(trees: BTreeMap<LocaleCode, MessageTree>) -> I18nResult<Self> {
        if let Some(locale) = LocaleCode::all()
            .into_iter()
            .find(|locale| !trees.contains_key(locale))
        {
            return Err(I18nError::MissingCatalog { locale });
        }
        Ok(Self {
            trees: Arc::new(trees),
        })
    }

    fn empty() -> Self {
        Self {
            trees: Arc::new(
                LocaleCode::all()
                    .into_iter()
                    .map(|locale| (locale, MessageTree::EMPTY))
                    .collect(),
            ),
        }
    }

    /// Message tree for `locale`.
    #[must_use]
    pub fn tree(&self, locale: LocaleCode) -> &MessageTree {
        self.trees.get(&locale).unwrap_or(&EMPTY_TREE)
    }

    /// Locales and their trees in code order.
    pub fn iter(&self) -> impl Iterator<Item = (LocaleCode, &MessageTree)> {
        self.trees.iter().map(|(locale, tree)| (*locale, tree))
    }
}

fn parse_tree(locale: LocaleCode, raw: &str) -> I18nResult<MessageTree> {
    let tree: MessageTree = serde_json::from_str(raw)
        .map_err(|source| I18nError::CatalogParse { locale, source })?;
    if tree.is_leaf() {
        return Err(I18nError::CatalogRootNotBranch { locale });
    }
    Ok(tree)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../i18n/en.json"),
        LocaleCode::Vi => include_str!("../i18n/vi.json"),
    }
}
