//! Cross-locale catalog completeness.
//!
//! Lookups tolerate gaps at runtime; this check exists so tests and tooling can
//! catch a key that was added to one catalog and forgotten in another.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::MessageStore;
use crate::locale::LocaleCode;

/// Keys each locale lacks relative to the union of all catalogs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletenessReport {
    /// Distinct leaf keys across every locale.
    pub total_keys: usize,
    /// Per-locale missing keys, sorted. Locales with no gaps are omitted.
    pub missing: BTreeMap<LocaleCode, Vec<String>>,
}

impl CompletenessReport {
    /// Whether every locale carries every key.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Missing keys for `locale`; empty when it is complete.
    #[must_use]
    pub fn missing_for(&self, locale: LocaleCode) -> &[String] {
        self.missing
            .get(&locale)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Compare the leaf keys of every catalog in `store`.
#[must_use]
pub fn audit(store: &MessageStore) -> CompletenessReport {
    let per_locale: Vec<(LocaleCode, BTreeSet<String>)> = store
        .iter()
        .map(|(locale, tree)| (locale, tree.leaf_paths()))
        .collect();
    let union: BTreeSet<&String> = per_locale.iter().flat_map(|(_, keys)| keys).collect();

    let missing = per_locale
        .iter()
        .filter_map(|(locale, keys)| {
            let absent: Vec<String> = union
                .iter()
                .filter(|key| !keys.contains(key.as_str()))
                .map(|key| (*key).clone())
                .collect();
            (!absent.is_empty()).then_some((*locale, absent))
        })
        .collect();

    CompletenessReport {
        total_keys: union.len(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::I18nResult;

    #[test]
    fn bundled_catalogs_are_complete() {
        let report = audit(MessageStore::bundled());
        assert!(report.is_complete(), "missing keys: {:?}", report.missing);
        assert!(report.total_keys > 100);
    }

    #[test]
    fn reports_keys_absent_from_each_locale() -> I18nResult<()> {
        let store = MessageStore::from_sources([
            (
                LocaleCode::En,
                r#"{"greeting": {"hello": "Hello", "bye": "Bye"}}"#,
            ),
            (
                LocaleCode::Vi,
                r#"{"greeting": {"hello": "Xin chào"}, "title": "Lectern"}"#,
            ),
        ])?;
        let report = audit(&store);

        assert!(!report.is_complete());
        assert_eq!(report.total_keys, 3);
        assert_eq!(report.missing_for(LocaleCode::En), ["title".to_string()]);
        assert_eq!(report.missing_for(LocaleCode::Vi), ["greeting.bye".to_string()]);
        Ok(())
    }

    #[test]
    fn branch_versus_leaf_conflicts_count_as_missing() -> I18nResult<()> {
        let store = MessageStore::from_sources([
            (LocaleCode::En, r#"{"status": {"ok": "OK"}}"#),
            (LocaleCode::Vi, r#"{"status": "Trạng thái"}"#),
        ])?;
        let report = audit(&store);
        assert_eq!(report.missing_for(LocaleCode::En), ["status".to_string()]);
        assert_eq!(report.missing_for(LocaleCode::Vi), ["status.ok".to_string()]);
        Ok(())
    }

    #[test]
    fn report_serializes_with_locale_codes() -> Result<(), Box<dyn std::error::Error>> {
        let store = MessageStore::from_sources([
            (LocaleCode::En, r#"{"a": "A"}"#),
            (LocaleCode::Vi, "{}"),
        ])?;
        let json = serde_json::to_value(audit(&store))?;
        assert_eq!(json["total_keys"], 1);
        assert_eq!(json["missing"]["vi"][0], "a");
        Ok(())
    }
}
