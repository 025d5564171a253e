//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use lectern_i18n::{CompletenessReport, LocaleChange, LocaleCode};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

#[derive(Debug, Serialize)]
pub(crate) struct LocaleRow {
    pub(crate) code: LocaleCode,
    pub(crate) label: &'static str,
    pub(crate) active: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct LookupView<'a> {
    pub(crate) key: &'a str,
    pub(crate) locale: LocaleCode,
    pub(crate) found: bool,
    pub(crate) text: &'a str,
}

#[derive(Serialize)]
struct ActiveView<'a> {
    locale: LocaleCode,
    label: &'static str,
    storage_key: &'a str,
}

#[derive(Serialize)]
struct ChangeView {
    previous: LocaleCode,
    active: LocaleCode,
    changed: bool,
}

#[derive(Serialize)]
struct KeysView<'a> {
    locale: LocaleCode,
    keys: &'a [String],
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

pub(crate) fn render_locales(rows: &[LocaleRow], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(rows),
        OutputFormat::Table => {
            let mut lines = vec![format!("{:<6} {:<12} ACTIVE", "CODE", "LABEL")];
            lines.extend(rows.iter().map(|row| {
                let marker = if row.active { "*" } else { "" };
                format!("{:<6} {:<12} {marker}", row.code, row.label)
                    .trim_end()
                    .to_string()
            }));
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_active(
    locale: LocaleCode,
    storage_key: &str,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&ActiveView {
            locale,
            label: locale.label(),
            storage_key,
        }),
        OutputFormat::Table => Ok(format!("{locale} ({})", locale.label())),
    }
}

/// Render an accepted or no-op change; rejected requests never reach here.
pub(crate) fn render_change(change: LocaleChange, format: OutputFormat) -> CliResult<String> {
    let (previous, active) = match change {
        LocaleChange::Changed { from, to } => (from, to),
        LocaleChange::Unchanged(locale) => (locale, locale),
        LocaleChange::Rejected => {
            return Err(CliError::failure(anyhow!(
                "rejected locale change cannot be rendered"
            )));
        }
    };
    match format {
        OutputFormat::Json => to_json(&ChangeView {
            previous,
            active,
            changed: change.is_changed(),
        }),
        OutputFormat::Table if change.is_changed() => {
            Ok(format!("locale changed: {previous} -> {active}"))
        }
        OutputFormat::Table => Ok(format!("locale already {active}")),
    }
}

pub(crate) fn render_lookup(view: &LookupView<'_>, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(view),
        OutputFormat::Table => Ok(view.text.to_string()),
    }
}

pub(crate) fn render_keys(
    locale: LocaleCode,
    keys: &[String],
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&KeysView { locale, keys }),
        OutputFormat::Table => Ok(keys.join("\n")),
    }
}

pub(crate) fn render_audit(report: &CompletenessReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Table => {
            let mut lines = vec![format!("keys: {}", report.total_keys)];
            if report.is_complete() {
                lines.push("all locales complete".to_string());
            }
            for (locale, missing) in &report.missing {
                lines.push(format!("{locale}: {} missing", missing.len()));
                lines.extend(missing.iter().map(|key| format!("  {key}")));
            }
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn locale_table_marks_active_row() -> Result<(), Box<dyn std::error::Error>> {
        let rows = [
            LocaleRow {
                code: LocaleCode::En,
                label: LocaleCode::En.label(),
                active: false,
            },
            LocaleRow {
                code: LocaleCode::Vi,
                label: LocaleCode::Vi.label(),
                active: true,
            },
        ];
        let table = render_locales(&rows, OutputFormat::Table).map_err(|err| err.display_message())?;
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "CODE   LABEL        ACTIVE");
        assert_eq!(lines[1], "en     English");
        assert_eq!(lines[2], "vi     Tiếng Việt   *");

        let json = render_locales(&rows, OutputFormat::Json).map_err(|err| err.display_message())?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value[1]["code"], "vi");
        assert_eq!(value[1]["active"], true);
        Ok(())
    }

    #[test]
    fn change_rendering_distinguishes_no_ops() -> Result<(), String> {
        let changed = LocaleChange::Changed {
            from: LocaleCode::En,
            to: LocaleCode::Vi,
        };
        assert_eq!(
            render_change(changed, OutputFormat::Table).map_err(|err| err.display_message())?,
            "locale changed: en -> vi"
        );
        assert_eq!(
            render_change(LocaleChange::Unchanged(LocaleCode::Vi), OutputFormat::Table)
                .map_err(|err| err.display_message())?,
            "locale already vi"
        );
        assert!(render_change(LocaleChange::Rejected, OutputFormat::Json).is_err());
        Ok(())
    }

    #[test]
    fn audit_table_lists_gaps_per_locale() -> Result<(), String> {
        let report = CompletenessReport {
            total_keys: 3,
            missing: BTreeMap::from([(
                LocaleCode::Vi,
                vec!["greeting.bye".to_string(), "title".to_string()],
            )]),
        };
        let table = render_audit(&report, OutputFormat::Table).map_err(|err| err.display_message())?;
        assert_eq!(table, "keys: 3\nvi: 2 missing\n  greeting.bye\n  title");

        let complete = CompletenessReport {
            total_keys: 1,
            missing: BTreeMap::new(),
        };
        assert_eq!(
            render_audit(&complete, OutputFormat::Table).map_err(|err| err.display_message())?,
            "keys: 1\nall locales complete"
        );
        Ok(())
    }
}
