use lectern_i18n::{LocaleChange, LocaleCode};

use crate::cli::{SetArgs, supported_locales};
use crate::context::{AppContext, CliError, CliResult, CommandOutput};
use crate::output::{LocaleRow, render_active, render_change, render_locales};

pub(crate) fn handle_locales(ctx: &AppContext) -> CliResult<CommandOutput> {
    let active = ctx.i18n.locale();
    let rows: Vec<LocaleRow> = LocaleCode::all()
        .into_iter()
        .map(|code| LocaleRow {
            code,
            label: code.label(),
            active: code == active,
        })
        .collect();
    render_locales(&rows, ctx.output).map(CommandOutput::success)
}

pub(crate) fn handle_get(ctx: &AppContext) -> CliResult<CommandOutput> {
    let manager = ctx.i18n.manager();
    render_active(manager.locale(), manager.storage_key(), ctx.output).map(CommandOutput::success)
}

pub(crate) fn handle_set(ctx: &AppContext, args: &SetArgs) -> CliResult<CommandOutput> {
    match ctx.i18n.request_locale(&args.locale) {
        LocaleChange::Rejected => Err(CliError::validation(format!(
            "unsupported locale '{}' (supported: {})",
            args.locale,
            supported_locales()
        ))),
        change => render_change(change, ctx.output).map(CommandOutput::success),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::commands::test_support::context;

    fn set(ctx: &AppContext, locale: &str) -> CliResult<CommandOutput> {
        handle_set(
            ctx,
            &SetArgs {
                locale: locale.to_string(),
            },
        )
    }

    #[test]
    fn set_persists_across_invocations() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let state = dir.path().join("state").join("preferences.json");

        let first = context(&state, OutputFormat::Table);
        let output = set(&first, "vi").map_err(|err| err.display_message())?;
        assert_eq!(output.text, "locale changed: en -> vi");
        assert_eq!(output.exit_code, 0);

        let second = context(&state, OutputFormat::Table);
        let active = handle_get(&second).map_err(|err| err.display_message())?;
        assert_eq!(active.text, "vi (Tiếng Việt)");

        let again = set(&second, "vi").map_err(|err| err.display_message())?;
        assert_eq!(again.text, "locale already vi");

        let stored: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&state)?)?;
        assert_eq!(stored["lectern:locale"], "vi");
        Ok(())
    }

    #[test]
    fn unsupported_locale_is_a_validation_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let ctx = context(&dir.path().join("preferences.json"), OutputFormat::Table);

        let Err(err) = set(&ctx, "en-US") else {
            panic!("expected rejection");
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.display_message(),
            "unsupported locale 'en-US' (supported: en, vi)"
        );
        assert_eq!(ctx.i18n.locale(), LocaleCode::En);
        Ok(())
    }

    #[test]
    fn locales_json_reports_active_flag() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let ctx = context(&dir.path().join("preferences.json"), OutputFormat::Json);
        let _ = ctx.i18n.set_locale(LocaleCode::Vi);

        let output = handle_locales(&ctx).map_err(|err| err.display_message())?;
        let rows: serde_json::Value = serde_json::from_str(&output.text)?;
        assert_eq!(rows[0]["code"], "en");
        assert_eq!(rows[0]["active"], false);
        assert_eq!(rows[1]["label"], "Tiếng Việt");
        assert_eq!(rows[1]["active"], true);

        let active = handle_get(&ctx).map_err(|err| err.display_message())?;
        let active: serde_json::Value = serde_json::from_str(&active.text)?;
        assert_eq!(active["locale"], "vi");
        assert_eq!(active["storage_key"], "lectern:locale");
        Ok(())
    }
}
