//! Shared locale context, command outcomes, and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use lectern_i18n::{
    FileStorage, I18n, I18nError, I18nSettings, LocaleManager, MessageStore, NoopMirror,
};
use tracing::debug;

use crate::cli::{Cli, OutputFormat};

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Rendered command output plus the exit code it should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandOutput {
    pub(crate) text: String,
    pub(crate) exit_code: i32,
}

impl CommandOutput {
    pub(crate) const fn success(text: String) -> Self {
        Self { text, exit_code: 0 }
    }

    /// Output for a check that ran but found problems.
    pub(crate) const fn findings(text: String) -> Self {
        Self { text, exit_code: 1 }
    }
}

/// Application context passed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) i18n: I18n,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Build the locale context from environment settings and CLI flags.
    pub(crate) fn from_cli(cli: &Cli) -> CliResult<Self> {
        let settings = I18nSettings::from_env().map_err(settings_error)?;
        let store = cli
            .catalog_dir
            .as_deref()
            .map_or_else(|| Ok(MessageStore::bundled().clone()), load_catalogs)?;
        debug!(
            state_file = %cli.state_file.display(),
            storage_key = %settings.storage_key(),
            "locale context ready"
        );

        let manager = LocaleManager::new(&settings, FileStorage::new(&cli.state_file), NoopMirror);
        Ok(Self {
            i18n: I18n::new(store, manager, &settings),
            output: cli.output,
        })
    }
}

fn load_catalogs(dir: &Path) -> CliResult<MessageStore> {
    MessageStore::from_dir(dir).map_err(|err| {
        let context = format!("failed to load catalogs from {}", dir.display());
        CliError::failure(anyhow::Error::new(err).context(context))
    })
}

fn settings_error(err: I18nError) -> CliError {
    match err {
        I18nError::InvalidSetting {
            field,
            value,
            reason,
        } => CliError::validation(format!("{field}={value:?} is invalid ({reason})")),
        other => CliError::failure(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use lectern_i18n::LocaleCode;

    #[test]
    fn exit_codes_follow_error_kind() {
        let validation = CliError::validation("bad flag");
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(validation.display_message(), "bad flag");

        let failure = CliError::failure(anyhow!("disk full").context("writing state"));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.display_message(), "writing state: disk full");
        assert_eq!(failure.to_string(), "cli error");
    }

    #[test]
    fn invalid_settings_become_validation_errors() {
        let err = settings_error(I18nError::InvalidSetting {
            field: "LECTERN_DEFAULT_LOCALE",
            value: "fr".to_string(),
            reason: "unsupported_locale",
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.display_message(),
            "LECTERN_DEFAULT_LOCALE=\"fr\" is invalid (unsupported_locale)"
        );
    }

    #[test]
    fn unreadable_catalog_dir_is_a_failure() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("en.json"), "{}")?;
        let Err(err) = load_catalogs(dir.path()) else {
            panic!("expected missing vi catalog");
        };
        assert_eq!(err.exit_code(), 3);
        assert!(
            err.display_message()
                .starts_with("failed to load catalogs from "),
            "{}",
            err.display_message()
        );
        Ok(())
    }

    #[test]
    fn default_context_shares_bundled_catalogs() -> Result<(), Box<dyn std::error::Error>> {
        use clap::Parser;

        let dir = tempfile::tempdir()?;
        let state = dir.path().join("preferences.json");
        let state = state.to_str().ok_or("non-utf8 temp path")?;
        let cli = Cli::try_parse_from(["lectern", "get", "--state-file", state])?;
        if cli.catalog_dir.is_some() {
            return Ok(());
        }
        let ctx = AppContext::from_cli(&cli).map_err(|err| err.display_message())?;
        for locale in LocaleCode::all() {
            assert!(std::ptr::eq(
                ctx.i18n.store().tree(locale),
                MessageStore::bundled().tree(locale)
            ));
        }
        Ok(())
    }

    #[test]
    fn findings_exit_non_zero() {
        assert_eq!(CommandOutput::success(String::new()).exit_code, 0);
        assert_eq!(CommandOutput::findings(String::new()).exit_code, 1);
    }
}
