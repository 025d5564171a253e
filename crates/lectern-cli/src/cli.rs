//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lectern_i18n::LocaleCode;
use lectern_telemetry::{LogFormat, LoggingConfig, build_sha, init_logging};
use tracing::debug;

use crate::commands::catalog::{handle_audit, handle_keys, handle_lookup};
use crate::commands::locale::{handle_get, handle_locales, handle_set};
use crate::context::{AppContext, CliError, CliResult, CommandOutput};

const DEFAULT_STATE_FILE: &str = ".lectern/preferences.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command, and prints its
/// output. Returns the process exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    let command_name = command_label(&cli.command);

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&logging) {
        let err = CliError::failure(err);
        eprintln!("error: {}", err.display_message());
        return err.exit_code();
    }

    let result = AppContext::from_cli(&cli).and_then(|ctx| dispatch(&cli.command, &ctx));
    let exit_code = match result {
        Ok(output) => {
            println!("{}", output.text);
            output.exit_code
        }
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    };
    debug!(
        command = command_name,
        exit_code,
        build_sha = build_sha(),
        "command finished"
    );
    exit_code
}

pub(crate) fn dispatch(command: &Command, ctx: &AppContext) -> CliResult<CommandOutput> {
    match command {
        Command::Locales => handle_locales(ctx),
        Command::Get => handle_get(ctx),
        Command::Set(args) => handle_set(ctx, args),
        Command::Lookup(args) => handle_lookup(ctx, args),
        Command::Keys(args) => handle_keys(ctx, args),
        Command::Audit => handle_audit(ctx),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "lectern",
    about = "Inspect Lectern message catalogs and manage the persisted locale"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "LECTERN_STATE_FILE",
        default_value = DEFAULT_STATE_FILE,
        help = "JSON file holding persisted preferences"
    )]
    pub(crate) state_file: PathBuf,
    #[arg(
        long,
        global = true,
        env = "LECTERN_CATALOG_DIR",
        help = "Directory of <locale>.json catalogs to use instead of the bundled ones"
    )]
    pub(crate) catalog_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "LECTERN_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "LECTERN_LOG_FORMAT",
        value_parser = parse_log_format,
        default_value_t = LogFormat::infer(),
        help = "Log output format (json, pretty); defaults to pretty in debug builds"
    )]
    pub(crate) log_format: LogFormat,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List supported locales and mark the active one.
    Locales,
    /// Show the active locale.
    Get,
    /// Change and persist the active locale.
    Set(SetArgs),
    /// Resolve a translation key against the active locale.
    Lookup(LookupArgs),
    /// List every key in a locale's catalog.
    Keys(KeysArgs),
    /// Report keys missing from any locale; exits 1 when gaps exist.
    Audit,
}

#[derive(Debug, Args)]
pub(crate) struct SetArgs {
    #[arg(help = "Locale code (en, vi)")]
    pub(crate) locale: String,
}

#[derive(Debug, Args)]
pub(crate) struct LookupArgs {
    #[arg(help = "Dotted key, relative to --namespace when given")]
    pub(crate) key: String,
    #[arg(long, help = "Prefix applied to the key")]
    pub(crate) namespace: Option<String>,
    #[arg(long, help = "Text returned when the key does not resolve")]
    pub(crate) fallback: Option<String>,
    #[arg(
        long = "arg",
        value_parser = parse_placeholder,
        help = "Placeholder substitution as name=value; repeatable"
    )]
    pub(crate) args: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub(crate) struct KeysArgs {
    #[arg(long, value_parser = parse_locale, help = "Catalog to list (defaults to the active locale)")]
    pub(crate) locale: Option<LocaleCode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub(crate) const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Locales => "locales",
        Command::Get => "get",
        Command::Set(_) => "set",
        Command::Lookup(_) => "lookup",
        Command::Keys(_) => "keys",
        Command::Audit => "audit",
    }
}

pub(crate) fn supported_locales() -> String {
    LocaleCode::all().map(LocaleCode::code).join(", ")
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    LogFormat::parse(input).ok_or_else(|| format!("unknown log format '{input}' (json, pretty)"))
}

fn parse_locale(input: &str) -> Result<LocaleCode, String> {
    LocaleCode::parse(input).ok_or_else(|| {
        format!(
            "unsupported locale '{input}' (supported: {})",
            supported_locales()
        )
    })
}

fn parse_placeholder(input: &str) -> Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{input}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lookup_with_placeholders() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "lectern",
            "lookup",
            "dialogTitle",
            "--namespace",
            "models.addModel",
            "--arg",
            "type=Embedding",
            "--arg",
            "count=a=b",
            "--output",
            "json",
        ])?;
        assert_eq!(cli.output, OutputFormat::Json);
        let Command::Lookup(args) = cli.command else {
            panic!("expected lookup command");
        };
        assert_eq!(args.key, "dialogTitle");
        assert_eq!(args.namespace.as_deref(), Some("models.addModel"));
        assert_eq!(
            args.args,
            vec![
                ("type".to_string(), "Embedding".to_string()),
                ("count".to_string(), "a=b".to_string())
            ]
        );
        Ok(())
    }

    #[test]
    fn global_flags_apply_after_subcommand() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "lectern",
            "get",
            "--state-file",
            "/tmp/prefs.json",
            "--log-format",
            "JSON",
            "--format",
            "json",
        ])?;
        assert_eq!(cli.state_file, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.catalog_dir.is_none());
        Ok(())
    }

    #[test]
    fn log_format_defaults_to_build_inference() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["lectern", "locales"])?;
        if std::env::var_os("LECTERN_LOG_FORMAT").is_none() {
            assert_eq!(cli.log_format, LogFormat::infer());
        }
        Ok(())
    }

    #[test]
    fn rejects_bad_flag_values() {
        assert!(Cli::try_parse_from(["lectern", "keys", "--locale", "fr"]).is_err());
        assert!(Cli::try_parse_from(["lectern", "get", "--log-format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["lectern", "lookup", "k", "--arg", "=v"]).is_err());
        assert!(Cli::try_parse_from(["lectern", "lookup", "k", "--arg", "novalue"]).is_err());
    }

    #[test]
    fn parse_helpers_report_context() {
        assert_eq!(parse_locale("vi"), Ok(LocaleCode::Vi));
        assert_eq!(
            parse_locale("EN"),
            Err("unsupported locale 'EN' (supported: en, vi)".to_string())
        );
        assert_eq!(
            parse_placeholder(" name =Ada"),
            Ok(("name".to_string(), "Ada".to_string()))
        );
        assert_eq!(parse_log_format("pretty"), Ok(LogFormat::Pretty));
    }

    #[test]
    fn command_label_matches_variants() {
        assert_eq!(command_label(&Command::Audit), "audit");
        assert_eq!(
            command_label(&Command::Set(SetArgs {
                locale: "vi".to_string()
            })),
            "set"
        );
        assert_eq!(
            command_label(&Command::Keys(KeysArgs { locale: None })),
            "keys"
        );
    }
}
