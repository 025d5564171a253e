use lectern_i18n::{audit, interpolate, resolve};
use tracing::info;

use crate::cli::{KeysArgs, LookupArgs};
use crate::context::{AppContext, CliResult, CommandOutput};
use crate::output::{LookupView, render_audit, render_keys, render_lookup};

pub(crate) fn handle_lookup(ctx: &AppContext, args: &LookupArgs) -> CliResult<CommandOutput> {
    let translator = ctx
        .i18n
        .namespaced(args.namespace.as_deref().unwrap_or_default());
    let full_key = translator.full_key(&args.key);
    let found = resolve(ctx.i18n.messages(), &full_key).is_some();

    let placeholders: Vec<(&str, &str)> = args
        .args
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    let text = interpolate(
        &translator.lookup(&args.key, args.fallback.as_deref()),
        &placeholders,
    );

    let view = LookupView {
        key: &full_key,
        locale: translator.locale(),
        found,
        text: &text,
    };
    render_lookup(&view, ctx.output).map(CommandOutput::success)
}

pub(crate) fn handle_keys(ctx: &AppContext, args: &KeysArgs) -> CliResult<CommandOutput> {
    let locale = args.locale.unwrap_or_else(|| ctx.i18n.locale());
    let keys: Vec<String> = ctx.i18n.store().tree(locale).leaf_paths().into_iter().collect();
    render_keys(locale, &keys, ctx.output).map(CommandOutput::success)
}

pub(crate) fn handle_audit(ctx: &AppContext) -> CliResult<CommandOutput> {
    let report = audit(ctx.i18n.store());
    let text = render_audit(&report, ctx.output)?;
    if report.is_complete() {
        return Ok(CommandOutput::success(text));
    }

    let missing: usize = report.missing.values().map(Vec::len).sum();
    info!(missing, total = report.total_keys, "catalogs incomplete");
    Ok(CommandOutput::findings(text))
}
