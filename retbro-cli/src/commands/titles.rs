use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retbro_lib::Command;

use super::{AppContext, find_system};
use crate::error::CliError;

/// List one system's titles, optionally narrowed by a filter query.
pub(crate) async fn run_titles(
    ctx: &AppContext,
    source: &str,
    system: &str,
    filter: Option<&str>,
) -> Result<(), CliError> {
    let catalog = ctx.load_catalog(source).await?;
    let index = find_system(&catalog, system)?;
    // Listing never fetches metadata, so the provider is always offline here.
    let resolver = retbro_lib::resolver_from_settings(&ctx.settings.metadata, true)?;
    let mut session = retbro_lib::Session::new(catalog, std::sync::Arc::new(resolver));
    session.handle(Command::Open(Some(index)));
    if let Some(query) = filter {
        session.set_filter(query);
    }

    let name = session
        .catalog()
        .system(index)
        .map(|s| s.name.clone())
        .unwrap_or_default();
    log::info!("{}:", name.if_supports_color(Stdout, |t| t.bold()));

    if session.visible_count() == 0 {
        log::info!("  {}", "No results".if_supports_color(Stdout, |t| t.yellow()));
        return Ok(());
    }
    for (i, title) in session.visible_titles().enumerate() {
        log::info!(
            "  {} {} {}",
            format!("#{:<3}", i + 1).if_supports_color(Stdout, |t| t.dimmed()),
            title.display_name,
            format!("[{}]", title.platform().core_id()).if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}
