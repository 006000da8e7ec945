use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::AppContext;
use crate::error::CliError;

/// List the systems in a catalog with their title counts.
pub(crate) async fn run_systems(ctx: &AppContext, source: &str) -> Result<(), CliError> {
    let catalog = ctx.load_catalog(source).await?;
    if catalog.is_empty() {
        log::warn!("No ROMs found in the file.");
        return Ok(());
    }

    log::info!("{}", "Systems:".if_supports_color(Stdout, |t| t.bold()));
    for system in catalog.systems() {
        let count = system.title_urls().len();
        let image = system
            .display_image()
            .map(|image| format!(" {}", image.if_supports_color(Stdout, |t| t.dimmed())))
            .unwrap_or_default();
        log::info!(
            "  {} {}{}",
            system.name.if_supports_color(Stdout, |t| t.bold()),
            format!("({} title{})", count, if count == 1 { "" } else { "s" })
                .if_supports_color(Stdout, |t| t.cyan()),
            image,
        );
    }
    Ok(())
}
