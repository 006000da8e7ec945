use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retbro_lib::{Command, Effect};

use super::{AppContext, select};
use crate::error::CliError;

/// Print the player URL for a title. The URL alone goes to stdout so it can
/// be piped; the summary line is informational.
pub(crate) async fn run_launch(
    ctx: &AppContext,
    source: &str,
    system: &str,
    title: &str,
    page: Option<&str>,
) -> Result<(), CliError> {
    let catalog = ctx.load_catalog(source).await?;
    let mut session = ctx.session(catalog)?;
    select(&mut session, system, title)?;

    let Effect::Launch(handoff) = session.handle(Command::Launch) else {
        return Err(CliError::unknown_title(format!("'{}'", title)));
    };
    let page = page.unwrap_or(&ctx.settings.player.page);

    log::info!(
        "{} {} as {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        handoff.rom_url,
        handoff
            .platform
            .display_name()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    println!("{}", handoff.navigation_url(page));
    Ok(())
}
