use retbro_scraper::MetadataProvider;

use super::{AppContext, print_record, resolve, select};
use crate::error::CliError;

/// Look up and print game info for one title.
pub(crate) async fn run_info(
    ctx: &AppContext,
    source: &str,
    system: &str,
    title: &str,
) -> Result<(), CliError> {
    let catalog = ctx.load_catalog(source).await?;
    let mut session = ctx.session(catalog)?;
    log::debug!("Metadata provider: {}", session.resolver().provider().name());

    let effect = select(&mut session, system, title)?;
    let record = resolve(ctx, &mut session, effect)
        .await
        .ok_or_else(|| CliError::unknown_title(format!("'{}'", title)))?;
    print_record(&record);
    Ok(())
}
