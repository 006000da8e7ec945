pub(crate) mod browse;
pub(crate) mod config;
pub(crate) mod extract;
pub(crate) mod info;
pub(crate) mod launch;
pub(crate) mod systems;
pub(crate) mod titles;

use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retbro_core::{Catalog, MetadataRecord, Title};
use retbro_lib::settings::load_settings;
use retbro_lib::{
    CatalogSource, Command, Effect, MetadataResponse, Provider, Session, Settings,
    resolver_from_settings,
};

use crate::error::CliError;
use crate::spinner;

/// State shared by every command: settings plus the global flags.
pub(crate) struct AppContext {
    pub settings: Settings,
    pub offline: bool,
    pub quiet: bool,
}

impl AppContext {
    pub(crate) fn new(offline: bool, quiet: bool) -> Self {
        Self {
            settings: load_settings(),
            offline,
            quiet,
        }
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client, CliError> {
        Ok(reqwest::Client::builder()
            .timeout(Duration::from_secs(self.settings.metadata.timeout_secs))
            .build()?)
    }

    /// Load a catalog from a file path or URL.
    pub(crate) async fn load_catalog(&self, source: &str) -> Result<Catalog, CliError> {
        let source = CatalogSource::parse(source);
        let remote = matches!(source, CatalogSource::Url(_));
        let pb = spinner::start(format!("Loading {}...", source), self.quiet || !remote);
        let http = self.http_client()?;
        let result = retbro_lib::loader::load(&http, &source).await;
        pb.finish_and_clear();
        Ok(result?)
    }

    /// Session over `catalog` with the configured metadata provider.
    pub(crate) fn session(&self, catalog: Catalog) -> Result<Session<Provider>, CliError> {
        let resolver = resolver_from_settings(&self.settings.metadata, self.offline)?;
        Ok(Session::new(catalog, Arc::new(resolver)))
    }
}

/// Index of the system called `name`.
pub(crate) fn find_system(catalog: &Catalog, name: &str) -> Result<usize, CliError> {
    catalog.position(name).ok_or_else(|| {
        let known: Vec<&str> = catalog.names().collect();
        CliError::unknown_system(format!("'{}' (catalog has: {})", name, known.join(", ")))
    })
}

/// Position of a title among `titles`.
///
/// `#N` picks the Nth entry (1-based). Otherwise an exact display name wins,
/// then a case-insensitive one, then the first name containing the text.
pub(crate) fn find_title<'a>(
    titles: impl IntoIterator<Item = &'a Title>,
    query: &str,
) -> Result<usize, CliError> {
    let titles: Vec<&Title> = titles.into_iter().collect();
    let query = query.trim();

    if let Some(n) = query.strip_prefix('#') {
        let n: usize = n
            .parse()
            .map_err(|_| CliError::unknown_title(format!("'{}' is not a title number", query)))?;
        if n == 0 || n > titles.len() {
            return Err(CliError::unknown_title(format!(
                "#{} (system has {} title(s))",
                n,
                titles.len()
            )));
        }
        return Ok(n - 1);
    }

    let lower = query.to_lowercase();
    titles
        .iter()
        .position(|t| t.display_name == query)
        .or_else(|| {
            titles
                .iter()
                .position(|t| t.display_name.to_lowercase() == lower)
        })
        .or_else(|| {
            titles
                .iter()
                .position(|t| t.display_name.to_lowercase().contains(&lower))
        })
        .ok_or_else(|| CliError::unknown_title(format!("'{}'", query)))
}

/// Open `system` and move the cursor onto `title`.
pub(crate) fn select(
    session: &mut Session<Provider>,
    system: &str,
    title: &str,
) -> Result<Effect, CliError> {
    let index = find_system(session.catalog(), system)?;
    let opened = session.handle(Command::Open(Some(index)));
    let position = find_title(session.visible_titles(), title)?;
    if position == session.state().active_title {
        return Ok(opened);
    }
    Ok(session.handle(Command::SelectTitle(position)))
}

/// Run a metadata fetch to completion behind a spinner.
pub(crate) async fn resolve(
    ctx: &AppContext,
    session: &mut Session<Provider>,
    effect: Effect,
) -> Option<Arc<MetadataRecord>> {
    let Effect::Fetch(request) = effect else {
        return match session.detail() {
            retbro_lib::DetailPane::Ready(record) => Some(Arc::clone(record)),
            _ => None,
        };
    };
    let pb = spinner::start(
        format!("Looking up {}...", request.display_name),
        ctx.quiet,
    );
    let response: MetadataResponse = session.fetch(request).await;
    pb.finish_and_clear();
    let record = Arc::clone(&response.record);
    session.apply(response);
    Some(record)
}

/// Print a metadata record the way the detail pane lays it out.
pub(crate) fn print_record(record: &MetadataRecord) {
    log::info!("{}", record.name.if_supports_color(Stdout, |t| t.bold()));
    let fields = [
        ("System", record.system.clone()),
        ("Year", record.year.clone()),
        ("Genres", record.genres_label()),
        ("Developer", record.developer.clone()),
        ("Publisher", record.publisher.clone()),
        ("Players", record.players.clone()),
    ];
    for (label, value) in fields {
        log::info!(
            "  {} {}",
            format!("{}:", label).if_supports_color(Stdout, |t| t.cyan()),
            value
        );
    }
    log::info!(
        "  {} {}",
        "Cover:".if_supports_color(Stdout, |t| t.cyan()),
        record.cover_image_url.if_supports_color(Stdout, |t| t.dimmed())
    );
    for (i, shot) in record.screenshots.iter().enumerate() {
        log::info!(
            "  {} {}",
            format!("Screenshot {}:", i + 1).if_supports_color(Stdout, |t| t.cyan()),
            shot.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    crate::logging::log_blank();
    log::info!("{}", record.description);
}

#[cfg(test)]
#[path = "../tests/commands_tests.rs"]
mod tests;
