use std::path::Path;
use std::sync::LazyLock;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use regex::Regex;
use reqwest::Url;

use retbro_core::Platform;

use super::AppContext;
use crate::error::CliError;
use crate::spinner;

/// Extensions accepted even when the platform table has no entry for them.
const EXTRA_ROM_EXTENSIONS: &[&str] = &["gg", "snes", "gbc", "sms", "smd", "bin", "a78"];

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\b[^>]*?\bhref\s*=\s*["']([^"']+)["']"#).expect("valid href regex")
});

fn is_rom_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    let Some((_, ext)) = lower.rsplit_once('.') else {
        return false;
    };
    EXTRA_ROM_EXTENSIONS.contains(&ext)
        || Platform::all().iter().any(|p| p.extensions().contains(&ext))
}

/// Resolve one `href` against the listing page.
///
/// `//host/...` gets the `https:` scheme, `/path` the page origin, and
/// anything else is joined onto the page URL.
fn resolve_href(page: &Url, href: &str) -> Option<Url> {
    let href = href.trim().replace("&amp;", "&");
    if let Some(rest) = href.strip_prefix("//") {
        return Url::parse(&format!("https://{}", rest)).ok();
    }
    page.join(&href).ok()
}

/// Absolute ROM links found in a listing page, in page order, deduplicated.
pub(crate) fn extract_rom_links(html: &str, page: &Url) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for caps in HREF.captures_iter(html) {
        let Some(url) = resolve_href(page, &caps[1]) else {
            continue;
        };
        if !is_rom_path(url.path()) {
            continue;
        }
        let url = url.to_string();
        if !links.contains(&url) {
            links.push(url);
        }
    }
    links
}

/// Catalog descriptor holding one system.
pub(crate) fn catalog_json(system: &str, links: &[String]) -> String {
    let mut map = serde_json::Map::new();
    map.insert(system.to_string(), serde_json::Value::from(links.to_vec()));
    serde_json::to_string_pretty(&serde_json::Value::Object(map)).unwrap_or_default()
}

async fn fetch_page(http: &reqwest::Client, page: &Url) -> Result<String, reqwest::Error> {
    http.get(page.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Fetch a listing page and write its ROM links as a catalog.
pub(crate) async fn run_extract(
    ctx: &AppContext,
    url: &str,
    system: &str,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let page = Url::parse(url).map_err(|e| CliError::other(format!("Invalid URL {}: {}", url, e)))?;

    let pb = spinner::start(format!("Fetching {}...", page), ctx.quiet);
    let http = ctx.http_client()?;
    let html = fetch_page(&http, &page).await;
    pb.finish_and_clear();
    let html = html?;

    let links = extract_rom_links(&html, &page);
    if links.is_empty() {
        log::warn!("No ROM files found at {}", page);
        return Ok(());
    }
    let json = catalog_json(system, &links);

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))?;
            log::info!(
                "{} Extracted {} ROM URL(s) to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                links.len(),
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        None => {
            log::debug!("Extracted {} ROM URL(s)", links.len());
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/extract_tests.rs"]
mod tests;
