use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retbro_lib::settings::{save_settings, settings_path, settings_to_string};
use retbro_lib::Settings;
use retbro_scraper::{CredentialSource, Credentials};

use super::AppContext;
use crate::error::CliError;

pub(crate) fn mask_value(s: &str) -> String {
    let prefix: String = s.chars().take(2).collect();
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}

fn show_path(label: &str, path: Option<std::path::PathBuf>) {
    match path {
        Some(p) if p.exists() => log::info!(
            "  {} {} {}",
            format!("{}:", label).if_supports_color(Stdout, |t| t.cyan()),
            p.display(),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  {} {} {}",
            format!("{}:", label).if_supports_color(Stdout, |t| t.cyan()),
            p.display(),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  {} {}",
            format!("{}:", label).if_supports_color(Stdout, |t| t.cyan()),
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
}

/// Show effective settings and where each credential came from.
pub(crate) fn run_config_show(ctx: &AppContext) {
    log::info!("{}", "Settings".if_supports_color(Stdout, |t| t.bold()));
    show_path("File", Some(settings_path()));
    crate::logging::log_blank();
    for line in settings_to_string(&ctx.settings).lines() {
        log::info!("  {}", line);
    }
    if ctx.offline {
        log::info!(
            "  {}",
            "(--offline: metadata lookups disabled for this run)"
                .if_supports_color(Stdout, |t| t.yellow())
        );
    }
    crate::logging::log_blank();

    log::info!(
        "{}",
        "ScreenScraper Credentials".if_supports_color(Stdout, |t| t.bold())
    );
    show_path("File", retbro_scraper::credentials::config_path());
    crate::logging::log_blank();

    let creds = Credentials::load();
    let sources = retbro_scraper::credentials::credential_sources();
    let fields: [(&str, &CredentialSource, Option<&str>, bool); 5] = [
        ("dev_id", &sources.dev_id, Some(creds.dev_id.as_str()), false),
        ("dev_password", &sources.dev_password, Some(creds.dev_password.as_str()), true),
        ("soft_name", &sources.soft_name, Some(creds.soft_name.as_str()), false),
        ("user_id", &sources.user_id, creds.user_id.as_deref(), false),
        ("user_password", &sources.user_password, creds.user_password.as_deref(), true),
    ];

    for (name, source, value, secret) in fields {
        let source_str = format!("({})", source);
        let label = format!("{}:", name);
        match (source, value) {
            (CredentialSource::Missing, _) | (_, None) => log::info!(
                "  {} {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            (_, Some(v)) => {
                let shown = if secret { mask_value(v) } else { v.to_string() };
                log::info!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    shown,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
    if creds.is_demo() {
        crate::logging::log_blank();
        log::info!(
            "  {}",
            "Using the public demo account; lookups may be throttled."
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

/// Print the settings and credentials file paths.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings_path().display());
    match retbro_scraper::credentials::config_path() {
        Some(path) => log::info!("{}", path.display()),
        None => return Err(CliError::config("Could not determine config directory")),
    }
    Ok(())
}

/// Write a default settings file.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_settings(&Settings::default())?;
    log::info!(
        "{} Settings written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
