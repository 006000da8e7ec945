use std::path::PathBuf;

/// Public credentials ScreenScraper hands out for evaluation use.
pub const DEMO_DEV_ID: &str = "demo";
pub const DEMO_DEV_PASSWORD: &str = "demo";
pub const DEMO_SOFT_NAME: &str = "demo";

const ENV_DEV_ID: &str = "SCREENSCRAPER_DEVID";
const ENV_DEV_PASSWORD: &str = "SCREENSCRAPER_DEVPASSWORD";
const ENV_SOFT_NAME: &str = "SCREENSCRAPER_SOFTNAME";
const ENV_USER_ID: &str = "SCREENSCRAPER_SSID";
const ENV_USER_PASSWORD: &str = "SCREENSCRAPER_SSPASSWORD";

/// Credentials for authenticating with the ScreenScraper API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub dev_id: String,
    pub dev_password: String,
    pub soft_name: String,
    pub user_id: Option<String>,
    pub user_password: Option<String>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            dev_id: DEMO_DEV_ID.to_string(),
            dev_password: DEMO_DEV_PASSWORD.to_string(),
            soft_name: DEMO_SOFT_NAME.to_string(),
            user_id: None,
            user_password: None,
        }
    }
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Public demo value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSources {
    pub dev_id: CredentialSource,
    pub dev_password: CredentialSource,
    pub soft_name: CredentialSource,
    pub user_id: CredentialSource,
    pub user_password: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    screenscraper: Option<ScreenScraperConfig>,
}

/// The `[screenscraper]` table of `credentials.toml`.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct ScreenScraperConfig {
    pub dev_id: Option<String>,
    pub dev_password: Option<String>,
    pub soft_name: Option<String>,
    pub user_id: Option<String>,
    pub user_password: Option<String>,
}

/// Pick one field: environment first, then the config file, then the default.
fn pick(
    env: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    from_config: Option<&String>,
    default: Option<&str>,
) -> (Option<String>, CredentialSource) {
    if let Some(value) = env(var).filter(|v| !v.is_empty()) {
        (Some(value), CredentialSource::EnvVar(var))
    } else if let Some(value) = from_config {
        (Some(value.clone()), CredentialSource::ConfigFile)
    } else if let Some(value) = default {
        (Some(value.to_string()), CredentialSource::Default)
    } else {
        (None, CredentialSource::Missing)
    }
}

impl Credentials {
    /// Load credentials from the process environment and the config file.
    ///
    /// Priority: env vars > config file > public demo credentials. User
    /// credentials (`ssid`/`sspassword`) are optional and have no default.
    pub fn load() -> Self {
        let config = load_config_file();
        Self::resolve(|var| std::env::var(var).ok(), config.as_ref()).0
    }

    /// Resolve every field against an environment lookup and an optional
    /// config table, reporting where each value came from.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        config: Option<&ScreenScraperConfig>,
    ) -> (Self, CredentialSources) {
        let cfg = config.cloned().unwrap_or_default();

        let (dev_id, dev_id_src) = pick(&env, ENV_DEV_ID, cfg.dev_id.as_ref(), Some(DEMO_DEV_ID));
        let (dev_password, dev_password_src) = pick(
            &env,
            ENV_DEV_PASSWORD,
            cfg.dev_password.as_ref(),
            Some(DEMO_DEV_PASSWORD),
        );
        let (soft_name, soft_name_src) =
            pick(&env, ENV_SOFT_NAME, cfg.soft_name.as_ref(), Some(DEMO_SOFT_NAME));
        let (user_id, user_id_src) = pick(&env, ENV_USER_ID, cfg.user_id.as_ref(), None);
        let (user_password, user_password_src) =
            pick(&env, ENV_USER_PASSWORD, cfg.user_password.as_ref(), None);

        let creds = Self {
            dev_id: dev_id.unwrap_or_default(),
            dev_password: dev_password.unwrap_or_default(),
            soft_name: soft_name.unwrap_or_default(),
            user_id,
            user_password,
        };
        let sources = CredentialSources {
            dev_id: dev_id_src,
            dev_password: dev_password_src,
            soft_name: soft_name_src,
            user_id: user_id_src,
            user_password: user_password_src,
        };
        (creds, sources)
    }

    /// Whether these are the shared demo credentials.
    pub fn is_demo(&self) -> bool {
        self.dev_id == DEMO_DEV_ID && self.dev_password == DEMO_DEV_PASSWORD
    }
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("retbro").join("credentials.toml"))
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let config = load_config_file();
    Credentials::resolve(|var| std::env::var(var).ok(), config.as_ref()).1
}

fn load_config_file() -> Option<ScreenScraperConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<ScreenScraperConfig> {
    match toml::from_str::<ConfigFile>(content) {
        Ok(config) => config.screenscraper,
        Err(e) => {
            log::warn!("Ignoring malformed credentials file: {}", e);
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
