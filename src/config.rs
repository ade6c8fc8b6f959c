//! Startup configuration.
//!
//! Values are layered: built-in defaults, the bundled `resume-intel.toml`, a
//! base URL captured at build time, then a `<meta>` tag in the host page.

use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Name of the `<meta>` tag the host page can use to point at another backend.
pub const API_BASE_URL_META: &str = "resume-intel:api-base-url";

const BUNDLED_CONFIG: &str = include_str!("../resume-intel.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub log_level: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(alias = "apiBaseUrl")]
    api_base_url: Option<String>,
    #[serde(alias = "logLevel")]
    log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default base URL is valid"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Layer the sources in precedence order: `page_override` beats
    /// `build_override`, which beats `file_toml`, which beats the defaults.
    pub fn resolve(
        file_toml: &str,
        build_override: Option<&str>,
        page_override: Option<&str>,
    ) -> Result<Self, ClientError> {
        let file: ConfigFile = toml::from_str(file_toml)
            .map_err(|e| ClientError::Config(format!("invalid config file: {}", e)))?;

        let mut config = Self::default();
        if let Some(level) = file.log_level.filter(|l| !l.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }

        let base = [page_override, build_override, file.api_base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty());
        if let Some(base) = base {
            config.api_base_url = parse_base_url(base)?;
        }

        Ok(config)
    }

    /// Resolve from the bundled file, the build-time environment and the page.
    pub fn load() -> Result<Self, ClientError> {
        let page = page_meta_content(API_BASE_URL_META);
        Self::resolve(
            BUNDLED_CONFIG,
            option_env!("RESUME_INTEL_API_BASE_URL"),
            page.as_deref(),
        )
    }

    /// Like [`AppConfig::load`], ignoring the build and page overrides.
    pub fn bundled() -> Self {
        Self::resolve(BUNDLED_CONFIG, None, None).unwrap_or_default()
    }

    /// Absolute URL of an endpoint below the configured base.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.api_base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid endpoint '{}': {}", path, e)))
    }
}

/// Parse a base URL, requiring http(s) and a trailing slash so endpoints join
/// beneath its path instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ClientError::Config(format!("invalid api base URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "api base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn page_meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", name);
    let meta = document.query_selector(&selector).ok()??;
    meta.get_attribute("content")
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
