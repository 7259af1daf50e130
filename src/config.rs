use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the shortening backend, e.g. "https://lnkr.co.za".
    /// Never has a trailing slash.
    pub api_url: String,

    /// Path of the create operation, appended to `api_url`.
    pub create_path: String,

    /// Host shown in short links, without any leading "www."
    pub short_host: String,

    /// SQLite connection string for the local history, e.g. "sqlite:./lnkr-history.db"
    pub history_db: String,

    /// Per-request timeout for backend calls
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("LNKR_API_URL")
            .unwrap_or_else(|| "http://localhost:8080".into())
            .trim_end_matches('/')
            .to_owned();

        let parsed = reqwest::Url::parse(&api_url)
            .with_context(|| format!("LNKR_API_URL is not a valid URL: {api_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("LNKR_API_URL must be an http or https URL");
        }

        let mut create_path =
            lookup("LNKR_CREATE_PATH").unwrap_or_else(|| "/_ah/api/shortlink/v1/create".into());
        if !create_path.starts_with('/') {
            create_path.insert(0, '/');
        }

        let short_host = match lookup("LNKR_SHORT_HOST").filter(|h| !h.trim().is_empty()) {
            Some(host) => host.trim().to_owned(),
            None => {
                let host = parsed
                    .host_str()
                    .context("LNKR_API_URL has no host; set LNKR_SHORT_HOST explicitly")?;
                match parsed.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.to_owned(),
                }
            }
        };
        let short_host = short_host
            .strip_prefix("www.")
            .unwrap_or(&short_host)
            .to_owned();

        let timeout_secs = lookup("LNKR_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".into())
            .parse::<u64>()
            .context("LNKR_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
        if timeout_secs == 0 {
            anyhow::bail!("LNKR_REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            api_url,
            create_path,
            short_host,
            history_db: lookup("LNKR_HISTORY_DB")
                .unwrap_or_else(|| "sqlite:./lnkr-history.db".into()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
