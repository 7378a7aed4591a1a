use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::Duration;

/// Blocking GET access to remote repositories and the search service.
///
/// `Ok(None)` means the server answered 404; every other non-success status
/// is an error.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    const TIMEOUT_SECONDS: u64 = 30;

    pub fn new() -> Result<Self> {
        let user_agent = format!("jclec/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Request failed: {url}"))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            bail!("{url} returned status code {status}");
        }

        let body = response
            .bytes()
            .with_context(|| format!("Failed to read response body: {url}"))?;
        Ok(Some(body.to_vec()))
    }
}
