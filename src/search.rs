use anyhow::{Context, Result, bail};
use log::{error, info, warn};
use serde::Deserialize;
use std::sync::Arc;

use crate::transport::Transport;

pub const DEFAULT_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";
pub const DEFAULT_ROWS: u32 = 20;

// Partial Solr select response; everything besides the doc ids is ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    id: Option<String>,
}

/// Full-text class search against the Maven Central index.
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
    rows: u32,
    offline: bool,
}

impl SearchClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_SEARCH_URL.to_string(),
            rows: DEFAULT_ROWS,
            offline: false,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn query_url(&self, class_name: &str) -> String {
        let query = format!("fc:\"{}\"", class_name.trim());
        format!(
            "{}?q={}&rows={}&wt=json",
            self.endpoint,
            urlencoding::encode(&query),
            self.rows
        )
    }

    /// Artifact ids (`group:artifact:version`) whose jars contain a class of
    /// this name, in response order. Errors are logged and yield nothing.
    pub fn search_for_class(&self, class_name: &str) -> Vec<String> {
        if self.offline {
            warn!("Offline mode: skipping search for {class_name}");
            return Vec::new();
        }

        match self.try_search(class_name) {
            Ok(ids) => {
                info!("Search for {class_name} returned {} artifacts", ids.len());
                ids
            }
            Err(e) => {
                error!("Error searching for class: {e:#}");
                Vec::new()
            }
        }
    }

    fn try_search(&self, class_name: &str) -> Result<Vec<String>> {
        let url = self.query_url(class_name);
        let Some(body) = self.transport.get(&url)? else {
            bail!("Search endpoint not found: {}", self.endpoint);
        };
        parse_search_response(&String::from_utf8_lossy(&body))
    }
}

pub fn parse_search_response(body: &str) -> Result<Vec<String>> {
    let parsed: SearchResponse =
        serde_json::from_str(body).context("Unexpected search response shape")?;
    Ok(parsed
        .response
        .docs
        .into_iter()
        .filter_map(|doc| doc.id)
        .collect())
}
