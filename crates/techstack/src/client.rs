// ABOUTME: The Client struct that fetches a page and maps its tables into a TechStack.
// ABOUTME: Provides scrape() for URLs and scrape_html() for pages already on disk.

use tracing::info;

use crate::dom::Document;
use crate::error::ScrapeError;
use crate::mapper::map_document;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, FetchOptions};
use crate::result::TechStack;

/// Fetches one page and maps it. Holds a reusable blocking HTTP client.
#[derive(Debug)]
pub struct Client {
    opts: Options,
    http_client: reqwest::blocking::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::blocking::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch(
                        "",
                        "NewClient",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        Ok(Self { opts, http_client })
    }

    /// Fetch `url` and map its tables.
    pub fn scrape(&self, url: &str) -> Result<TechStack, ScrapeError> {
        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };
        let fetched = fetch(&self.http_client, url, &fetch_opts)?;
        let html = fetched.text();

        self.scrape_html(&html).map_err(|e| e.with_url(url))
    }

    /// Map an HTML page that is already in memory.
    pub fn scrape_html(&self, html: &str) -> Result<TechStack, ScrapeError> {
        let doc = Document::parse(html);
        let stack = map_document(&doc)?;
        info!(
            title = %stack.title,
            areas = stack.areas.len(),
            technologies = stack.technology_count(),
            "mapped page"
        );
        Ok(stack)
    }
}
