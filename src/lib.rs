// Re-export modules
pub mod config;
pub mod fetcher;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{LlmConfig, SiftConfig};
pub use fetcher::{PageFetch, PageFetcher};
pub use filter::{FilterReply, RelevanceFilter};
pub use results::{SiftOutcome, save_links};

use std::path::PathBuf;

/// Builder for a single fetch → extract → filter → persist run
#[derive(Debug, Clone)]
pub struct Sift {
    config: SiftConfig,
}

impl Sift {
    /// Create a new Sift builder for the given page with default settings
    pub fn new(page_url: &str) -> Self {
        Self {
            config: SiftConfig::new(page_url),
        }
    }

    /// Create a builder from a complete configuration
    pub fn from_config(config: SiftConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file, keeping the page URL already set
    pub fn with_config_file(
        mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let page_url = std::mem::take(&mut self.config.page_url);
        self.config = SiftConfig::from_file(path)?;
        self.config.page_url = page_url;
        Ok(self)
    }

    /// Set the file the filtered links are written to
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the LLM provider API key
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.config.llm.api_key = api_key.to_string();
        self
    }

    /// Set the chat-completions endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.config.llm.endpoint = endpoint.to_string();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.llm.model = model.to_string();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.config.llm.temperature = temperature;
        self
    }

    /// Set the page request timeout (0 disables it)
    pub fn with_fetch_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch_timeout_secs = timeout_seconds;
        self
    }

    /// Set the LLM request timeout (0 disables it)
    pub fn with_llm_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.llm.timeout_secs = timeout_seconds;
        self
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    /// Run the pipeline once.
    ///
    /// Each stage runs only if the previous one produced something. Stage
    /// failures (bad status, no links, unusable reply) end the run with the
    /// matching [`SiftOutcome`]; connection and disk errors are returned.
    pub async fn run(self) -> Result<SiftOutcome, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder().build()?;
        self.run_with_client(client).await
    }

    /// Run the pipeline once, sending both requests through `client`
    pub async fn run_with_client(
        self,
        client: reqwest::Client,
    ) -> Result<SiftOutcome, Box<dyn std::error::Error>> {
        let SiftConfig {
            page_url,
            output_path,
            fetch_timeout_secs,
            llm,
        } = self.config;

        let fetcher = PageFetcher::with_client(client.clone(), fetch_timeout_secs);
        let html = match fetcher.fetch(&page_url).await? {
            PageFetch::Body(html) => html,
            PageFetch::Failed(status) => return Ok(SiftOutcome::FetchFailed { status }),
        };

        let extracted = parsers::html::extract_links(&html);
        if extracted.is_empty() {
            ::log::info!("No links found on {}", page_url);
            return Ok(SiftOutcome::NoLinks);
        }
        ::log::info!("Extracted {} links from {}", extracted.links.len(), page_url);

        let extracted_count = extracted.links.len();
        let filter = RelevanceFilter::with_client(llm, client);
        let links = match filter.filter(&extracted.links).await? {
            FilterReply::Kept(links) if !links.is_empty() => links,
            FilterReply::Kept(_) => {
                return Ok(SiftOutcome::NoRelevantLinks {
                    extracted: extracted_count,
                    reason: None,
                });
            }
            FilterReply::Rejected { status, body } => {
                return Ok(SiftOutcome::FilterRejected {
                    extracted: extracted_count,
                    status,
                    body,
                });
            }
            FilterReply::Malformed(reason) => {
                return Ok(SiftOutcome::NoRelevantLinks {
                    extracted: extracted_count,
                    reason: Some(reason),
                });
            }
        };

        save_links(&links, &output_path)?;

        Ok(SiftOutcome::Saved {
            extracted: extracted_count,
            links,
            path: output_path,
        })
    }
}
