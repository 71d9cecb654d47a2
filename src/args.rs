use clap::Parser;
use link_sift::SiftConfig;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "link-sift")]
#[command(about = "Pulls links from a page and keeps the ones about rebates, grants, loans, and energy efficiency")]
#[command(version)]
pub struct Args {
    /// Page to extract links from (defaults to the Canada Greener Homes Initiative page)
    pub url: Option<String>,

    /// File the filtered links are written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model identifier sent to the LLM provider
    #[arg(short, long)]
    pub model: Option<String>,

    /// Chat-completions endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Page request timeout in seconds (0 disables it)
    #[arg(long)]
    pub fetch_timeout: Option<u64>,

    /// LLM request timeout in seconds (0 disables it)
    #[arg(long)]
    pub llm_timeout: Option<u64>,
}

impl Args {
    /// Layer defaults, config file, environment and flags into one configuration
    pub fn load_config(&self) -> Result<SiftConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SiftConfig::from_file(path)?,
            None => SiftConfig::default(),
        };
        config.apply_env();
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Apply command-line flags on top of an existing configuration
    pub fn apply_overrides(&self, config: &mut SiftConfig) {
        if let Some(url) = &self.url {
            config.page_url = url.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.llm.endpoint = endpoint.clone();
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(secs) = self.fetch_timeout {
            config.fetch_timeout_secs = secs;
        }
        if let Some(secs) = self.llm_timeout {
            config.llm.timeout_secs = secs;
        }
    }
}
