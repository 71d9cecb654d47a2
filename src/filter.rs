use crate::config::LlmConfig;
use crate::utils::{timeout_from_secs, to_json_pretty};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// The part of the reply envelope the filter reads
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}

/// What the LLM made of a link list
#[derive(Debug, Clone, PartialEq)]
pub enum FilterReply {
    /// Items the model kept, exactly as it returned them (possibly none)
    Kept(Vec<Value>),
    /// The provider answered with a non-success status
    Rejected { status: u16, body: String },
    /// The reply could not be read as a JSON array of links
    Malformed(String),
}

impl FilterReply {
    /// The kept items; every failure counts as an empty list
    pub fn into_links(self) -> Vec<Value> {
        match self {
            FilterReply::Kept(links) => links,
            FilterReply::Rejected { .. } | FilterReply::Malformed(_) => Vec::new(),
        }
    }
}

/// Build the filtering instruction sent to the model
pub fn build_prompt(links: &[String]) -> serde_json::Result<String> {
    let listing = to_json_pretty(links)?;

    Ok(format!(
        "Here is a list of links extracted from a webpage:\n\
         {listing}\n\
         \n\
         Your task:\n\
         - Only return links related to rebate programs, grants, loans, or energy efficiency initiatives.\n\
         - Exclude links from navigation bars, footers, or unrelated sections.\n\
         \n\
         Return the filtered list as a valid JSON array."
    ))
}

/// Pull the filtered link list out of a chat-completions reply envelope.
///
/// The first choice's message content must itself be a JSON array. Its
/// elements are returned untouched, whatever their type.
pub fn parse_reply(envelope: &Value) -> FilterReply {
    if envelope.get("choices").is_none() {
        return FilterReply::Malformed(
            "Unexpected API response format. 'choices' key missing.".to_string(),
        );
    }

    match decode_content(envelope) {
        Ok(items) => FilterReply::Kept(items),
        Err(e) => FilterReply::Malformed(format!("Error decoding response content: {}", e)),
    }
}

fn decode_content(envelope: &Value) -> Result<Vec<Value>, Box<dyn Error>> {
    let response = ChatResponse::deserialize(envelope)?;
    let first = response
        .choices
        .into_iter()
        .next()
        .ok_or("reply contained no choices")?;
    let items: Vec<Value> = serde_json::from_str(&first.message.content)?;
    Ok(items)
}

/// Asks a remote LLM which links are about rebates, grants, loans, or energy efficiency
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    config: LlmConfig,
    client: Client,
}

impl RelevanceFilter {
    /// Create a filter from explicit provider settings
    pub fn new(config: LlmConfig) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a filter that sends its request through `client`
    pub fn with_client(config: LlmConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Ask the model to filter `links` down to the relevant ones.
    ///
    /// An empty input returns `Kept([])` without a request. Transport
    /// failures and timeouts are returned as errors. The model's answer is
    /// not checked against the input list.
    pub async fn filter(&self, links: &[String]) -> Result<FilterReply, Box<dyn Error>> {
        if links.is_empty() {
            ::log::debug!("No links to filter, skipping LLM request");
            return Ok(FilterReply::Kept(Vec::new()));
        }

        let prompt = build_prompt(links)?;
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.config.temperature,
        };

        ::log::info!(
            "Asking {} to filter {} links",
            self.config.model,
            links.len()
        );

        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request);
        if let Some(timeout) = timeout_from_secs(self.config.timeout_secs) {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            ::log::debug!("LLM request returned {}", status);
            return Ok(FilterReply::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let envelope: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                let reason = format!("LLM reply was not JSON: {}", e);
                return Ok(FilterReply::Malformed(reason));
            }
        };

        if ::log::log_enabled!(::log::Level::Debug) {
            if let Ok(pretty) = to_json_pretty(&envelope) {
                ::log::debug!("API Response: {}", pretty);
            }
        }

        let reply = parse_reply(&envelope);
        if let FilterReply::Kept(kept) = &reply {
            ::log::info!("LLM kept {} of {} links", kept.len(), links.len());
        }

        Ok(reply)
    }
}
