//! Quotable random-quote service (`GET /random`).

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::data::service::{QuotesService, ServiceError, truncate_body};
use crate::data::types::Quote;

pub const DEFAULT_QUOTABLE_BASE_URL: &str = "https://api.quotable.io";

#[derive(Deserialize, Debug)]
struct RandomQuoteResponse {
    content: Option<String>,
    author: Option<String>,
}

impl From<RandomQuoteResponse> for Quote {
    fn from(response: RandomQuoteResponse) -> Self {
        Quote {
            content: response.content,
            author: response.author,
        }
    }
}

/// Parse a successful body. Empty bodies and a JSON `null` mean "no quote".
fn parse_body(body: &str) -> Result<Option<Quote>, ServiceError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<RandomQuoteResponse>>(trimmed)
        .map(|parsed| parsed.map(Quote::from))
        .map_err(|e| ServiceError::Parse(format!("{e}: {}", truncate_body(trimmed))))
}

pub struct QuotableService {
    base_url: String,
    client: reqwest::Client,
}

impl QuotableService {
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: Option<String>, client: reqwest::Client) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_QUOTABLE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { base_url, client }
    }
}

#[async_trait]
impl QuotesService for QuotableService {
    fn name(&self) -> &str {
        "quotable"
    }

    async fn get_random_quote(&self) -> Result<Option<Quote>, ServiceError> {
        info!("Quotable request: {}/random", self.base_url);

        let response = self
            .client
            .get(format!("{}/random", self.base_url))
            .send()
            .await?;

        let status = response.status();
        debug!("Quotable response status: {}", status);

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Quotable API error: {} - {}", status.as_u16(), truncate_body(&body));
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        parse_body(&body)
    }
}
