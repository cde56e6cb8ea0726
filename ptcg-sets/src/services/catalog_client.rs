//! Remote catalog API client
//!
//! Fetches set lists and paginated card lists from the catalog API
//! (`GET {base}/sets`, `GET {base}/cards?q=set.id:{id}&page=n&pageSize=m`).
//! Every request carries the optional API key header and goes through
//! [`retry_with_backoff`]: timeouts and HTTP error statuses are retried,
//! other failures are not.

use super::retry::{retry_with_backoff, RetryPolicy};
use async_trait::async_trait;
use ptcg_common::models::{RawCard, SetDescriptor};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("ptcg-sets/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "X-Api-Key";

/// Cards requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Timeouts and HTTP-level failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Timeout(_) | CatalogError::Api(_, _))
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout(err.to_string())
        } else if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

/// `GET /sets` response envelope
#[derive(Debug, Deserialize)]
struct SetList {
    data: Vec<SetDescriptor>,
}

/// One page of `GET /cards`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPage {
    #[serde(default)]
    pub data: Vec<RawCard>,
    /// Server-reported number of cards matching the query
    #[serde(default)]
    pub total_count: u32,
}

/// Operations the remote pipeline needs from the catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Every set the catalog knows about, in catalog order
    async fn fetch_sets(&self) -> Result<Vec<SetDescriptor>, CatalogError>;

    /// One page (1-based) of the cards of `set_id`
    async fn fetch_card_page(
        &self,
        set_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<CardPage, CatalogError>;
}

/// Connection settings for [`CatalogClient`]
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: ptcg_common::config::DEFAULT_API_BASE.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

/// HTTP implementation of [`CatalogApi`]
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl CatalogClient {
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/{path}` with retries, decoding the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);

        retry_with_backoff(
            &url,
            &self.retry,
            || self.get_json_once(&url, query),
            CatalogError::is_retryable,
        )
        .await
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        tracing::debug!(url = %url, ?query, "Querying catalog API");

        let mut request = self.http_client.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(CatalogError::from_reqwest)?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        let body = response.bytes().await.map_err(CatalogError::from_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_sets(&self) -> Result<Vec<SetDescriptor>, CatalogError> {
        let list: SetList = self.get_json("sets", &[]).await?;
        Ok(list.data)
    }

    async fn fetch_card_page(
        &self,
        set_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<CardPage, CatalogError> {
        let query = [
            ("q", format!("set.id:{}", set_id)),
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.get_json("cards", &query).await
    }
}

/// Fetch every card of a set, page by page
///
/// Stops once `page * page_size` reaches the server-reported total, or
/// when a page comes back empty. Sleeps `page_delay` between pages.
pub async fn fetch_all_cards<A: CatalogApi + ?Sized>(
    api: &A,
    set_id: &str,
    page_size: u32,
    page_delay: Duration,
) -> Result<Vec<RawCard>, CatalogError> {
    let page_size = page_size.max(1);
    let mut all_cards = Vec::new();
    let mut page = 1u32;

    loop {
        tracing::info!(set_id = %set_id, "  Fetching page {}...", page);
        let result = api.fetch_card_page(set_id, page, page_size).await?;
        let returned = result.data.len();
        all_cards.extend(result.data);

        let reached_total = u64::from(page) * u64::from(page_size) >= u64::from(result.total_count);
        if reached_total || returned == 0 {
            break;
        }

        page += 1;
        tokio::time::sleep(page_delay).await;
    }

    Ok(all_cards)
}
