use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::contentmodels::{EoiFormContent, HeroContent, OverviewContent, PageContent};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("CMS request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("CMS returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
}

/// Single-type envelope: `{ "data": {...}, "meta": {...} }`.
#[derive(Debug, Deserialize)]
struct CmsResponse<T> {
    data: T,
}

/// Read-only client for the headless CMS. Every read is optional: a document that
/// cannot be fetched is replaced by its built-in default.
#[derive(Debug, Clone)]
pub struct ContentService {
    client: Client,
    base_url: String,
}

impl ContentService {
    pub fn new(base_url: &str) -> Result<Self, ContentError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(ContentService {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_single<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ContentError> {
        let url = format!("{}/api/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("populate", "*")])
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body: CmsResponse<T> = response.json().await?;
        Ok(body.data)
    }

    async fn fetch_or_default<T>(&self, endpoint: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.fetch_single(endpoint).await {
            Ok(document) => {
                debug!("Loaded '{}' from CMS", endpoint);
                document
            }
            Err(e) => {
                warn!("Using default '{}' content: {}", endpoint, e);
                T::default()
            }
        }
    }

    /// Fetches the three singleton documents in parallel. Never fails.
    pub async fn page_content(&self) -> PageContent {
        let (hero, overview, eoi_form) = tokio::join!(
            self.fetch_or_default::<HeroContent>("hero"),
            self.fetch_or_default::<OverviewContent>("overview"),
            self.fetch_or_default::<EoiFormContent>("eoi-form"),
        );

        let mut content = PageContent {
            hero,
            overview,
            eoi_form,
        };
        content.resolve_media_urls(&self.base_url);
        debug!(
            "Page content ready ({} active sales manager(s))",
            content.eoi_form.active_sales_managers().len()
        );
        content
    }
}
