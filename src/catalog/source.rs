use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::app_system::ViewConfig;
use crate::domain::Product;
use crate::error::CatalogError;

/// Anything that can produce the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Reads the catalog with a single unauthenticated GET.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    url: String,
    http: Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = Client::builder().user_agent(concat!("product-grid/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { url: url.into(), http: builder.build()? })
    }

    pub fn from_config(config: &ViewConfig) -> Result<Self, CatalogError> {
        Self::new(config.catalog_url.clone(), config.catalog_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        debug!("Sending catalog request");
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let products = decode_catalog(&body)?;
        info!(count = products.len(), "Catalog received");
        Ok(products)
    }
}

/// Decodes the endpoint's JSON array of products.
pub fn decode_catalog(body: &[u8]) -> Result<Vec<Product>, CatalogError> {
    Ok(serde_json::from_slice(body)?)
}
