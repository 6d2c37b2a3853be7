//! Where catalogues come from.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::errors::CatalogueError;
use super::types::Catalogue;

/// Produces a complete, freshly parsed catalogue.
///
/// Implementations must bound their own running time; a timeout is
/// reported as [`CatalogueError::Timeout`].
pub trait CatalogueSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Catalogue, CatalogueError>> + Send;
}

/// Fetches the catalogue with an HTTP GET and parses the JSON body.
#[derive(Debug, Clone)]
pub struct HttpCatalogueSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpCatalogueSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogueError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tunewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogueError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_error(&self, e: reqwest::Error) -> CatalogueError {
        if e.is_timeout() {
            CatalogueError::Timeout {
                after: self.timeout,
            }
        } else {
            CatalogueError::Http {
                message: e.to_string(),
            }
        }
    }
}

impl CatalogueSource for HttpCatalogueSource {
    async fn fetch(&self) -> Result<Catalogue, CatalogueError> {
        debug!(event = "core.catalogue.fetch_started", url = %self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CatalogueError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.request_error(e))?;
        let catalogue = Catalogue::parse(&body)?;

        debug!(
            event = "core.catalogue.fetch_completed",
            url = %self.url,
            entries = catalogue.len(),
            bytes = body.len(),
        );

        Ok(catalogue)
    }
}
