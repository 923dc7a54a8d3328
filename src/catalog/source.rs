//! Where the plan comes from: the plan endpoint or a local JSON file

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::CourseItem;
use crate::config::{Config, RetryConfig};
use crate::error::CatalogError;
use crate::retry::retry_with_backoff;

#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Human-readable origin for logs and status lines
    fn describe(&self) -> String;

    /// Fetch the full plan. `reload` asks the server to re-read its plan sheet.
    async fn fetch(&self, reload: bool) -> Result<Vec<CourseItem>, CatalogError>;
}

/// Plan endpoint over HTTP
pub struct HttpPlanSource {
    pub http: reqwest::Client,
    pub url: String,
    pub retry: RetryConfig,
}

impl HttpPlanSource {
    async fn fetch_once(&self, reload: bool) -> Result<Vec<CourseItem>, CatalogError> {
        let mut request = self.http.get(&self.url).header(CACHE_CONTROL, "no-store");
        if reload {
            request = request.query(&[("reload", "1")]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let items: Vec<CourseItem> = serde_json::from_slice(&body)?;
        Ok(items)
    }
}

fn is_retryable(error: &CatalogError) -> bool {
    match error {
        CatalogError::Network(_) => true,
        CatalogError::Status { status } => *status >= 500 || *status == 429,
        CatalogError::ReadFile { .. } | CatalogError::Parse(_) => false,
    }
}

#[async_trait]
impl PlanSource for HttpPlanSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self, reload: bool) -> Result<Vec<CourseItem>, CatalogError> {
        debug!(url = %self.url, reload, "Fetching plan");
        let items =
            retry_with_backoff(&self.retry, is_retryable, || self.fetch_once(reload)).await?;
        info!("Loaded {} courses from {}", items.len(), self.url);
        Ok(items)
    }
}

/// Plan exported to disk in the same shape the endpoint returns
pub struct FilePlanSource {
    pub path: PathBuf,
}

#[async_trait]
impl PlanSource for FilePlanSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self, _reload: bool) -> Result<Vec<CourseItem>, CatalogError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| CatalogError::ReadFile {
                    path: self.path.clone(),
                    source: e,
                })?;
        let items: Vec<CourseItem> = serde_json::from_str(&content)?;
        info!("Loaded {} courses from {}", items.len(), self.path.display());
        Ok(items)
    }
}

/// Pick the plan source: a local file when given, otherwise the configured server
pub fn create_source(
    config: &Config,
    http: &reqwest::Client,
    catalog_file: Option<PathBuf>,
) -> Arc<dyn PlanSource> {
    match catalog_file {
        Some(path) => Arc::new(FilePlanSource { path }),
        None => Arc::new(HttpPlanSource {
            http: http.clone(),
            url: config.server.plan_url(),
            retry: config.retry.clone(),
        }),
    }
}
