use async_trait::async_trait;
use std::time::Duration;

use crate::error::RemoteError;
use crate::models::{CreateRequest, CreateResponse, DataTable, Dataset};

// ── Seams ──────────────────────────────────────────────────────────────────

/// The remote "create short link" operation.
#[async_trait]
pub trait LinkApi: Send + Sync {
    /// Transport problems are errors; an application-level refusal comes back
    /// as `Ok` with a non-zero `status`.
    async fn create(&self, request: &CreateRequest) -> Result<CreateResponse, RemoteError>;
}

/// The read-only statistics endpoints.
#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn fetch(&self, dataset: Dataset) -> Result<DataTable, RemoteError>;
}

// ── HTTP implementation ────────────────────────────────────────────────────

/// Talks to the shortening backend over HTTP.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    create_path: String,
}

impl HttpApi {
    /// `base_url` must not end with a slash; `create_path` must start with one.
    pub fn new(
        base_url: impl Into<String>,
        create_path: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            create_path: create_path.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LinkApi for HttpApi {
    async fn create(&self, request: &CreateRequest) -> Result<CreateResponse, RemoteError> {
        let url = self.url(&self.create_path);
        tracing::debug!("POST {} target={}", url, request.target_link);

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("create request to {} failed: {}", url, e);
                RemoteError::from(e)
            })?
            .error_for_status()?;

        let body: CreateResponse = resp.json().await.map_err(|e| {
            tracing::warn!("create response from {} could not be parsed: {}", url, e);
            RemoteError::from(e)
        })?;

        Ok(body)
    }
}

#[async_trait]
impl StatsApi for HttpApi {
    async fn fetch(&self, dataset: Dataset) -> Result<DataTable, RemoteError> {
        let url = self.url(dataset.path());
        tracing::debug!("GET {}", url);

        let table: DataTable = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!("{} returned {} row(s)", dataset.name(), table.data.len());
        Ok(table)
    }
}
