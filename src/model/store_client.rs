//! RuStore API client: paged search, app details, version history and
//! download-link resolution.
//!
//! Every response uses a uniform envelope with a status code string and a
//! payload body. A non-OK code means "no data available" and is never treated
//! as fatal; the caller decides how to render nothing.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::content::{AppDetail, AppSummary, DownloadInfo, SearchPage, VersionEntry};
use super::session::CancellationToken;

pub const DEFAULT_BASE_URL: &str = "https://backapi.rustore.ru";
pub const PAGE_SIZE: u32 = 20;

/// Error taxonomy of the remote client.
///
/// `Cancelled` is expected whenever a session is superseded and never crosses
/// the controller boundary as a reportable error.
#[derive(Clone, Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request cancelled")]
    Cancelled,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    code: String,
    body: Option<T>,
}

impl<T> Envelope<T> {
    fn into_body(self) -> Option<T> {
        if self.code == "OK" { self.body } else { None }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody {
    #[serde(default)]
    content: Vec<AppSummary>,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct VersionHistoryBody {
    #[serde(default)]
    content: Vec<VersionEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DownloadRequest {
    app_id: u64,
}

/// Abstract store backend consumed by the search controller.
///
/// `search` and `app_details` sit on the controller's session path and accept
/// its cancellation token; the modal endpoints do not.
#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn search(
        &self,
        query: &str,
        page: u32,
        token: &CancellationToken,
    ) -> Result<SearchPage, StoreError>;

    async fn app_details(
        &self,
        package_name: &str,
        token: &CancellationToken,
    ) -> Result<Option<AppDetail>, StoreError>;

    async fn version_history(&self, app_id: u64) -> Result<Vec<VersionEntry>, StoreError>;

    async fn download_link(&self, app_id: u64) -> Result<Option<DownloadInfo>, StoreError>;
}

/// reqwest-backed client for the RuStore backend.
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL from `RUSTORE_API_BASE`, falling back to the public backend.
    pub fn from_env() -> Self {
        let base =
            std::env::var("RUSTORE_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }

    async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, StoreError> {
        let response = request.send().await?;
        Ok(response.json::<Envelope<T>>().await?)
    }

    /// Runs a request future, settling as `Cancelled` if the session token
    /// fires first.
    async fn with_cancellation<T>(
        token: &CancellationToken,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        if token.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        tokio::select! {
            _ = token.cancelled() => Err(StoreError::Cancelled),
            result = fut => result,
        }
    }
}

#[async_trait]
impl StoreApi for StoreClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        token: &CancellationToken,
    ) -> Result<SearchPage, StoreError> {
        tracing::debug!(query, page, "API: search");
        let url = format!("{}/applicationData/apps", self.base_url);
        let params = [
            ("pageNumber", page.to_string()),
            ("pageSize", PAGE_SIZE.to_string()),
            ("query", query.trim().to_string()),
        ];
        let request = self.http.get(url).query(&params);
        let envelope: Envelope<SearchBody> =
            Self::with_cancellation(token, self.fetch_envelope(request)).await?;
        let body = envelope.into_body().unwrap_or_default();
        Ok(SearchPage {
            items: body.content,
            total_pages: body.total_pages,
        })
    }

    async fn app_details(
        &self,
        package_name: &str,
        token: &CancellationToken,
    ) -> Result<Option<AppDetail>, StoreError> {
        tracing::debug!(package_name, "API: app details");
        let url = format!("{}/applicationData/overallInfo/{}", self.base_url, package_name);
        let request = self.http.get(url);
        let envelope: Envelope<AppDetail> =
            Self::with_cancellation(token, self.fetch_envelope(request)).await?;
        Ok(envelope.into_body())
    }

    async fn version_history(&self, app_id: u64) -> Result<Vec<VersionEntry>, StoreError> {
        tracing::debug!(app_id, "API: version history");
        let url = format!(
            "{}/applicationData/allAppVersionWhatsNew/{}",
            self.base_url, app_id
        );
        let envelope: Envelope<VersionHistoryBody> =
            self.fetch_envelope(self.http.get(url)).await?;
        Ok(envelope.into_body().map(|b| b.content).unwrap_or_default())
    }

    async fn download_link(&self, app_id: u64) -> Result<Option<DownloadInfo>, StoreError> {
        tracing::debug!(app_id, "API: download link");
        let url = format!("{}/applicationData/v2/download-link", self.base_url);
        let request = self.http.post(url).json(&DownloadRequest { app_id });
        let envelope: Envelope<serde_json::Value> = self.fetch_envelope(request).await?;
        Ok(envelope.into_body().map(|raw| DownloadInfo { raw }))
    }
}
